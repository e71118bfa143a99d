//! `validator`：纯函数约束校验。
//!
//! 宿主表单在任何边界字段或选择发生变化时调用；结果只用于展示错误和
//! 决定引擎是否启用，不会阻止任何操作。

use crate::error::{BoundsError, SelectionRangeError};

/// 检查 `min <= max`。
pub fn check_ordered_bounds(min: i32, max: i32) -> Result<(), BoundsError> {
    if min > max {
        return Err(BoundsError::MinExceedsMax { min, max });
    }
    Ok(())
}

/// 检查选择数量落在 `[min, max]`；下限优先报告。
pub fn check_selection_size<T>(
    selection: &[T],
    min: i32,
    max: i32,
) -> Result<(), SelectionRangeError> {
    let count = selection.len();
    let count_i64 = i64::try_from(count).unwrap_or(i64::MAX);
    if count_i64 < i64::from(min) {
        return Err(SelectionRangeError::BelowMin { count, min });
    }
    if count_i64 > i64::from(max) {
        return Err(SelectionRangeError::AboveMax { count, max });
    }
    Ok(())
}
