//! 错误类型：全部可恢复，最坏情况只是控件被禁用。

use thiserror::Error;

use crate::form::Field;

/// 一对边界顺序颠倒（表单级错误，不抛出）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("最少选择数 {min} 大于最多选择数 {max}")]
    MinExceedsMax { min: i32, max: i32 },
}

/// 当前选择数量不在 `[min, max]` 范围内（字段级错误，不阻止增删）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionRangeError {
    #[error("已选 {count} 项，少于最少选择数 {min}")]
    BelowMin { count: usize, min: i32 },
    #[error("已选 {count} 项，超过最多选择数 {max}")]
    AboveMax { count: usize, max: i32 },
}

/// 表单字段超出允许范围（只报告，不阻止）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} 不能小于 {min}（当前为 {value}）")]
    BelowMin { field: Field, value: i32, min: i32 },
    #[error("{field} 不能大于 {max}（当前为 {value}）")]
    AboveMax { field: Field, value: i32, max: i32 },
}

/// 无法识别的表单字段名。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未知字段 `{0}`")]
pub struct UnknownField(pub String);

/// 回车提交的展示名在 pool 中已不存在。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("候选中找不到 `{name}`")]
    NotFound { name: String },
}

/// 数据源加载失败；原样交还给调用方，不重试。
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("读取候选列表失败: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("候选列表无效: {reason}")]
    Invalid { reason: String },
}
