//! `config`：控件的计数边界（由宿主表单持有，每次变化时整体下发）。

use serde::{Deserialize, Serialize};

/// 默认的最少触发字符数。
pub const MIN_CHAR: i32 = 1;
/// 默认的结果条数上限。
pub const RESULT_LIMIT: i32 = 5;
/// 默认最少选择数。
pub const MIN_ITEMS_COUNT: i32 = 1;
/// 默认最多选择数。
pub const MAX_ITEMS_COUNT: i32 = 3;
/// 表单字段允许的最大值（同时是候选总数的上限）。
pub const ITEMS_COUNT: i32 = 20;

/// 计数边界。
///
/// 字段保留有符号整数：宿主表单里的值可能暂时非法（负数、min > max），
/// 由 `is_usable` 决定引擎是否可用，而不是在这里拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// query 达到多少个字符才开始搜索；`<= 0` 时聚焦即展示
    pub min_char: i32,
    /// Result Set 条数上限；`<= 0` 表示不限制
    pub result_limit: i32,
    /// 最少选择数（只做校验，不阻止移除）
    pub min_items_count: i32,
    /// 最多选择数；`> 0` 时阻止继续添加
    pub max_items_count: i32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_char: MIN_CHAR,
            result_limit: RESULT_LIMIT,
            min_items_count: MIN_ITEMS_COUNT,
            max_items_count: MAX_ITEMS_COUNT,
        }
    }
}

impl Bounds {
    pub fn min_char(mut self, n: i32) -> Self {
        self.min_char = n;
        self
    }

    pub fn result_limit(mut self, n: i32) -> Self {
        self.result_limit = n;
        self
    }

    pub fn min_items_count(mut self, n: i32) -> Self {
        self.min_items_count = n;
        self
    }

    pub fn max_items_count(mut self, n: i32) -> Self {
        self.max_items_count = n;
        self
    }

    /// 已选 `count` 项时是否已到上限（`max_items_count <= 0` 永远不到）。
    pub fn max_reached(&self, count: usize) -> bool {
        match usize::try_from(self.max_items_count) {
            Ok(max) if max > 0 => count >= max,
            _ => false,
        }
    }

    /// 长度为 `len` 的 query 是否足以触发搜索。
    pub fn query_long_enough(&self, len: usize) -> bool {
        usize::try_from(self.min_char).map_or(true, |min| len >= min)
    }

    /// 边界是否允许启用引擎：无负数且 `min_items_count <= max_items_count`。
    pub fn is_usable(&self) -> bool {
        self.min_char >= 0
            && self.result_limit >= 0
            && self.min_items_count >= 0
            && self.max_items_count >= 0
            && self.min_items_count <= self.max_items_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_reached_only_with_positive_max() {
        let b = Bounds::default().max_items_count(2);
        assert!(!b.max_reached(1));
        assert!(b.max_reached(2));
        assert!(!Bounds::default().max_items_count(0).max_reached(100));
        assert!(!Bounds::default().max_items_count(-1).max_reached(100));
    }

    #[test]
    fn non_positive_min_char_always_long_enough() {
        assert!(Bounds::default().min_char(0).query_long_enough(0));
        assert!(Bounds::default().min_char(-2).query_long_enough(0));
        assert!(!Bounds::default().min_char(2).query_long_enough(1));
    }

    #[test]
    fn usable_requires_ordered_non_negative_bounds() {
        assert!(Bounds::default().is_usable());
        assert!(!Bounds::default().min_char(-1).is_usable());
        assert!(!Bounds::default().result_limit(-1).is_usable());
        assert!(
            !Bounds::default()
                .min_items_count(4)
                .max_items_count(3)
                .is_usable()
        );
    }

    #[test]
    fn serializes_with_form_field_names() {
        let json = serde_json::to_value(Bounds::default()).expect("serialize bounds");
        assert_eq!(json["minChar"], 1);
        assert_eq!(json["resultLimit"], 5);
        assert_eq!(json["minItemsCount"], 1);
        assert_eq!(json["maxItemsCount"], 3);
    }
}
