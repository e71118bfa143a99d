//! `filter`：Result Set 后处理（排除已选/子串匹配/截断）。

use crate::model::Candidate;

/// Filter：对候选列表做后处理；必须保持输入顺序（pool 顺序）。
pub trait Filter: Send + Sync {
    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>>;
}

/// 默认 filter：去掉已选项，按子串匹配 query，截断到 `limit`。
///
/// - `query` / `selected` 都必须是归一化后的文本
/// - `limit <= 0` 表示不限制（不是“零条”）
pub struct ExcludeMatchTruncate<'q> {
    pub query: &'q str,
    pub selected: &'q [String],
    pub limit: i32,
}

impl Filter for ExcludeMatchTruncate<'_> {
    fn apply<'a>(&self, mut candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates.retain(|c| {
            !self.selected.iter().any(|s| s == c.key) && c.key.contains(self.query)
        });
        if let Ok(limit) = usize::try_from(self.limit) {
            if limit > 0 {
                candidates.truncate(limit);
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates<'a>(keys: &[&'a str]) -> Vec<Candidate<'a>> {
        keys.iter()
            .enumerate()
            .map(|(index, key)| Candidate { index, key })
            .collect()
    }

    fn indices(out: &[Candidate<'_>]) -> Vec<usize> {
        out.iter().map(|c| c.index).collect()
    }

    #[test]
    fn substring_not_prefix() {
        let f = ExcludeMatchTruncate {
            query: "rr",
            selected: &[],
            limit: 0,
        };
        let out = f.apply(candidates(&["apple", "cherry", "strawberry"]));
        assert_eq!(indices(&out), vec![1, 2]);
    }

    #[test]
    fn excludes_selected_by_key() {
        let selected = vec!["banana".to_string()];
        let f = ExcludeMatchTruncate {
            query: "b",
            selected: &selected,
            limit: 0,
        };
        let out = f.apply(candidates(&["apple", "banana", "blueberry"]));
        assert_eq!(indices(&out), vec![2]);
    }

    #[test]
    fn non_positive_limit_means_unlimited() {
        for limit in [0, -3] {
            let f = ExcludeMatchTruncate {
                query: "",
                selected: &[],
                limit,
            };
            assert_eq!(f.apply(candidates(&["a", "b", "c"])).len(), 3);
        }
    }

    #[test]
    fn positive_limit_truncates_keeping_order() {
        let f = ExcludeMatchTruncate {
            query: "",
            selected: &[],
            limit: 2,
        };
        let out = f.apply(candidates(&["a", "b", "c"]));
        assert_eq!(indices(&out), vec![0, 1]);
    }
}
