//! `normalize`：匹配前的文本归一化。
//!
//! 规则：NFD 分解 -> 去掉组合附加符号 -> 小写。
//! 例如 `"Café"`、`"CAFE"`、`"cafe\u{301}"` 归一化后都是 `"cafe"`。

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalizer：把展示文本/输入文本转成用于比较的 key。
///
/// 约定：实现必须幂等，即 `normalize(normalize(s)) == normalize(s)`。
pub trait Normalizer: Send + Sync {
    fn normalize(&self, input: &str) -> String;
}

/// 默认实现：大小写折叠 + 去变音符。
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldNormalizer;

impl Normalizer for FoldNormalizer {
    fn normalize(&self, input: &str) -> String {
        normalize(input)
    }
}

/// 归一化函数本体（`FoldNormalizer` 直接转调）。
pub fn normalize(input: &str) -> String {
    // 小写可能重新引入附加符号（例如 `İ` -> `i\u{307}`），所以再过滤一次。
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
