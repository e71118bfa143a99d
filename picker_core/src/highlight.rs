//! `highlight`：把展示名切成“普通/命中”片段，供 UI 加粗命中部分。
//!
//! 只标记第一处命中，按字面量做大小写不敏感匹配（不做变音符折叠，
//! 因为片段必须能在原文上切出来）。

/// 展示片段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    Plain(&'a str),
    Matched(&'a str),
}

/// 按 `query` 切分 `name`；`query` 为空或不命中时返回整段普通文本。
pub fn highlight<'a>(name: &'a str, query: &str) -> Vec<Span<'a>> {
    if query.is_empty() {
        return vec![Span::Plain(name)];
    }
    let Some((start, end)) = find_ignore_case(name, query) else {
        return vec![Span::Plain(name)];
    };
    let mut out = Vec::with_capacity(3);
    if start > 0 {
        out.push(Span::Plain(&name[..start]));
    }
    out.push(Span::Matched(&name[start..end]));
    if end < name.len() {
        out.push(Span::Plain(&name[end..]));
    }
    out
}

/// 找到第一处大小写不敏感命中，返回原文上的字节区间。
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    haystack
        .char_indices()
        .find_map(|(start, _)| {
            match_len(&haystack[start..], &needle).map(|len| (start, start + len))
        })
}

/// `text` 小写后是否以 `needle` 开头（且止于字符边界）；返回命中部分在原文上的字节长度。
fn match_len(text: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}
