use std::{collections::BTreeSet, fs, io, path::Path};

use picker_core::{error::SourceError, model::Item, source::ItemSource};
use thiserror::Error;

/// TSV 解析错误（行号从 1 开始）。
#[derive(Debug, Error)]
pub enum TsvError {
    #[error("读取 TSV 失败: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("TSV 第 {line} 行缺少 id/name")]
    MissingColumn { line: usize },
    #[error("TSV 第 {line} 行的 id `{value}` 不是非负整数")]
    InvalidId { line: usize, value: String },
    #[error("TSV 第 {line} 行的 id {id} 重复")]
    DuplicateId { line: usize, id: u32 },
}

impl From<TsvError> for SourceError {
    fn from(err: TsvError) -> Self {
        match err {
            TsvError::Io { source } => SourceError::Io { source },
            other => SourceError::Invalid {
                reason: other.to_string(),
            },
        }
    }
}

/// TSV 格式（简化版）：
///
/// - `id<TAB>name<TAB>tag`
/// - tag 可省略，默认空串
/// - 允许 `#` 开头注释行与空行
///
/// 文件顺序即 candidate pool 顺序。
pub struct TsvItemSource {
    items: Vec<Item>,
}

impl TsvItemSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TsvError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let source = Self::from_tsv_str(&s)?;
        tracing::debug!(path = %path.display(), count = source.items.len(), "tsv items parsed");
        Ok(source)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, TsvError> {
        let mut items = Vec::new();
        let mut seen: BTreeSet<u32> = BTreeSet::new();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut it = line.split('\t');
            let id = it.next().unwrap_or("").trim();
            let name = it.next().unwrap_or("").trim();
            if id.is_empty() || name.is_empty() {
                return Err(TsvError::MissingColumn { line: line_no });
            }
            let id: u32 = id.parse().map_err(|_| TsvError::InvalidId {
                line: line_no,
                value: id.to_string(),
            })?;
            if !seen.insert(id) {
                return Err(TsvError::DuplicateId { line: line_no, id });
            }
            let tag = it.next().map(str::trim).unwrap_or("");
            items.push(Item::new(id, name, tag));
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl ItemSource for TsvItemSource {
    fn fetch(&self) -> Result<Vec<Item>, SourceError> {
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_file_order() {
        let src = TsvItemSource::from_tsv_str(
            "# id\tname\ttag\n\n2\tBanana\tyellow\n1\tApple\tred\n3\tKiwifruit\n",
        )
        .expect("parse");
        let items = src.fetch().expect("fetch");
        assert_eq!(
            items,
            vec![
                Item::new(2, "Banana", "yellow"),
                Item::new(1, "Apple", "red"),
                Item::new(3, "Kiwifruit", ""),
            ]
        );
    }

    #[test]
    fn rejects_missing_name() {
        let err = TsvItemSource::from_tsv_str("1\tApple\n2\n").err().expect("error");
        assert!(matches!(err, TsvError::MissingColumn { line: 2 }));
        assert_eq!(err.to_string(), "TSV 第 2 行缺少 id/name");
    }

    #[test]
    fn rejects_bad_and_duplicate_ids() {
        let err = TsvItemSource::from_tsv_str("x\tApple\n").err().expect("error");
        assert!(matches!(err, TsvError::InvalidId { line: 1, .. }));

        let err = TsvItemSource::from_tsv_str("1\tApple\n1\tPear\n")
            .err()
            .expect("error");
        assert!(matches!(err, TsvError::DuplicateId { line: 2, id: 1 }));
    }

    #[test]
    fn tsv_errors_become_source_errors() {
        let err: SourceError = TsvError::MissingColumn { line: 4 }.into();
        assert!(matches!(err, SourceError::Invalid { .. }));

        let missing = TsvItemSource::from_path("/definitely/not/here.tsv")
            .err()
            .expect("missing file");
        assert!(matches!(SourceError::from(missing), SourceError::Io { .. }));
    }

    #[test]
    fn bundled_fruit_list_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("picker_cli")
            .join("asset")
            .join("fruits.tsv");
        let src = TsvItemSource::from_path(path).expect("bundled list");
        assert_eq!(src.items().len(), 20);
        assert_eq!(src.items()[0], Item::new(1, "Apple", "red"));
    }
}
