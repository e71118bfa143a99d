use crate::{error::SourceError, model::Item};

/// 数据源抽象：core 不关心候选来自文件/内存/网络。
///
/// 约定：
/// - 只在启动时调用一次，结果整体作为 candidate pool
/// - 失败原样返回，由调用方决定如何处理（core 不重试）
pub trait ItemSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<Item>, SourceError>;
}

impl ItemSource for Vec<Item> {
    fn fetch(&self) -> Result<Vec<Item>, SourceError> {
        Ok(self.clone())
    }
}

/// 调用 `fetch`，并在调用前后通知 loading 状态（失败时同样会通知 `false`）。
pub fn fetch_with_loading(
    source: &dyn ItemSource,
    mut on_loading: impl FnMut(bool),
) -> Result<Vec<Item>, SourceError> {
    on_loading(true);
    let out = source.fetch();
    on_loading(false);
    if let Err(err) = &out {
        tracing::error!(error = %err, "fetching candidates failed");
    }
    out
}
