//! `picker_core`：多选自动补全控件的纯逻辑层，不做任何渲染与 I/O。
//!
//! 设计目标：
//! - **核心可复用**：表单/CLI/GUI 都能复用同一套状态机
//! - **分层清晰**：session -> processor -> context -> engine(normalizer + filter) -> 输出（`UiState` + `Action`）
//! - **副作用外置**：聚焦、失焦、光标样式、输入框文本都以 `Action` 交给宿主执行
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod filter;
pub mod form;
pub mod highlight;
pub mod key_event;
pub mod model;
pub mod normalize;
pub mod processor;
pub mod session;
pub mod source;
pub mod validator;
