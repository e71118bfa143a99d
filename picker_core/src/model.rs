use serde::{Deserialize, Serialize};

/// 候选项（来自数据源，加载后不可变）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// 唯一 id（Selection 按 id 去重）
    pub id: u32,
    /// 展示名（也是匹配用的原文）
    pub name: String,
    /// 附加标签（例如颜色、分类），core 不解释
    pub tag: String,
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tag: tag.into(),
        }
    }
}

/// 进入 `Filter` 的候选：池内位置 + 归一化后的名字。
///
/// 注意：`index` 是 **candidate pool 的下标**，Result Set 只保存下标，不复制 `Item`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub index: usize,
    pub key: &'a str,
}

/// 输入框光标样式（宿主据此切换 `cursor`）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    /// 可输入
    #[default]
    Text,
    /// 已达上限，输入框不再接受聚焦
    Default,
}

/// 控件交互阶段。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// 未聚焦，Result Set 为空
    #[default]
    Idle,
    /// 已聚焦，等待输入
    Focused,
    /// query 达到 `min_char`，Result Set 已重新计算
    Searching,
    /// 方向键/悬停在 Result Set 内移动焦点
    Navigating,
}

/// 引擎给 UI 的“快照视图”。
///
/// - UI 层只读 `UiState`，不直接读写 `Context`
/// - `result_list` 已经按 pool 顺序物化，`focus` 为 1-based（0 表示无焦点）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// 输入框原文
    pub input: String,
    /// 归一化后的 query
    pub query: String,
    /// 当前 Result Set
    pub result_list: Vec<Item>,
    /// 焦点位置：0 = 无，1..=N
    pub focus: usize,
    /// 已选项（按选择顺序）
    pub selection: Vec<Item>,
    pub cursor: Cursor,
    pub phase: Phase,
    pub enabled: bool,
}

impl UiState {
    /// 当前聚焦的结果项（若有）。
    pub fn focused_item(&self) -> Option<&Item> {
        self.focus
            .checked_sub(1)
            .and_then(|i| self.result_list.get(i))
    }
}
