use crate::model::{Cursor, Item};

/// 输入事件（逻辑事件，由宿主把键盘/鼠标/焦点事件翻译而来）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心 DOM 或平台键值。
/// - 命中测试（点击是否落在控件内、悬停在第几行）由宿主完成。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// 输入框获得焦点
    FocusIn,
    /// 输入框文本整体变化（携带变化后的原文）
    Input(String),
    /// 在末尾追加一个字符
    Char(char),
    /// 删除末尾一个字符
    Backspace,
    /// 方向键上
    Up,
    /// 方向键下
    Down,
    /// 回车：提交焦点项（或唯一候选）
    Enter,
    /// 清空 Result Set（类似 Esc），保留输入框文本
    Escape,
    /// 鼠标悬停在第 n 行结果上（1-based）
    Hover(usize),
    /// 点击第 n 个结果（0-based）
    Select(usize),
    /// 点击已选项上的移除按钮（按 id）
    Remove(u32),
    /// 文档点击：`inside` 表示是否落在控件区域内
    Click { inside: bool },
}

/// 焦点移动方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// 引擎输出动作（对 UI/宿主的“副作用”请求）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 选中集合发生变化（宿主表单据此同步值）
    SelectionChanged(Vec<Item>),
    /// 首次交互之后的 touched 通知
    Touched,
    /// 请求聚焦输入框
    FocusInput,
    /// 请求输入框失焦
    Blur,
    /// 请求聚焦第 n 行结果（1-based）
    FocusResult(usize),
    /// 切换输入框光标样式
    SetCursor(Cursor),
    /// 直接设置输入框文本
    SetInputValue(String),
}
