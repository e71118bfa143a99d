//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对 `Context` 做状态变更，并产生 `Action`（给宿主的副作用请求）。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `EditingProcessor`：编辑输入（Input/Char/Backspace/Escape）并触发重新搜索
//! - `FocusProcessor`：聚焦与文档点击（FocusIn/Click）
//! - `NavigationProcessor`：方向键与悬停（Up/Down/Hover）
//! - `CommitProcessor`：提交与移除（Enter/Select(n)/Remove(id)）

use crate::{
    config::Bounds,
    context::Context,
    key_event::{Action, Direction, InputEvent},
    model::Item,
};

/// 给 processors 的对象安全引擎接口（避免在 processors 层引入泛型）。
pub trait EngineFacade {
    /// 归一化：raw -> key
    fn normalize(&self, raw: &str) -> String;
    /// 过滤：根据 query/selection/limit 生成 Result Set（pool 下标）
    fn search(&self, query: &str, selection: &[Item], result_limit: i32) -> Vec<usize>;
    /// 按 pool 下标取项
    fn item(&self, index: usize) -> Option<&Item>;
    /// 按展示名精确查找
    fn find_by_name(&self, name: &str) -> Option<&Item>;
}

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 Context；必要时产生输出动作。
///
/// `bounds` 每次事件都由 `Session` 传入当前值。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

/// 编辑输入的 processor（整体替换/追加/退格/Esc）。
pub struct EditingProcessor;

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::Input(text) => {
                let actions = context.input_changed(engine, bounds, text.clone());
                (ProcessStatus::Consume, actions)
            }
            InputEvent::Char(ch) => {
                let mut text = context.input.clone();
                text.push(*ch);
                (ProcessStatus::Consume, context.input_changed(engine, bounds, text))
            }
            InputEvent::Backspace => {
                let mut text = context.input.clone();
                text.pop();
                (ProcessStatus::Consume, context.input_changed(engine, bounds, text))
            }
            InputEvent::Escape => (ProcessStatus::Consume, context.escape()),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct FocusProcessor;

impl Processor for FocusProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::FocusIn => (ProcessStatus::Consume, context.focus_in(engine, bounds)),
            InputEvent::Click { inside } => (ProcessStatus::Consume, context.click(inside)),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct NavigationProcessor;

impl Processor for NavigationProcessor {
    fn process(
        &mut self,
        _engine: &dyn EngineFacade,
        _bounds: &Bounds,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::Up => (ProcessStatus::Consume, context.move_focus(Direction::Up)),
            InputEvent::Down => (ProcessStatus::Consume, context.move_focus(Direction::Down)),
            InputEvent::Hover(position) => (ProcessStatus::Consume, context.hover(position)),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct CommitProcessor;

impl Processor for CommitProcessor {
    fn process(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::Enter => (ProcessStatus::Consume, context.commit_focused(engine, bounds)),
            // 点击结果行
            InputEvent::Select(i) => (
                ProcessStatus::Consume,
                context.select_result(engine, bounds, i),
            ),
            InputEvent::Remove(id) => (
                ProcessStatus::Consume,
                context.remove_item(engine, bounds, id),
            ),
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}
