//! `Session`：对宿主（表单/CLI/GUI）提供的控件实例。
//!
//! `Session` 自身不做交互判断，而是：
//! - 持有 `Context`（状态）与当前 `Bounds`
//! - 持有 processors 链（可插拔）
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `UiState` + `Action`
//!
//! 启用开关也在这里：禁用时所有事件与变更操作都被忽略。

use crate::{
    config::Bounds,
    context::Context,
    engine::Engine,
    error::LookupError,
    key_event::{Action, Direction, InputEvent},
    model::{Item, Phase, UiState},
    normalize::Normalizer,
    processor::{
        CommitProcessor, EditingProcessor, FocusProcessor, NavigationProcessor, ProcessStatus,
        Processor,
    },
};

/// 多选自动补全控件（一个实例的状态机容器）。
pub struct Session<N> {
    /// 引擎（pool + normalizer + filter 编排）
    engine: Engine<N>,
    /// 会话上下文（processors 共享）
    ctx: Context,
    /// 当前边界（宿主每次变化时整体下发）
    bounds: Bounds,
    enabled: bool,
    /// processors 链（可配置/可扩展）
    processors: Vec<Box<dyn Processor>>,
}

impl<N> Session<N>
where
    N: Normalizer,
{
    /// 创建会话，并组装默认 processors 链。
    pub fn new(engine: Engine<N>) -> Self {
        Self {
            engine,
            ctx: Context::default(),
            bounds: Bounds::default(),
            enabled: true,
            processors: vec![
                Box::new(EditingProcessor),
                Box::new(FocusProcessor),
                Box::new(NavigationProcessor),
                Box::new(CommitProcessor),
            ],
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// 获取当前 UI 快照（只读）。
    pub fn ui_state(&self) -> UiState {
        self.ctx.ui_state(&self.engine, self.enabled)
    }

    /// 处理一个输入事件，返回最新 UI 快照与动作列表。
    pub fn handle(&mut self, ev: InputEvent) -> (UiState, Vec<Action>) {
        if !self.enabled {
            tracing::debug!(event = ?ev, "session disabled, event ignored");
            return (self.ui_state(), Vec::new());
        }
        tracing::debug!(event = ?ev, "handling event");
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&self.engine, &self.bounds, &mut self.ctx, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        (self.ui_state(), actions)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// 宿主下发新的边界；正在搜索时立即按新边界重算 Result Set。
    pub fn update_configuration(&mut self, bounds: Bounds) -> Vec<Action> {
        tracing::debug!(?bounds, "configuration updated");
        self.bounds = bounds;
        if !self.enabled {
            return Vec::new();
        }
        self.ctx.refresh(&self.engine, &self.bounds)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 外部启用/禁用；禁用时收起结果。
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        tracing::debug!(enabled, "session enabled state changed");
        self.enabled = enabled;
        if !enabled {
            self.ctx.clear_result(false);
            self.ctx.phase = Phase::Idle;
        }
    }

    /// 替换 candidate pool；旧的 Result Set 下标随之失效。
    pub fn set_pool(&mut self, pool: Vec<Item>) {
        self.engine.set_pool(pool);
        self.ctx.clear_result(false);
    }

    pub fn pool(&self) -> &[Item] {
        self.engine.pool()
    }

    pub fn selection(&self) -> &[Item] {
        &self.ctx.selection
    }

    /// 宿主写入选择值（按 id 去重），并回报变化。
    pub fn write_value(&mut self, selection: Vec<Item>) -> Vec<Action> {
        let mut unique: Vec<Item> = Vec::with_capacity(selection.len());
        for item in selection {
            if !unique.iter().any(|u| u.id == item.id) {
                unique.push(item);
            }
        }
        self.ctx.selection = unique;
        let mut actions = vec![Action::SelectionChanged(self.ctx.selection.clone())];
        if self.enabled {
            actions.extend(self.ctx.refresh(&self.engine, &self.bounds));
        }
        actions
    }

    /// 选择已满时拒绝搜索，Result Set 保持为空。
    pub fn set_query(&mut self, raw: &str) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }
        if self.bounds.max_reached(self.ctx.selection.len()) {
            return self.ctx.reject_focus();
        }
        self.ctx.set_query(&self.engine, &self.bounds, raw);
        Vec::new()
    }

    pub fn recompute_result_set(&mut self) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }
        if self.bounds.max_reached(self.ctx.selection.len()) {
            return self.ctx.reject_focus();
        }
        self.ctx.recompute_result_set(&self.engine, &self.bounds);
        Vec::new()
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<Vec<Action>, LookupError> {
        if !self.enabled {
            return Ok(Vec::new());
        }
        self.ctx.select_by_name(&self.engine, &self.bounds, name)
    }

    pub fn select_item(&mut self, item: Item) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }
        self.ctx.select_item(&self.bounds, item)
    }

    pub fn remove_item(&mut self, id: u32) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }
        self.ctx.remove_item(&self.engine, &self.bounds, id)
    }

    pub fn move_focus(&mut self, direction: Direction) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }
        self.ctx.move_focus(direction)
    }

    pub fn commit_focused(&mut self) -> Vec<Action> {
        if !self.enabled {
            return Vec::new();
        }
        self.ctx.commit_focused(&self.engine, &self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Cursor, normalize::FoldNormalizer};

    fn session() -> Session<FoldNormalizer> {
        let engine = Engine::new(FoldNormalizer).with_pool(vec![
            Item::new(1, "Apple", "red"),
            Item::new(2, "Banana", "yellow"),
            Item::new(3, "Blueberry", "blue"),
        ]);
        Session::new(engine).with_bounds(Bounds::default().result_limit(0).max_items_count(2))
    }

    #[test]
    fn typing_moves_through_phases() {
        let mut s = session();
        let (ui, _) = s.handle(InputEvent::FocusIn);
        assert_eq!(ui.phase, Phase::Focused);
        assert!(ui.result_list.is_empty());

        let (ui, _) = s.handle(InputEvent::Char('b'));
        assert_eq!(ui.phase, Phase::Searching);
        assert_eq!(ui.result_list.len(), 2);

        let (ui, actions) = s.handle(InputEvent::Down);
        assert_eq!(ui.phase, Phase::Navigating);
        assert_eq!(actions, vec![Action::FocusResult(1)]);
        assert_eq!(ui.focused_item().map(|i| i.id), Some(2));

        let (ui, _) = s.handle(InputEvent::Enter);
        assert_eq!(ui.phase, Phase::Focused);
        assert!(ui.input.is_empty());
        assert_eq!(ui.selection.len(), 1);
    }

    #[test]
    fn backspace_below_min_char_empties_result() {
        let mut s = session().with_bounds(Bounds::default().min_char(2).result_limit(0));
        s.handle(InputEvent::Input("bl".to_string()));
        assert_eq!(s.ui_state().result_list.len(), 1);
        let (ui, _) = s.handle(InputEvent::Backspace);
        assert_eq!(ui.input, "b");
        assert!(ui.result_list.is_empty());
        assert_eq!(ui.phase, Phase::Focused);
    }

    #[test]
    fn zero_min_char_shows_everything_on_focus() {
        let mut s = session().with_bounds(Bounds::default().min_char(0).result_limit(0));
        let (ui, _) = s.handle(InputEvent::FocusIn);
        assert_eq!(ui.result_list.len(), 3);
    }

    #[test]
    fn focus_rejected_when_full() {
        let mut s = session();
        s.select_item(Item::new(1, "Apple", "red"));
        s.select_item(Item::new(2, "Banana", "yellow"));
        let (ui, actions) = s.handle(InputEvent::FocusIn);
        assert_eq!(actions, vec![Action::Blur, Action::SetCursor(Cursor::Default)]);
        assert_eq!(ui.cursor, Cursor::Default);
        assert_eq!(ui.phase, Phase::Idle);

        let (ui, _) = s.handle(InputEvent::Input("b".to_string()));
        assert!(ui.result_list.is_empty());
    }

    #[test]
    fn disabled_session_ignores_everything() {
        let mut s = session();
        s.handle(InputEvent::Input("b".to_string()));
        s.select_item(Item::new(1, "Apple", "red"));
        s.set_enabled(false);
        assert!(s.ui_state().result_list.is_empty());

        let (ui, actions) = s.handle(InputEvent::Input("a".to_string()));
        assert!(actions.is_empty());
        assert!(!ui.enabled);
        assert!(s.remove_item(1).is_empty());
        assert!(s.select_item(Item::new(3, "Blueberry", "blue")).is_empty());
        assert_eq!(s.selection().len(), 1);
        assert!(s.select_by_name("Banana").expect("disabled is not an error").is_empty());
    }

    #[test]
    fn removal_is_not_gated_by_min() {
        let mut s = session().with_bounds(Bounds::default().min_items_count(1).max_items_count(2));
        s.select_item(Item::new(1, "Apple", "red"));
        let actions = s.remove_item(1);
        assert!(s.selection().is_empty());
        assert!(actions.contains(&Action::SelectionChanged(Vec::new())));
    }

    #[test]
    fn set_pool_drops_stale_result() {
        let mut s = session();
        s.handle(InputEvent::Input("b".to_string()));
        s.set_pool(vec![Item::new(10, "Cherry", "red")]);
        assert!(s.ui_state().result_list.is_empty());
        s.set_query("ch");
        assert_eq!(s.ui_state().result_list[0].id, 10);
    }

    #[test]
    fn write_value_dedupes_by_id() {
        let mut s = session();
        let actions = s.write_value(vec![
            Item::new(1, "Apple", "red"),
            Item::new(1, "Apple", "red"),
        ]);
        assert_eq!(s.selection().len(), 1);
        assert_eq!(
            actions,
            vec![Action::SelectionChanged(vec![Item::new(1, "Apple", "red")])]
        );
    }

    #[test]
    fn new_configuration_recomputes_open_result() {
        let mut s = session();
        s.handle(InputEvent::Input("b".to_string()));
        assert_eq!(s.ui_state().result_list.len(), 2);

        assert!(s.update_configuration(s.bounds().result_limit(1)).is_empty());
        assert_eq!(s.ui_state().result_list.len(), 1);

        s.update_configuration(s.bounds().min_char(3));
        let ui = s.ui_state();
        assert!(ui.result_list.is_empty());
        assert_eq!(ui.phase, Phase::Focused);
    }

    #[test]
    fn set_query_with_full_selection_is_rejected() {
        let mut s = session();
        s.select_item(Item::new(1, "Apple", "red"));
        s.select_item(Item::new(2, "Banana", "yellow"));

        let actions = s.set_query("b");
        assert_eq!(actions, vec![Action::Blur, Action::SetCursor(Cursor::Default)]);
        assert!(s.ui_state().result_list.is_empty());
        assert_eq!(s.ui_state().phase, Phase::Idle);

        s.recompute_result_set();
        assert!(s.ui_state().result_list.is_empty());
    }

    #[test]
    fn written_value_leaves_the_open_result() {
        let mut s = session().with_bounds(Bounds::default().result_limit(0).max_items_count(0));
        s.handle(InputEvent::Input("b".to_string()));
        s.handle(InputEvent::Up);
        assert_eq!(s.ui_state().focus, 2);

        s.write_value(vec![Item::new(2, "Banana", "yellow")]);
        let ui = s.ui_state();
        assert_eq!(ui.result_list, vec![Item::new(3, "Blueberry", "blue")]);
        assert_eq!(ui.focus, 1);
    }

    #[test]
    fn written_value_filling_the_selection_closes_the_result() {
        let mut s = session();
        s.handle(InputEvent::Input("b".to_string()));
        let actions = s.write_value(vec![
            Item::new(1, "Apple", "red"),
            Item::new(2, "Banana", "yellow"),
        ]);
        assert!(actions.contains(&Action::Blur));
        assert!(s.ui_state().result_list.is_empty());
    }

    #[test]
    fn escape_event_keeps_typed_text() {
        let mut s = session();
        s.handle(InputEvent::FocusIn);
        s.handle(InputEvent::Input("b".to_string()));
        let (ui, actions) = s.handle(InputEvent::Escape);
        assert!(actions.is_empty());
        assert!(ui.result_list.is_empty());
        assert_eq!(ui.input, "b");
        assert_eq!(ui.phase, Phase::Focused);
    }
}
