//! `Context`：processor 链共享的唯一状态容器。
//!
//! 约定：
//! - `input`：输入框原文；`query`：其归一化结果
//! - `result`：Result Set，保存 candidate pool 的下标（不持有 `Item`）
//! - `focus`：1-based 焦点位置，0 表示无焦点；每次 `result` 变化后都重新 clamp
//! - `selection`：已选项，按 id 唯一
//!
//! 这里的方法不检查“控件是否启用”，启用开关由 `Session` 统一把关。
use crate::{
    config::Bounds,
    error::LookupError,
    key_event::{Action, Direction},
    model::{Cursor, Item, Phase, UiState},
    processor::EngineFacade,
};

/// 控件会话上下文：processor 链共享的唯一状态。
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// 输入框原文
    pub input: String,
    /// 归一化后的 query
    pub query: String,
    /// Result Set（pool 下标，pool 顺序）
    pub result: Vec<usize>,
    /// 焦点位置：0 = 无，1..=result.len()
    pub focus: usize,
    /// 已选项（按选择顺序）
    pub selection: Vec<Item>,
    pub phase: Phase,
    pub cursor: Cursor,
}

impl Context {
    /// 归一化并保存 query，然后重新计算 Result Set。
    ///
    /// query 短于 `min_char` 时 Result Set 直接清空，不保留上一次结果。
    pub fn set_query(&mut self, engine: &dyn EngineFacade, bounds: &Bounds, raw: &str) {
        self.query = engine.normalize(raw);
        self.apply_query(engine, bounds);
    }

    fn apply_query(&mut self, engine: &dyn EngineFacade, bounds: &Bounds) {
        if self.query_long_enough(bounds) {
            self.recompute_result_set(engine, bounds);
        } else {
            self.clear_result(false);
        }
    }

    /// 边界或选择在外部被替换后，按新值重新套用 `min_char`、上限与焦点 clamp。
    ///
    /// 只在正在搜索（或已有结果）时生效；选择已满时走拒绝路径。
    pub fn refresh(&mut self, engine: &dyn EngineFacade, bounds: &Bounds) -> Vec<Action> {
        let searching = matches!(self.phase, Phase::Searching | Phase::Navigating);
        if !searching && self.result.is_empty() {
            return Vec::new();
        }
        if bounds.max_reached(self.selection.len()) {
            return self.reject_focus();
        }
        self.apply_query(engine, bounds);
        if searching {
            self.phase = match (self.query_long_enough(bounds), self.focus) {
                (false, _) => Phase::Focused,
                (true, 0) => Phase::Searching,
                (true, _) => self.phase,
            };
        }
        Vec::new()
    }

    /// 按当前 query/selection/limit 重新过滤 pool，并 clamp 焦点。
    pub fn recompute_result_set(&mut self, engine: &dyn EngineFacade, bounds: &Bounds) {
        self.result = engine.search(&self.query, &self.selection, bounds.result_limit);
        self.focus = self.focus.min(self.result.len());
        tracing::trace!(query = %self.query, count = self.result.len(), "result set recomputed");
    }

    /// 清空 Result Set 与焦点；`clear_input` 时同时清空输入框。
    pub fn clear_result(&mut self, clear_input: bool) -> Vec<Action> {
        self.result.clear();
        self.focus = 0;
        if clear_input {
            self.input.clear();
            self.query.clear();
            return vec![Action::SetInputValue(String::new())];
        }
        Vec::new()
    }

    /// 输入框获得焦点：`min_char <= 0` 时立即展示结果。
    pub fn focus_in(&mut self, engine: &dyn EngineFacade, bounds: &Bounds) -> Vec<Action> {
        if bounds.max_reached(self.selection.len()) {
            return self.reject_focus();
        }
        self.cursor = Cursor::Text;
        self.phase = Phase::Focused;
        if bounds.min_char <= 0 {
            let raw = self.input.clone();
            self.set_query(engine, bounds, &raw);
            self.phase = Phase::Searching;
        }
        vec![Action::SetCursor(Cursor::Text)]
    }

    /// 输入框文本变化。
    pub fn input_changed(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        raw: String,
    ) -> Vec<Action> {
        self.input = raw;
        if bounds.max_reached(self.selection.len()) {
            return self.reject_focus();
        }
        self.cursor = Cursor::Text;
        let raw = self.input.clone();
        self.set_query(engine, bounds, &raw);
        self.phase = if self.query_long_enough(bounds) {
            Phase::Searching
        } else {
            Phase::Focused
        };
        vec![Action::SetCursor(Cursor::Text)]
    }

    /// 已达上限时拒绝聚焦/搜索：失焦、清空结果、光标切为不可用。
    pub fn reject_focus(&mut self) -> Vec<Action> {
        tracing::debug!(selected = self.selection.len(), "max items reached, input rejected");
        self.clear_result(false);
        self.phase = Phase::Idle;
        self.cursor = Cursor::Default;
        vec![Action::Blur, Action::SetCursor(Cursor::Default)]
    }

    /// 在 Result Set 内移动焦点（首尾回绕）；Result Set 为空时无操作。
    pub fn move_focus(&mut self, direction: Direction) -> Vec<Action> {
        let n = self.result.len();
        if n == 0 {
            return Vec::new();
        }
        self.focus = match direction {
            Direction::Up if self.focus <= 1 => n,
            Direction::Up => self.focus - 1,
            Direction::Down if self.focus >= n => 1,
            Direction::Down => self.focus + 1,
        };
        self.phase = Phase::Navigating;
        vec![Action::FocusResult(self.focus)]
    }

    /// 鼠标悬停：焦点跟随到第 `position` 行（1-based），越界忽略。
    pub fn hover(&mut self, position: usize) -> Vec<Action> {
        if position == 0 || position > self.result.len() {
            return Vec::new();
        }
        self.focus = position;
        self.phase = Phase::Navigating;
        vec![Action::FocusResult(position)]
    }

    /// 添加一项：未达上限且 id 未选时才生效，然后清空结果与输入框。
    pub fn select_item(&mut self, bounds: &Bounds, item: Item) -> Vec<Action> {
        if bounds.max_reached(self.selection.len()) {
            return self.reject_focus();
        }
        if self.selection.iter().any(|s| s.id == item.id) {
            return Vec::new();
        }
        tracing::debug!(id = item.id, name = %item.name, "item selected");
        self.selection.push(item);
        let mut actions = vec![
            Action::SelectionChanged(self.selection.clone()),
            Action::Touched,
        ];
        actions.extend(self.clear_result(true));
        self.phase = Phase::Focused;
        actions
    }

    /// 按展示名（精确）选中 pool 中的项。
    pub fn select_by_name(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        name: &str,
    ) -> Result<Vec<Action>, LookupError> {
        let item = engine
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                name: name.to_owned(),
            })?;
        Ok(self.select_item(bounds, item))
    }

    /// 点击第 `index` 个结果（0-based）。
    pub fn select_result(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        index: usize,
    ) -> Vec<Action> {
        let Some(item) = self
            .result
            .get(index)
            .and_then(|&i| engine.item(i))
            .cloned()
        else {
            return Vec::new();
        };
        self.select_item(bounds, item)
    }

    /// 回车：有焦点项则按其展示名提交；否则唯一候选时提交该项；其余情况无操作。
    pub fn commit_focused(&mut self, engine: &dyn EngineFacade, bounds: &Bounds) -> Vec<Action> {
        let position = match (self.focus, self.result.len()) {
            (0, 1) => Some(0),
            (0, _) => None,
            (focus, _) => Some(focus - 1),
        };
        let Some(name) = position
            .and_then(|p| self.result.get(p))
            .and_then(|&i| engine.item(i))
            .map(|item| item.name.clone())
        else {
            return Vec::new();
        };
        match self.select_by_name(engine, bounds, &name) {
            Ok(actions) => actions,
            Err(err) => {
                tracing::warn!(error = %err, "enter ignored");
                Vec::new()
            }
        }
    }

    /// 移除一项（没有下限拦截，下限只在表单层报错）。
    pub fn remove_item(
        &mut self,
        engine: &dyn EngineFacade,
        bounds: &Bounds,
        id: u32,
    ) -> Vec<Action> {
        let Some(pos) = self.selection.iter().position(|s| s.id == id) else {
            return Vec::new();
        };
        let removed = self.selection.remove(pos);
        tracing::debug!(id = removed.id, name = %removed.name, "item removed");
        self.cursor = Cursor::Text;
        // 正在搜索时，被移除的项应重新出现在结果里
        if matches!(self.phase, Phase::Searching | Phase::Navigating) {
            self.recompute_result_set(engine, bounds);
        }
        vec![
            Action::SetCursor(Cursor::Text),
            Action::SelectionChanged(self.selection.clone()),
            Action::Touched,
        ]
    }

    /// 文档点击：控件内请求聚焦输入框，控件外收起结果。
    pub fn click(&mut self, inside: bool) -> Vec<Action> {
        if inside {
            return vec![Action::FocusInput];
        }
        self.clear_result(false);
        self.phase = Phase::Idle;
        Vec::new()
    }

    /// Esc：收起结果，保留输入框文本。
    pub fn escape(&mut self) -> Vec<Action> {
        self.clear_result(false);
        if self.phase != Phase::Idle {
            self.phase = Phase::Focused;
        }
        Vec::new()
    }

    /// 生成 UI 层只读快照。
    pub fn ui_state(&self, engine: &dyn EngineFacade, enabled: bool) -> UiState {
        UiState {
            input: self.input.clone(),
            query: self.query.clone(),
            result_list: self
                .result
                .iter()
                .filter_map(|&i| engine.item(i).cloned())
                .collect(),
            focus: self.focus,
            selection: self.selection.clone(),
            cursor: self.cursor,
            phase: self.phase,
            enabled,
        }
    }

    fn query_long_enough(&self, bounds: &Bounds) -> bool {
        bounds.query_long_enough(self.query.chars().count())
    }
}
