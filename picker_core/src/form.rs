//! `form`：宿主表单。
//!
//! 表单持有四个边界字段和控件的当前值：
//! - 任一字段变化 -> `update_configuration` 一次性下发边界并重新推导启用状态
//! - 控件产生 `SelectionChanged` -> 同步到表单值
//! - `report` 随时给出字段错误、边界顺序错误、选择数量错误
//!
//! 禁用优先级：表单整体禁用（候选为空或加载失败）高于边界推导的启用状态，
//! 边界恢复合法也不会重新启用一个已被整体禁用的表单。

use std::{fmt, str::FromStr};

use crate::{
    config::{Bounds, ITEMS_COUNT},
    error::{BoundsError, FieldError, SelectionRangeError, SourceError, UnknownField},
    key_event::{Action, InputEvent},
    model::{Item, UiState},
    normalize::Normalizer,
    session::Session,
    source::{ItemSource, fetch_with_loading},
    validator::{check_ordered_bounds, check_selection_size},
};

/// 表单里的边界字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MinChar,
    ResultLimit,
    MinItemsCount,
    MaxItemsCount,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::MinChar,
        Field::ResultLimit,
        Field::MinItemsCount,
        Field::MaxItemsCount,
    ];

    /// 表单里的字段名。
    pub fn name(self) -> &'static str {
        match self {
            Field::MinChar => "minChar",
            Field::ResultLimit => "resultLimit",
            Field::MinItemsCount => "minItemsCount",
            Field::MaxItemsCount => "maxItemsCount",
        }
    }

    pub fn get(self, bounds: &Bounds) -> i32 {
        match self {
            Field::MinChar => bounds.min_char,
            Field::ResultLimit => bounds.result_limit,
            Field::MinItemsCount => bounds.min_items_count,
            Field::MaxItemsCount => bounds.max_items_count,
        }
    }

    pub fn set(self, bounds: &mut Bounds, value: i32) {
        match self {
            Field::MinChar => bounds.min_char = value,
            Field::ResultLimit => bounds.result_limit = value,
            Field::MinItemsCount => bounds.min_items_count = value,
            Field::MaxItemsCount => bounds.max_items_count = value,
        }
    }

    /// 字段允许的取值范围；`min_char` 没有上限。
    fn range(self, items_count: i32) -> (i32, Option<i32>) {
        match self {
            Field::MinChar => (0, None),
            Field::ResultLimit | Field::MinItemsCount => (0, Some(items_count)),
            Field::MaxItemsCount => (1, Some(items_count)),
        }
    }

    fn check(self, bounds: &Bounds, items_count: i32) -> Result<(), FieldError> {
        let value = self.get(bounds);
        let (min, max) = self.range(items_count);
        if value < min {
            return Err(FieldError::BelowMin {
                field: self,
                value,
                min,
            });
        }
        match max {
            Some(max) if value > max => Err(FieldError::AboveMax {
                field: self,
                value,
                max,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    /// 同时接受表单字段名（`minChar`）与命令行写法（`min-char`）。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minChar" | "min-char" => Ok(Field::MinChar),
            "resultLimit" | "result-limit" => Ok(Field::ResultLimit),
            "minItemsCount" | "min-items" => Ok(Field::MinItemsCount),
            "maxItemsCount" | "max-items" => Ok(Field::MaxItemsCount),
            _ => Err(UnknownField(s.to_owned())),
        }
    }
}

/// 表单校验结果快照。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub fields: Vec<FieldError>,
    pub bounds: Option<BoundsError>,
    pub selection: Option<SelectionRangeError>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty() && self.bounds.is_none() && self.selection.is_none()
    }
}

/// 宿主表单：边界字段 + 控件值 + 加载状态。
pub struct Form<N> {
    session: Session<N>,
    bounds: Bounds,
    /// 控件当前值（由 `SelectionChanged` 同步）
    value: Vec<Item>,
    /// 字段上限
    items_count: i32,
    loading: bool,
    /// 整体禁用（候选为空或加载失败）
    disabled: bool,
    touched: bool,
}

impl<N> Form<N>
where
    N: Normalizer,
{
    /// 以控件当前的边界作为表单初值。
    pub fn new(session: Session<N>) -> Self {
        let bounds = session.bounds();
        let value = session.selection().to_vec();
        let mut form = Self {
            session,
            bounds,
            value,
            items_count: ITEMS_COUNT,
            loading: false,
            disabled: false,
            touched: false,
        };
        form.recompute();
        form
    }

    /// 覆盖字段上限（默认 `ITEMS_COUNT`），通常取候选总数。
    pub fn items_count(mut self, n: i32) -> Self {
        self.items_count = n;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn value(&self) -> &[Item] {
        &self.value
    }

    pub fn session(&self) -> &Session<N> {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// 修改单个字段。
    pub fn set_field(&mut self, field: Field, value: i32) -> Vec<Action> {
        let mut bounds = self.bounds;
        field.set(&mut bounds, value);
        self.update_configuration(bounds)
    }

    /// 整体替换边界；唯一的重新推导入口。
    pub fn update_configuration(&mut self, bounds: Bounds) -> Vec<Action> {
        self.bounds = bounds;
        self.recompute()
    }

    /// 先定启用状态，再下发边界，保证打开的 Result Set 只按合法边界重算一次。
    fn recompute(&mut self) -> Vec<Action> {
        let enabled = !self.disabled && self.bounds.is_usable();
        self.session.set_enabled(enabled);
        self.session.update_configuration(self.bounds)
    }

    /// 把事件交给控件，并同步控件回报的值。
    pub fn handle(&mut self, ev: InputEvent) -> (UiState, Vec<Action>) {
        let (ui, actions) = self.session.handle(ev);
        self.absorb(&actions);
        (ui, actions)
    }

    /// 表单向控件写入值。
    pub fn write_value(&mut self, selection: Vec<Item>) -> Vec<Action> {
        let actions = self.session.write_value(selection);
        self.absorb(&actions);
        actions
    }

    fn absorb(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::SelectionChanged(selection) => self.value = selection.clone(),
                Action::Touched => self.touched = true,
                _ => {}
            }
        }
    }

    /// 开始加载候选。
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// 加载完成回调：复位 loading，填充 pool；候选为空或失败时整体禁用表单。
    ///
    /// 失败会原样返回给调用方。
    pub fn complete_load(
        &mut self,
        result: Result<Vec<Item>, SourceError>,
    ) -> Result<(), SourceError> {
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::info!(count = items.len(), "candidates loaded");
                let empty = items.is_empty();
                self.session.set_pool(items);
                if empty {
                    self.disable();
                }
                Ok(())
            }
            Err(err) => {
                self.session.set_pool(Vec::new());
                self.disable();
                Err(err)
            }
        }
    }

    /// 同步地完成一次加载（`begin_load` + `fetch` + `complete_load`）。
    pub fn load(&mut self, source: &dyn ItemSource) -> Result<(), SourceError> {
        let result = fetch_with_loading(source, |loading| self.loading = loading);
        self.complete_load(result)
    }

    fn disable(&mut self) {
        tracing::warn!("no candidates available, form disabled");
        self.disabled = true;
        self.recompute();
    }

    /// 当前的校验结果；整体禁用的表单不报告错误。
    pub fn report(&self) -> FormReport {
        if self.disabled {
            return FormReport::default();
        }
        let fields = Field::ALL
            .iter()
            .filter_map(|f| f.check(&self.bounds, self.items_count).err())
            .collect();
        let bounds =
            check_ordered_bounds(self.bounds.min_items_count, self.bounds.max_items_count).err();
        // 控件被禁用时不校验其值
        let selection = if self.session.is_enabled() {
            check_selection_size(
                &self.value,
                self.bounds.min_items_count,
                self.bounds.max_items_count,
            )
            .err()
        } else {
            None
        };
        FormReport {
            fields,
            bounds,
            selection,
        }
    }
}
