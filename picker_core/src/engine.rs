use crate::filter::{ExcludeMatchTruncate, Filter};
use crate::model::{Candidate, Item};
use crate::normalize::Normalizer;

/// 引擎：持有 candidate pool，负责把 (query, selection, limit) 转成 Result Set。
///
/// 流水线：
/// - normalizer（归一化） -> 候选（pool 下标 + 归一化 key） -> filter（排除/匹配/截断） -> Result Set
///
/// pool 的归一化 key 在加载时一次算好，搜索时只归一化 query 和已选项。
pub struct Engine<N> {
    normalizer: N,
    /// candidate pool（只读，整体替换）
    pool: Vec<Item>,
    /// 与 `pool` 一一对应的归一化名字
    keys: Vec<String>,
}

impl<N> Engine<N>
where
    N: Normalizer,
{
    pub fn new(normalizer: N) -> Self {
        Self {
            normalizer,
            pool: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// 构造时直接给定 pool。
    pub fn with_pool(mut self, pool: Vec<Item>) -> Self {
        self.set_pool(pool);
        self
    }

    /// 整体替换 pool。
    pub fn set_pool(&mut self, pool: Vec<Item>) {
        self.keys = pool
            .iter()
            .map(|item| self.normalizer.normalize(&item.name))
            .collect();
        self.pool = pool;
        tracing::debug!(count = self.pool.len(), "candidate pool replaced");
    }

    pub fn pool(&self) -> &[Item] {
        &self.pool
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    /// 计算 Result Set（pool 下标，保持 pool 顺序）。
    ///
    /// - `query`: 已归一化的 query
    /// - `selection`: 当前已选项（按归一化名字排除）
    /// - `result_limit`: `<= 0` 表示不限制
    pub fn search(&self, query: &str, selection: &[Item], result_limit: i32) -> Vec<usize> {
        let selected: Vec<String> = selection
            .iter()
            .map(|item| self.normalizer.normalize(&item.name))
            .collect();
        let candidates: Vec<Candidate<'_>> = self
            .keys
            .iter()
            .enumerate()
            .map(|(index, key)| Candidate { index, key })
            .collect();
        ExcludeMatchTruncate {
            query,
            selected: &selected,
            limit: result_limit,
        }
        .apply(candidates)
        .into_iter()
        .map(|c| c.index)
        .collect()
    }

    /// 按展示名精确查找。
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.pool.iter().find(|item| item.name == name)
    }
}

impl<N> crate::processor::EngineFacade for Engine<N>
where
    N: Normalizer,
{
    fn normalize(&self, raw: &str) -> String {
        Engine::<N>::normalize(self, raw)
    }

    fn search(&self, query: &str, selection: &[Item], result_limit: i32) -> Vec<usize> {
        Engine::<N>::search(self, query, selection, result_limit)
    }

    fn item(&self, index: usize) -> Option<&Item> {
        self.pool.get(index)
    }

    fn find_by_name(&self, name: &str) -> Option<&Item> {
        Engine::<N>::find_by_name(self, name)
    }
}
