//! 命令行参数。

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use picker_core::config::{Bounds, MAX_ITEMS_COUNT, MIN_CHAR, MIN_ITEMS_COUNT, RESULT_LIMIT};

#[derive(Parser)]
#[command(
    name = "picker",
    version,
    about = "多选自动补全控件的交互式演示",
    long_about = "逐行输入查询文本，用 :up/:down/:enter 等命令操作结果列表。\n\
                  输入 :help 查看全部命令。"
)]
pub struct Cli {
    /// 候选列表（id<TAB>name<TAB>tag），默认使用自带的水果列表。
    #[arg(long = "items", value_name = "PATH")]
    pub items: Option<PathBuf>,

    /// 触发搜索的最少字符数（<= 0 时聚焦即展示全部）。
    #[arg(long = "min-char", default_value_t = MIN_CHAR, allow_negative_numbers = true)]
    pub min_char: i32,

    /// 结果条数上限（<= 0 表示不限制）。
    #[arg(long = "result-limit", default_value_t = RESULT_LIMIT, allow_negative_numbers = true)]
    pub result_limit: i32,

    /// 最少选择数。
    #[arg(long = "min-items", default_value_t = MIN_ITEMS_COUNT, allow_negative_numbers = true)]
    pub min_items: i32,

    /// 最多选择数。
    #[arg(long = "max-items", default_value_t = MAX_ITEMS_COUNT, allow_negative_numbers = true)]
    pub max_items: i32,

    /// 日志详细程度（-v 为 debug，-vv 为 trace）。
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_char: self.min_char,
            result_limit: self.result_limit,
            min_items_count: self.min_items,
            max_items_count: self.max_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bounds_defaults() {
        let cli = Cli::try_parse_from(["picker"]).expect("parse");
        assert_eq!(cli.bounds(), Bounds::default());
        assert!(cli.items.is_none());
    }

    #[test]
    fn accepts_negative_limits() {
        let cli = Cli::try_parse_from(["picker", "--result-limit", "-1", "--max-items", "5", "-vv"])
            .expect("parse");
        assert_eq!(cli.bounds().result_limit, -1);
        assert_eq!(cli.bounds().max_items_count, 5);
        assert_eq!(cli.verbose, 2);
    }
}
