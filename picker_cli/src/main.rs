mod cli;
mod logging;

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use clap::Parser;
use picker_core::{
    engine::Engine,
    form::{Field, Form},
    highlight::{Span, highlight},
    key_event::{Action, InputEvent},
    model::UiState,
    normalize::FoldNormalizer,
    session::Session,
};
use picker_items::TsvItemSource;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let items_path = cli.items.clone().unwrap_or_else(default_items_path);
    let source = TsvItemSource::from_path(&items_path)
        .with_context(|| format!("无法读取候选列表 {}", items_path.display()))?;

    let session = Session::new(Engine::new(FoldNormalizer)).with_bounds(cli.bounds());
    let items_count = i32::try_from(source.items().len()).unwrap_or(i32::MAX);
    let mut form = Form::new(session).items_count(items_count);
    form.load(&source)?;

    repl(&mut form, &items_path)
}

fn default_items_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("asset").join("fruits.tsv")
}

/// REPL 一行输入对应的命令。
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(InputEvent),
    Set(Field, i32),
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Event(InputEvent::Input(line.to_string()));
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();
    match (name, arg) {
        ("q" | "quit" | "exit", _) => Command::Quit,
        ("help" | "h", _) => Command::Help,
        ("show", _) => Command::Show,
        ("up", _) => Command::Event(InputEvent::Up),
        ("down", _) => Command::Event(InputEvent::Down),
        ("enter", _) => Command::Event(InputEvent::Enter),
        ("esc", _) => Command::Event(InputEvent::Escape),
        ("focus", _) => Command::Event(InputEvent::FocusIn),
        ("blur", _) => Command::Event(InputEvent::Click { inside: false }),
        ("click", _) => Command::Event(InputEvent::Click { inside: true }),
        ("pick", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Event(InputEvent::Select(n - 1)),
            _ => Command::Invalid(format!("无效的行号 `{n}`")),
        },
        ("hover", Some(n)) => match n.parse::<usize>() {
            Ok(n) => Command::Event(InputEvent::Hover(n)),
            Err(_) => Command::Invalid(format!("无效的行号 `{n}`")),
        },
        ("rm", Some(id)) => match id.parse::<u32>() {
            Ok(id) => Command::Event(InputEvent::Remove(id)),
            Err(_) => Command::Invalid(format!("无效的 id `{id}`")),
        },
        ("set", Some(field)) => {
            let field = match field.parse::<Field>() {
                Ok(f) => f,
                Err(err) => return Command::Invalid(err.to_string()),
            };
            match parts.next().map(str::parse::<i32>) {
                Some(Ok(v)) => Command::Set(field, v),
                _ => Command::Invalid(format!("用法：:set {field} <整数>")),
            }
        }
        _ => Command::Invalid(format!("未知命令 `:{rest}`，输入 :help 查看帮助")),
    }
}

const HELP: &str = "\
直接输入文本：替换输入框内容并搜索（空行清空输入）
:focus / :click      聚焦输入框 / 点击控件内部
:blur                点击控件外部（收起结果）
:up / :down          在结果中移动焦点
:hover N             悬停到第 N 行
:enter               提交焦点项（或唯一结果）
:pick N              点击第 N 行结果
:rm ID               移除已选项
:esc                 收起结果
:set FIELD VALUE     修改 min-char / result-limit / min-items / max-items
:show                显示当前状态
:q                   退出";

fn repl(form: &mut Form<FoldNormalizer>, items_path: &Path) -> Result<()> {
    let mut out = io::stdout();
    let stdin = io::stdin();
    let mut line = String::new();
    writeln!(
        out,
        "picker demo | items: {} ({} 项)",
        items_path.display(),
        form.session().pool().len()
    )?;
    writeln!(out, "输入 :help 查看命令，:q 退出。")?;

    loop {
        line.clear();
        write!(out, "picker> ")?;
        out.flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        match parse_command(input) {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Invalid(msg) => writeln!(out, "{msg}")?,
            Command::Show => render(&mut out, form, &form.session().ui_state(), &[])?,
            Command::Set(field, value) => {
                let actions = form.set_field(field, value);
                render(&mut out, form, &form.session().ui_state(), &actions)?;
            }
            Command::Event(ev) => {
                let (ui, actions) = form.handle(ev);
                render(&mut out, form, &ui, &actions)?;
            }
        }
    }

    Ok(())
}

fn render(
    out: &mut impl Write,
    form: &Form<FoldNormalizer>,
    ui: &UiState,
    actions: &[Action],
) -> io::Result<()> {
    writeln!(out, "--------------------")?;
    for action in actions {
        match action {
            Action::SelectionChanged(_) | Action::Touched => {}
            other => writeln!(out, "  -> {other:?}")?,
        }
    }
    let state = if ui.enabled { "" } else { " [禁用]" };
    writeln!(out, "input: {:?} ({:?}, cursor {:?}){state}", ui.input, ui.phase, ui.cursor)?;

    for (i, item) in ui.result_list.iter().enumerate() {
        let n = i + 1;
        let marker = if ui.focus == n { '>' } else { ' ' };
        writeln!(out, "{marker}{n}. {}\t({})", decorate(&item.name, &ui.input), item.tag)?;
    }

    if ui.selection.is_empty() {
        writeln!(out, "selected: (none)")?;
    } else {
        let labels: Vec<String> = ui
            .selection
            .iter()
            .map(|item| format!("{}#{}", item.name, item.id))
            .collect();
        writeln!(out, "selected: {}", labels.join(", "))?;
    }

    let report = form.report();
    for err in &report.fields {
        writeln!(out, "! {err}")?;
    }
    if let Some(err) = &report.bounds {
        writeln!(out, "! {err}")?;
    }
    if let Some(err) = &report.selection {
        writeln!(out, "! {err}")?;
    }
    Ok(())
}

/// 把命中部分用方括号标出来。
fn decorate(name: &str, query: &str) -> String {
    highlight(name, query)
        .into_iter()
        .map(|span| match span {
            Span::Plain(s) => s.to_string(),
            Span::Matched(s) => format!("[{s}]"),
        })
        .collect()
}
