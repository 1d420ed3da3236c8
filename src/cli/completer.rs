//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
pub(crate) const COMMANDS: &[&str] = &[
    // 基础
    "help", "quit", "exit", "stats", "new",
    // 编辑
    "vertices", "vertex", "add-vertex", "add-edge", "rm-vertex", "rm-edge",
    "move", "rename", "clear",
    // 算法
    "matrix", "path", "floyd", "mst", "cycles", "centrality",
    // 文件
    "load", "save",
];

/// 参数补全
fn get_arguments(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "new" => Some(&["directed", "undirected"]),
        "directed" | "undirected" => Some(&["weighted"]),
        _ => None,
    }
}

fn pairs<'a>(candidates: impl Iterator<Item = &'a &'static str>) -> Vec<Pair> {
    candidates
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

/// GraphLab CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        let Some(&last) = words.last() else {
            return Ok((pos, pairs(COMMANDS.iter())));
        };

        if line_to_cursor.ends_with(char::is_whitespace) {
            // 在空格后，提供参数建议
            let candidates = get_arguments(&last.to_lowercase())
                .map(|args| pairs(args.iter()))
                .unwrap_or_default();
            return Ok((pos, candidates));
        }

        let current = last.to_lowercase();
        let start_pos = pos - last.len();

        if words.len() == 1 {
            let candidates = pairs(COMMANDS.iter().filter(|c| c.starts_with(&current)));
            return Ok((start_pos, candidates));
        }

        let prev = words[words.len() - 2].to_lowercase();
        let candidates = get_arguments(&prev)
            .map(|args| pairs(args.iter().filter(|a| a.starts_with(&current))))
            .unwrap_or_default();
        Ok((start_pos, candidates))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
