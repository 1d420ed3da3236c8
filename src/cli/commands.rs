//! 交互命令处理
//!
//! 解析一行输入并在当前会话的图上执行

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::printer::{check_vertical_display, PrintMode, Printer};
use crate::algorithm::{Closeness, CycleDetector, PathFinder, Prim};
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId, Weight, DEFAULT_WEIGHT};
use crate::storage;

/// 支持 \G 垂直显示的命令
const VERTICAL_COMMANDS: &[&str] = &["vertices", "ls", "centrality"];

/// 命令执行结果
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 会话状态
pub struct Session {
    /// 当前编辑的图
    graph: Graph,
    /// 最近一次读取或保存的文件
    path: Option<PathBuf>,
    printer: Printer,
    /// 算法结果以 JSON 输出
    json: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Graph::default())
    }
}

impl Session {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            path: None,
            printer: Printer::default(),
            json: false,
        }
    }

    /// 从文件打开会话
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, storage::LoadReport)> {
        let path = path.into();
        let loaded = storage::load(&path)?;
        let mut session = Self::new(loaded.graph);
        session.path = Some(path);
        Ok((session, loaded.report))
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// 解析并执行一行命令
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let (line, vertical) = check_vertical_display(input);
        if line.is_empty() {
            return CommandResult::Continue;
        }

        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();
        debug!(command = %cmd, args = args.len(), vertical, "executing command");

        if vertical && !VERTICAL_COMMANDS.contains(&cmd.as_str()) {
            return CommandResult::Error(format!(
                "\\G 仅支持 vertices / centrality，不支持 {}",
                cmd
            ));
        }
        self.printer.set_mode(if vertical {
            PrintMode::Vertical
        } else {
            PrintMode::Table
        });

        match cmd.as_str() {
            "help" | "h" | "?" => CommandResult::Message(Printer::print_help()),
            "quit" | "exit" | "q" => CommandResult::Exit,
            _ => match self.dispatch(&cmd, &args, &line) {
                Ok(message) => CommandResult::Message(message),
                Err(e) => CommandResult::Error(e.to_string()),
            },
        }
    }

    fn dispatch(&mut self, cmd: &str, args: &[&str], line: &str) -> Result<String> {
        match cmd {
            "stats" | "info" => Ok(self.printer.print_stats(&self.graph)),
            "new" => self.new_graph(args),
            "clear" => {
                self.graph.clear();
                Ok("图已清空".to_string())
            }

            "vertices" | "ls" => Ok(self.printer.print_vertices(&self.graph)),
            "vertex" | "v" => {
                let id = vertex_arg(args, 0, "vertex <ID>")?;
                let vertex = self.graph.vertex(id).ok_or(Error::VertexNotFound(id))?;
                Ok(self.printer.print_vertex(vertex))
            }
            "add-vertex" | "av" => self.add_vertex(args, line),
            "add-edge" | "ae" => {
                let usage = "add-edge <起点> <终点> [权重]";
                let src = vertex_arg(args, 0, usage)?;
                let dst = vertex_arg(args, 1, usage)?;
                let weight: Weight = match args.get(2) {
                    Some(w) => parse_number(w, usage)?,
                    None => DEFAULT_WEIGHT,
                };
                self.graph.add_edge(src, dst, weight)?;
                Ok(format!("已添加边 {} -> {} ({})", src, dst, weight))
            }
            "rm-vertex" | "rv" => {
                let id = vertex_arg(args, 0, "rm-vertex <ID>")?;
                let removed = self.graph.remove_vertex(id)?;
                Ok(format!("已删除顶点 {} ({})", id, removed.label()))
            }
            "rm-edge" | "re" => {
                let usage = "rm-edge <起点> <终点>";
                let src = vertex_arg(args, 0, usage)?;
                let dst = vertex_arg(args, 1, usage)?;
                self.graph.remove_edge(src, dst)?;
                Ok(format!("已删除边 {} -> {}", src, dst))
            }
            "move" => {
                let usage = "move <ID> <x> <y>";
                let id = vertex_arg(args, 0, usage)?;
                let x = parse_number(arg(args, 1, usage)?, usage)?;
                let y = parse_number(arg(args, 2, usage)?, usage)?;
                let vertex = self
                    .graph
                    .vertex_mut(id)
                    .ok_or(Error::VertexNotFound(id))?;
                vertex.set_position(x, y);
                Ok(format!("顶点 {} 已移动到 ({}, {})", id, x, y))
            }
            "rename" => {
                let usage = "rename <ID> <标签>";
                let id = vertex_arg(args, 0, usage)?;
                let label = rest_after(line, 2).ok_or_else(|| usage_error(usage))?;
                let vertex = self
                    .graph
                    .vertex_mut(id)
                    .ok_or(Error::VertexNotFound(id))?;
                vertex.set_label(label);
                Ok(format!("顶点 {} 标签已修改为 {}", id, label))
            }

            "matrix" | "reach" => {
                let reach = PathFinder::new(&self.graph).reachability();
                self.render(&reach, |p| p.print_reachability(&reach))
            }
            "path" | "dijkstra" => {
                let usage = "path <起点> <终点>";
                let src = vertex_arg(args, 0, usage)?;
                let dst = vertex_arg(args, 1, usage)?;
                match PathFinder::new(&self.graph).shortest_path(src, dst)? {
                    Some(path) => self.render(&path, |p| p.print_path(&path)),
                    None => Ok(format!("{} 到 {} 不可达", src, dst)),
                }
            }
            "floyd" | "distances" => {
                let dist = PathFinder::new(&self.graph).all_pairs();
                self.render(&dist, |p| p.print_distances(&dist))
            }
            "mst" => {
                let tree = Prim::new(&self.graph).run();
                self.render(&tree, |p| p.print_tree(&tree))
            }
            "cycles" => {
                let found = CycleDetector::new(&self.graph).has_cycles();
                if self.json {
                    return Ok(serde_json::to_string_pretty(&serde_json::json!({
                        "has_cycles": found
                    }))?);
                }
                Ok(if found {
                    "图中存在环".to_string()
                } else {
                    "图中不存在环".to_string()
                })
            }
            "centrality" => {
                let scores = Closeness::new(&self.graph).compute();
                self.render(&scores, |p| p.print_centrality(&scores, &self.graph))
            }

            "load" => {
                let path = rest_after(line, 1).ok_or_else(|| usage_error("load <文件>"))?;
                let path = PathBuf::from(path);
                let loaded = storage::load(&path)?;
                self.graph = loaded.graph;
                self.path = Some(path.clone());
                let report = loaded.report;
                Ok(format!(
                    "已读取 {}: {} 个顶点, {} 条边, {} 行被拒绝, {} 行格式错误",
                    path.display(),
                    report.vertices_loaded,
                    report.edges_loaded,
                    report.rejected,
                    report.malformed
                ))
            }
            "save" => {
                let path = match rest_after(line, 1) {
                    Some(p) => PathBuf::from(p),
                    None => self
                        .path
                        .clone()
                        .ok_or_else(|| usage_error("save <文件>"))?,
                };
                storage::save(&self.graph, &path)?;
                self.path = Some(path.clone());
                Ok(format!("已保存到 {}", path.display()))
            }

            _ => Err(Error::CommandError(format!(
                "未知命令: {}，输入 help 查看帮助",
                cmd
            ))),
        }
    }

    fn new_graph(&mut self, args: &[&str]) -> Result<String> {
        let usage = "new <directed|undirected> [weighted]";
        let directed = match arg(args, 0, usage)?.to_lowercase().as_str() {
            "directed" => true,
            "undirected" => false,
            _ => return Err(usage_error(usage)),
        };
        let weighted = match args.get(1).map(|s| s.to_lowercase()) {
            None => false,
            Some(w) if w == "weighted" => true,
            Some(_) => return Err(usage_error(usage)),
        };
        self.graph = Graph::new(directed, weighted);
        self.path = None;
        Ok(format!(
            "已新建{}{}图",
            if weighted { "带权" } else { "" },
            if directed { "有向" } else { "无向" }
        ))
    }

    /// `add-vertex <ID> <标签> [x y]`，标签可以包含空格
    fn add_vertex(&mut self, args: &[&str], line: &str) -> Result<String> {
        let usage = "add-vertex <ID> <标签> [x y]";
        let id = vertex_arg(args, 0, usage)?;
        let rest = rest_after(line, 2).ok_or_else(|| usage_error(usage))?;

        let (label, x, y) = match split_position(rest) {
            Some((label, x, y)) => (label, x, y),
            None => (rest, 0, 0),
        };
        self.graph.add_vertex(id, label, x, y)?;
        Ok(format!("已添加顶点 {} ({}) @ ({}, {})", id, label, x, y))
    }

    /// 按输出模式渲染结果
    fn render<T: Serialize>(&self, value: &T, table: impl FnOnce(&Printer) -> String) -> Result<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(table(&self.printer))
        }
    }
}

fn usage_error(usage: &str) -> Error {
    Error::CommandError(format!("用法: {}", usage))
}

fn arg<'a>(args: &[&'a str], i: usize, usage: &str) -> Result<&'a str> {
    args.get(i).copied().ok_or_else(|| usage_error(usage))
}

fn parse_number<T: std::str::FromStr>(s: &str, usage: &str) -> Result<T> {
    s.parse()
        .map_err(|_| Error::CommandError(format!("无效的数字: {}（用法: {}）", s, usage)))
}

fn vertex_arg(args: &[&str], i: usize, usage: &str) -> Result<VertexId> {
    parse_number::<i64>(arg(args, i, usage)?, usage).map(VertexId::new)
}

/// 跳过前 `skip` 个单词后的剩余文本
fn rest_after(line: &str, skip: usize) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 0..skip {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    let rest = rest.trim_end();
    (!rest.is_empty()).then_some(rest)
}

/// 末尾两个单词是整数时视为坐标
fn split_position(text: &str) -> Option<(&str, i32, i32)> {
    let (head, y) = text.rsplit_once(char::is_whitespace)?;
    let (label, x) = head.trim_end().rsplit_once(char::is_whitespace)?;
    let x = x.parse().ok()?;
    let y = y.parse().ok()?;
    let label = label.trim_end();
    (!label.is_empty()).then_some((label, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> VertexId {
        VertexId::new(n)
    }

    fn run(session: &mut Session, script: &[&str]) -> Vec<CommandResult> {
        script.iter().map(|line| session.execute(line)).collect()
    }

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(m) => m,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_commands() {
        let mut session = Session::default();
        assert_eq!(session.execute("   "), CommandResult::Continue);
        assert_eq!(session.execute("quit"), CommandResult::Exit);
        assert!(matches!(session.execute("help"), CommandResult::Message(_)));
        assert!(matches!(session.execute("frobnicate"), CommandResult::Error(_)));
    }

    #[test]
    fn test_scripted_editing() {
        let mut session = Session::default();
        let results = run(
            &mut session,
            &[
                "new directed weighted",
                "add-vertex 1 Source 10 20",
                "add-vertex 2 New York",
                "add-vertex 3 C",
                "add-edge 1 2 10",
                "add-edge 2 3 5",
                "add-edge 1 3 20",
            ],
        );
        assert!(results.iter().all(|r| matches!(r, CommandResult::Message(_))));

        let graph = session.graph();
        assert!(graph.is_directed());
        assert!(graph.is_weighted());
        assert_eq!(graph.vertex(id(1)).unwrap().position(), (10, 20));
        assert_eq!(graph.vertex(id(2)).unwrap().label(), "New York");
        assert_eq!(graph.edge_count(), 3);

        let path = message(session.execute("path 1 3"));
        assert!(path.contains("1 -> 2 (10)"));
        assert!(path.contains("2 -> 3 (5)"));
        assert!(path.contains("15"));

        assert_eq!(message(session.execute("cycles")), "图中不存在环");
        session.execute("add-edge 3 1 1");
        assert_eq!(message(session.execute("cycles")), "图中存在环");
    }

    #[test]
    fn test_errors_are_reported() {
        let mut session = Session::default();
        session.execute("add-vertex 1 A");

        let CommandResult::Error(e) = session.execute("add-vertex 1 B") else {
            panic!("duplicate vertex accepted");
        };
        assert!(e.contains("顶点已存在"));

        assert!(matches!(session.execute("add-edge 1 9"), CommandResult::Error(_)));
        assert!(matches!(session.execute("add-edge x 1"), CommandResult::Error(_)));
        assert!(matches!(session.execute("path 1 9"), CommandResult::Error(_)));
        assert!(matches!(session.execute("rm-edge 1 1"), CommandResult::Error(_)));
        assert!(matches!(session.execute("new sideways"), CommandResult::Error(_)));
        assert!(matches!(session.execute("save"), CommandResult::Error(_)));
    }

    #[test]
    fn test_add_vertex_label_excludes_id() {
        let mut session = Session::default();
        run(&mut session, &["add-vertex 7 A", "add-vertex 8 Lima, Peru 3 -4"]);

        assert_eq!(session.graph().vertex(id(7)).unwrap().label(), "A");
        let v = session.graph().vertex(id(8)).unwrap();
        assert_eq!(v.label(), "Lima, Peru");
        assert_eq!(v.position(), (3, -4));
        assert!(matches!(session.execute("add-vertex 9"), CommandResult::Error(_)));
    }

    #[test]
    fn test_vertical_display_only_for_row_reports() {
        let mut session = Session::default();
        run(&mut session, &["add-vertex 1 A", "add-vertex 2 B", "add-edge 1 2 4"]);

        assert!(message(session.execute("vertices\\G")).contains("1. row"));
        assert!(message(session.execute("centrality\\G")).contains("1. row"));
        assert!(matches!(session.execute("mst\\G"), CommandResult::Error(_)));
        assert!(matches!(session.execute("floyd\\G"), CommandResult::Error(_)));
        // 普通命令恢复表格模式
        assert!(!message(session.execute("vertices")).contains("1. row"));
    }

    #[test]
    fn test_unreachable_path_is_a_message() {
        let mut session = Session::default();
        run(&mut session, &["new directed", "add-vertex 1 A", "add-vertex 2 B"]);
        assert!(message(session.execute("path 1 2")).contains("不可达"));
    }

    #[test]
    fn test_move_rename_and_remove() {
        let mut session = Session::default();
        run(
            &mut session,
            &[
                "add-vertex 1 A",
                "add-vertex 2 B",
                "add-edge 1 2",
                "move 1 -3 4",
                "rename 2 Big City",
            ],
        );
        assert_eq!(session.graph().vertex(id(1)).unwrap().position(), (-3, 4));
        assert_eq!(session.graph().vertex(id(2)).unwrap().label(), "Big City");

        session.execute("rm-vertex 2");
        assert_eq!(session.graph().vertex_count(), 1);
        assert_eq!(session.graph().edge_count(), 0);

        session.execute("clear");
        assert!(session.graph().is_empty());
    }

    #[test]
    fn test_json_output() {
        let mut session = Session::default().with_json(true);
        run(&mut session, &["add-vertex 1 A", "add-vertex 2 B", "add-edge 1 2 4"]);

        let value: serde_json::Value =
            serde_json::from_str(&message(session.execute("mst"))).unwrap();
        assert_eq!(value["total_weight"], 4);

        let value: serde_json::Value =
            serde_json::from_str(&message(session.execute("cycles"))).unwrap();
        assert_eq!(value["has_cycles"], false);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("g.txt");
        let file = file.to_str().unwrap();

        let mut session = Session::default();
        run(&mut session, &["add-vertex 1 A", "add-vertex 2 B", "add-edge 1 2 3"]);
        assert!(matches!(
            session.execute(&format!("save {}", file)),
            CommandResult::Message(_)
        ));
        // 之后的 save 写回同一文件
        assert!(matches!(session.execute("save"), CommandResult::Message(_)));

        let mut other = Session::default();
        let loaded = message(other.execute(&format!("load {}", file)));
        assert!(loaded.contains("2 个顶点"));
        assert_eq!(other.graph().edge(id(2), id(1)).unwrap().weight(), 3);
        assert_eq!(other.path().unwrap().to_str(), Some(file));

        let (opened, report) = Session::open(file).unwrap();
        assert_eq!(opened.graph().vertex_count(), 2);
        assert_eq!(report.edges_loaded, 1);
    }

    #[test]
    fn test_rest_after_and_split_position() {
        assert_eq!(rest_after("rename  7  Two Words ", 2), Some("Two Words"));
        assert_eq!(rest_after("save", 1), None);
        assert_eq!(split_position("Lab 3 4"), Some(("Lab", 3, 4)));
        assert_eq!(split_position("New York"), None);
        assert_eq!(split_position("3 4"), None);
    }
}
