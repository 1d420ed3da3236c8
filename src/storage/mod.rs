//! 图文件读写
//!
//! 文本格式：
//!
//! ```text
//! TYPE:DIRECTED|UNDIRECTED
//! WEIGHTED:TRUE|FALSE
//! NODES
//! <id>,<label>,<x>,<y>
//! EDGES
//! <src>,<dst>,<weight>
//! ```
//!
//! 保存时按存储顺序写出全部顶点和全部边（无向图的镜像边也会写出）；
//! 读取时按文件顺序重放 `add_vertex` / `add_edge`，重复的边由
//! `add_edge` 的重复检查拒绝，因此无向图往返不会重复计数。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId, Weight};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const TYPE_PREFIX: &str = "TYPE:";
const WEIGHTED_PREFIX: &str = "WEIGHTED:";
const NODES_SECTION: &str = "NODES";
const EDGES_SECTION: &str = "EDGES";

/// 读取统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// 成功添加的顶点数
    pub vertices_loaded: usize,
    /// 成功添加的边数（无向图的镜像行计入 `rejected`）
    pub edges_loaded: usize,
    /// 被图拒绝的行（重复顶点、重复边、端点不存在）
    pub rejected: usize,
    /// 无法解析而跳过的行
    pub malformed: usize,
}

/// 读取结果
#[derive(Debug)]
pub struct Loaded {
    pub graph: Graph,
    pub report: LoadReport,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Preamble,
    Nodes,
    Edges,
}

/// 将图渲染为文本
pub fn render(graph: &Graph) -> String {
    let mut out = String::new();
    let kind = if graph.is_directed() {
        "DIRECTED"
    } else {
        "UNDIRECTED"
    };
    let weighted = if graph.is_weighted() { "TRUE" } else { "FALSE" };

    // 写入 String 不会失败
    let _ = writeln!(out, "{}{}", TYPE_PREFIX, kind);
    let _ = writeln!(out, "{}{}", WEIGHTED_PREFIX, weighted);

    let _ = writeln!(out, "{}", NODES_SECTION);
    for vertex in graph.vertices() {
        let (x, y) = vertex.position();
        let label = vertex.label().replace(['\n', '\r'], " ");
        let _ = writeln!(out, "{},{},{},{}", vertex.id(), label, x, y);
    }

    let _ = writeln!(out, "{}", EDGES_SECTION);
    for edge in graph.edges() {
        let _ = writeln!(out, "{},{},{}", edge.source(), edge.dest(), edge.weight());
    }

    out
}

/// 保存到文件
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render(graph))?;
    info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph saved"
    );
    Ok(())
}

/// 从文件读取
pub fn load<P: AsRef<Path>>(path: P) -> Result<Loaded> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let loaded = parse(&text)?;
    info!(
        path = %path.display(),
        vertices = loaded.report.vertices_loaded,
        edges = loaded.report.edges_loaded,
        rejected = loaded.report.rejected,
        malformed = loaded.report.malformed,
        "graph loaded"
    );
    Ok(loaded)
}

/// 从文本解析
pub fn parse(text: &str) -> Result<Loaded> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r')).enumerate();

    let directed = match header_value(lines.next(), TYPE_PREFIX, 1)? {
        "DIRECTED" => true,
        "UNDIRECTED" => false,
        other => return Err(Error::parse(1, format!("未知的图类型: {}", other))),
    };
    let weighted = match header_value(lines.next(), WEIGHTED_PREFIX, 2)? {
        "TRUE" => true,
        "FALSE" => false,
        other => return Err(Error::parse(2, format!("未知的权重标记: {}", other))),
    };

    let mut graph = Graph::new(directed, weighted);
    let mut report = LoadReport::default();
    let mut section = Section::Preamble;

    for (i, line) in lines {
        let line_no = i + 1;
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            NODES_SECTION => {
                section = Section::Nodes;
                continue;
            }
            EDGES_SECTION => {
                section = Section::Edges;
                continue;
            }
            _ => {}
        }

        match section {
            Section::Nodes => match parse_node(trimmed) {
                Some((id, label, x, y)) => match graph.add_vertex(id, label, x, y) {
                    Ok(_) => report.vertices_loaded += 1,
                    Err(_) => report.rejected += 1,
                },
                None => {
                    warn!(line = line_no, content = trimmed, "skipping malformed node line");
                    report.malformed += 1;
                }
            },
            Section::Edges => match parse_edge(trimmed) {
                Some((src, dst, weight)) => match graph.add_edge(src, dst, weight) {
                    Ok(()) => report.edges_loaded += 1,
                    Err(_) => report.rejected += 1,
                },
                None => {
                    warn!(line = line_no, content = trimmed, "skipping malformed edge line");
                    report.malformed += 1;
                }
            },
            Section::Preamble => {
                warn!(line = line_no, content = trimmed, "skipping line outside any section");
                report.malformed += 1;
            }
        }
    }

    Ok(Loaded { graph, report })
}

fn header_value<'a>(
    line: Option<(usize, &'a str)>,
    prefix: &str,
    line_no: usize,
) -> Result<&'a str> {
    let (_, line) = line.ok_or_else(|| Error::parse(line_no, format!("缺少 {} 行", prefix)))?;
    line.trim()
        .strip_prefix(prefix)
        .map(str::trim)
        .ok_or_else(|| Error::parse(line_no, format!("期望 {}，实际为: {}", prefix, line)))
}

/// `<id>,<label>,<x>,<y>`，标签中允许出现逗号
fn parse_node(line: &str) -> Option<(VertexId, String, i32, i32)> {
    let (id, rest) = line.split_once(',')?;
    let mut tail = rest.rsplitn(3, ',');
    let y = tail.next()?.trim().parse().ok()?;
    let x = tail.next()?.trim().parse().ok()?;
    let label = tail.next()?.to_string();
    let id = id.trim().parse().ok()?;
    Some((VertexId::new(id), label, x, y))
}

/// `<src>,<dst>,<weight>`
fn parse_edge(line: &str) -> Option<(VertexId, VertexId, Weight)> {
    let mut parts = line.split(',').map(str::trim);
    let src = parts.next()?.parse().ok()?;
    let dst = parts.next()?.parse().ok()?;
    let weight = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((VertexId::new(src), VertexId::new(dst), weight))
}
