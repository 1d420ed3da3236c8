//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::{CentralityScores, DistanceMatrix, PathResult, ReachabilityMatrix, SpanningTree};
use crate::graph::{Graph, Vertex, INFINITY};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式 (\G)
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印行列结果
    pub fn print_rows(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        if columns.is_empty() || rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}\n{} row(s) in set\n", output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        let kind = if graph.is_directed() { "directed" } else { "undirected" };
        table.add_row(row!["Type", kind]);
        table.add_row(row!["Weighted", graph.is_weighted().to_string()]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.to_string()
    }

    /// 顶点列表
    pub fn print_vertices(&self, graph: &Graph) -> String {
        let columns = strings(&["ID", "Label", "X", "Y", "Out-degree"]);
        let rows: Vec<Vec<String>> = graph
            .vertices()
            .map(|v| {
                let (x, y) = v.position();
                vec![
                    v.id().to_string(),
                    v.label().to_string(),
                    x.to_string(),
                    y.to_string(),
                    v.out_degree().to_string(),
                ]
            })
            .collect();
        self.print_rows(&columns, &rows)
    }

    /// 顶点详情
    pub fn print_vertex(&self, vertex: &Vertex) -> String {
        let (x, y) = vertex.position();
        let mut out = format!(
            "顶点 {}:\n  标签: {}\n  坐标: ({}, {})\n  出边: {} 条\n",
            vertex.id(),
            vertex.label(),
            x,
            y,
            vertex.out_degree()
        );
        for edge in vertex.edges() {
            out.push_str(&format!("    {}\n", edge));
        }
        out
    }

    /// 可达性矩阵（0/1）
    pub fn print_reachability(&self, reach: &ReachabilityMatrix) -> String {
        let rows: Vec<Vec<String>> = reach
            .matrix
            .rows()
            .map(|r| r.iter().map(|&b| if b { "1" } else { "0" }.to_string()).collect())
            .collect();
        format!(
            "路径矩阵（可达性）:\n{}",
            self.format_square(reach.index.ids(), &rows)
        )
    }

    /// 距离矩阵，不可达显示 INF
    pub fn print_distances(&self, dist: &DistanceMatrix) -> String {
        let rows: Vec<Vec<String>> = dist
            .matrix
            .rows()
            .map(|r| {
                r.iter()
                    .map(|&d| {
                        if d >= INFINITY {
                            "INF".to_string()
                        } else {
                            d.to_string()
                        }
                    })
                    .collect()
            })
            .collect();
        format!(
            "Floyd-Warshall 距离矩阵:\n{}",
            self.format_square(dist.index.ids(), &rows)
        )
    }

    /// 行列都以顶点 ID 为标题的方阵
    fn format_square<T: ToString>(&self, ids: &[T], rows: &[Vec<String>]) -> String {
        if ids.is_empty() {
            return "Empty graph\n".to_string();
        }
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);

        let mut header = vec![Cell::new("")];
        header.extend(ids.iter().map(|id| Cell::new(&id.to_string())));
        table.set_titles(Row::new(header));

        for (id, row_data) in ids.iter().zip(rows) {
            let mut cells = vec![Cell::new(&format!("{}:", id.to_string()))];
            cells.extend(row_data.iter().map(|v| Cell::new(v)));
            table.add_row(Row::new(cells));
        }
        table.to_string()
    }

    /// 最短路径
    pub fn print_path(&self, path: &PathResult) -> String {
        let mut out = String::from("最短路径:\n");
        if path.edges.is_empty() {
            out.push_str(&format!("  {} (起点即终点)\n", path.vertices[0]));
        }
        for edge in &path.edges {
            out.push_str(&format!(
                "  {} -> {} ({})\n",
                edge.source(),
                edge.dest(),
                edge.weight()
            ));
        }
        out.push_str(&format!(
            "长度: {}，总权重: {}\n",
            path.length, path.total_weight
        ));
        out
    }

    /// 生成树
    pub fn print_tree(&self, tree: &SpanningTree) -> String {
        let mut out = String::from("最小生成树:\n");
        for edge in &tree.edges {
            out.push_str(&format!(
                "  {} - {} ({})\n",
                edge.source(),
                edge.dest(),
                edge.weight()
            ));
        }
        out.push_str(&format!(
            "总边数: {}，总权重: {}\n",
            tree.edges.len(),
            tree.total_weight
        ));
        if !tree.is_spanning() {
            out.push_str("图不连通，仅覆盖从起点可达的部分\n");
        }
        out
    }

    /// 接近中心性，按标签列出，保留 4 位小数
    pub fn print_centrality(&self, scores: &CentralityScores, graph: &Graph) -> String {
        let columns = strings(&["ID", "Label", "Closeness"]);
        let rows: Vec<Vec<String>> = scores
            .iter()
            .map(|(id, score)| {
                let label = graph.vertex(id).map(|v| v.label()).unwrap_or("");
                vec![id.to_string(), label.to_string(), format!("{:.4}", score)]
            })
            .collect();
        format!("接近中心性:\n{}", self.print_rows(&columns, &rows))
    }

    /// 帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   GraphLab CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                  显示帮助
  quit, exit, q               退出程序
  stats, info                 显示图统计信息
  new <directed|undirected> [weighted]
                              新建空图

编辑:
  vertices, ls                列出所有顶点
  vertex, v <ID>              查看顶点详情
  add-vertex, av <ID> <标签> [x y]
  add-edge, ae <起点> <终点> [权重]
  rm-vertex, rv <ID>          删除顶点及其所有关联边
  rm-edge, re <起点> <终点>   删除边（无向图同时删除镜像边）
  move <ID> <x> <y>           移动顶点
  rename <ID> <标签>          修改标签
  clear                       清空当前图

算法:
  matrix, reach               路径矩阵（传递闭包）
  path, dijkstra <起点> <终点>
                              Dijkstra 最短路径
  floyd, distances            Floyd-Warshall 距离矩阵
  mst                         Prim 最小生成树
  cycles                      环检测
  centrality                  接近中心性

文件:
  load <文件>                 读取图文件
  save [文件]                 保存图文件（省略时写回原文件）

提示: 在 vertices / centrality 末尾加 \G 可垂直显示结果

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 检查命令是否以 \G 结尾（垂直显示）
pub fn check_vertical_display(input: &str) -> (String, bool) {
    let trimmed = input.trim();
    if trimmed.ends_with("\\G") || trimmed.ends_with("\\g") {
        let clean = trimmed[..trimmed.len() - 2].trim().to_string();
        (clean, true)
    } else {
        (trimmed.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::PathFinder;
    use crate::graph::VertexId;

    fn sample() -> Graph {
        let mut graph = Graph::new(true, true);
        graph.add_vertex(VertexId::new(1), "A", 0, 0).unwrap();
        graph.add_vertex(VertexId::new(2), "B", 0, 0).unwrap();
        graph.add_edge(VertexId::new(1), VertexId::new(2), 3).unwrap();
        graph
    }

    #[test]
    fn test_check_vertical_display() {
        assert_eq!(check_vertical_display("vertices\\G"), ("vertices".to_string(), true));
        assert_eq!(check_vertical_display(" stats "), ("stats".to_string(), false));
    }

    #[test]
    fn test_print_rows_empty() {
        let printer = Printer::default();
        assert_eq!(printer.print_rows(&[], &[]), "Empty set\n");
    }

    #[test]
    fn test_print_distances_marks_infinity() {
        let graph = sample();
        let dist = PathFinder::new(&graph).all_pairs();
        let out = Printer::default().print_distances(&dist);

        assert!(out.contains("INF"));
        assert!(out.contains('3'));
    }

    #[test]
    fn test_print_reachability_uses_bits() {
        let graph = sample();
        let reach = PathFinder::new(&graph).reachability();
        let out = Printer::default().print_reachability(&reach);

        assert!(out.contains("1:"));
        assert!(out.contains('0'));
        assert!(!out.contains("true"));
    }

    #[test]
    fn test_vertical_mode() {
        let graph = sample();
        let printer = Printer::new(PrintMode::Vertical);
        let out = printer.print_vertices(&graph);

        assert!(out.contains("1. row"));
        assert!(out.contains("Label: A"));
        assert!(out.contains("2 row(s) in set"));
    }
}
