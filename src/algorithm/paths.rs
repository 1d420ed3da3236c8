//! 路径算法
//!
//! 可达性闭包（Warshall）、单源最短路径（Dijkstra）、
//! 全源最短路径（Floyd–Warshall）

use super::matrix::Matrix;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, VertexId, VertexIndex, Weight, INFINITY};
use serde::Serialize;
use tracing::debug;

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// 路径上的顶点序列（起点到终点）
    pub vertices: Vec<VertexId>,
    /// 路径上的边序列
    pub edges: Vec<Edge>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总权重
    pub total_weight: Weight,
}

impl PathResult {
    fn with_start(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
            length: 0,
            total_weight: 0,
        }
    }

    fn from_edges(start: VertexId, edges: Vec<Edge>) -> Self {
        let mut vertices = Vec::with_capacity(edges.len() + 1);
        vertices.push(start);
        vertices.extend(edges.iter().map(Edge::dest));
        Self {
            vertices,
            length: edges.len(),
            total_weight: edges.iter().map(Edge::weight).sum(),
            edges,
        }
    }
}

/// 可达性矩阵
///
/// `matrix[(i, j)]` 表示是否存在从下标 i 到下标 j 的有向路径
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachabilityMatrix {
    pub index: VertexIndex,
    pub matrix: Matrix<bool>,
}

impl ReachabilityMatrix {
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// 是否存在 `src` 到 `dst` 的路径，未知顶点返回 false
    pub fn is_reachable(&self, src: VertexId, dst: VertexId) -> bool {
        match (self.index.index_of(src), self.index.index_of(dst)) {
            (Some(i), Some(j)) => self.matrix[(i, j)],
            _ => false,
        }
    }
}

/// 距离矩阵
///
/// 不可达的单元格保存 [`INFINITY`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    pub index: VertexIndex,
    pub matrix: Matrix<Weight>,
}

impl DistanceMatrix {
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// 按下标读取原始值（可能是哨兵值）
    pub fn raw(&self, i: usize, j: usize) -> Weight {
        self.matrix[(i, j)]
    }

    /// `src` 到 `dst` 的最短距离，不可达或顶点未知返回 None
    pub fn distance(&self, src: VertexId, dst: VertexId) -> Option<Weight> {
        let i = self.index.index_of(src)?;
        let j = self.index.index_of(dst)?;
        let d = self.matrix[(i, j)];
        (d != INFINITY).then_some(d)
    }
}

/// Warshall 传递闭包，原地更新
pub fn transitive_closure(matrix: &mut Matrix<bool>) {
    let n = matrix.size();
    for k in 0..n {
        for i in 0..n {
            if !matrix[(i, k)] {
                continue;
            }
            for j in 0..n {
                if matrix[(k, j)] {
                    matrix[(i, j)] = true;
                }
            }
        }
    }
}

/// 路径查找器
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 可达性矩阵
    ///
    /// 以直接边初始化，再做传递闭包；不强制自反
    pub fn reachability(&self) -> ReachabilityMatrix {
        let index = self.graph.index();
        let mut matrix = Matrix::filled(index.len(), false);
        debug!(vertices = index.len(), "computing reachability closure");

        for (i, vertex) in self.graph.vertices().enumerate() {
            for edge in vertex.edges() {
                if let Some(j) = index.index_of(edge.dest()) {
                    matrix[(i, j)] = true;
                }
            }
        }

        transitive_closure(&mut matrix);
        ReachabilityMatrix { index, matrix }
    }

    /// Dijkstra 最短路径
    ///
    /// 起点或终点不存在时返回 `Error::VertexNotFound`；
    /// 两点都存在但不可达时返回 `Ok(None)`。
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> Result<Option<PathResult>> {
        let index = self.graph.index();
        let s = index.index_of(start).ok_or(Error::VertexNotFound(start))?;
        let e = index.index_of(end).ok_or(Error::VertexNotFound(end))?;
        let n = index.len();
        debug!(vertices = n, %start, %end, "running dijkstra");

        let mut dist = vec![INFINITY; n];
        let mut pred: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        dist[s] = 0;

        for _ in 0..n {
            // 线性扫描取最小距离，距离相同时取下标最小者
            let mut u = None;
            let mut min = INFINITY;
            for j in 0..n {
                if !visited[j] && dist[j] < min {
                    min = dist[j];
                    u = Some(j);
                }
            }

            let Some(u) = u else { break };
            visited[u] = true;
            if u == e {
                break;
            }

            let Some(vertex) = index.id_at(u).and_then(|id| self.graph.vertex(id)) else {
                continue;
            };
            for edge in vertex.edges() {
                let Some(v) = index.index_of(edge.dest()) else {
                    continue;
                };
                let candidate = dist[u].saturating_add(edge.weight());
                if !visited[v] && candidate < dist[v] {
                    dist[v] = candidate;
                    pred[v] = Some(u);
                }
            }
        }

        if dist[e] == INFINITY {
            debug!(%start, %end, "no path");
            return Ok(None);
        }
        if s == e {
            return Ok(Some(PathResult::with_start(start)));
        }

        let edges = self.reconstruct_path(&index, &dist, &pred, s, e);
        Ok(Some(PathResult::from_edges(start, edges)))
    }

    /// 从终点沿前驱回溯重构路径
    ///
    /// 每一步取前驱邻接表中第一条满足 `dist[prev] + w == dist[cur]` 的边
    fn reconstruct_path(
        &self,
        index: &VertexIndex,
        dist: &[Weight],
        pred: &[Option<usize>],
        start: usize,
        end: usize,
    ) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut current = end;

        while current != start {
            let Some(prev) = pred[current] else { break };
            let (Some(prev_id), Some(cur_id)) = (index.id_at(prev), index.id_at(current)) else {
                break;
            };
            let found = self.graph.vertex(prev_id).and_then(|v| {
                v.edges().iter().find(|e| {
                    e.dest() == cur_id && dist[prev].saturating_add(e.weight()) == dist[current]
                })
            });
            if let Some(edge) = found {
                edges.push(*edge);
            }
            current = prev;
        }

        edges.reverse();
        edges
    }

    /// Floyd–Warshall 全源最短路径
    pub fn all_pairs(&self) -> DistanceMatrix {
        let index = self.graph.index();
        let n = index.len();
        debug!(vertices = n, "running floyd-warshall");

        let mut dist = Matrix::filled(n, INFINITY);
        for i in 0..n {
            dist[(i, i)] = 0;
        }

        for (i, vertex) in self.graph.vertices().enumerate() {
            for edge in vertex.edges() {
                if let Some(j) = index.index_of(edge.dest()) {
                    if edge.weight() < dist[(i, j)] {
                        dist[(i, j)] = edge.weight();
                    }
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                let ik = dist[(i, k)];
                if ik == INFINITY {
                    continue;
                }
                for j in 0..n {
                    let kj = dist[(k, j)];
                    if kj == INFINITY {
                        continue;
                    }
                    let through = ik.saturating_add(kj);
                    if through < dist[(i, j)] {
                        dist[(i, j)] = through;
                    }
                }
            }
        }

        DistanceMatrix {
            index,
            matrix: dist,
        }
    }
}
