//! 最小生成树（Prim）

use crate::graph::{Edge, Graph, Weight};
use serde::Serialize;
use tracing::debug;

/// 生成树结果
///
/// 图不连通时只包含从起点可达部分的边，`is_spanning()` 为 false
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree {
    /// 按选中顺序排列的树边
    pub edges: Vec<Edge>,
    /// 树边总权重
    pub total_weight: Weight,
    /// 运行时图中的顶点数
    pub vertex_count: usize,
}

impl SpanningTree {
    /// 是否覆盖了全部顶点（边数为 V-1）
    pub fn is_spanning(&self) -> bool {
        self.edges.len() + 1 >= self.vertex_count
    }
}

/// Prim 算法
///
/// 从遍历顺序中的第一个顶点出发，每轮扫描所有已访问顶点的出边，
/// 取指向未访问顶点的全局最小权重边（权重相同取先扫描到的）。
/// 有向图不做特殊处理：沿出边生长，得到的是以首个顶点为根的贪心树。
pub struct Prim<'g> {
    graph: &'g Graph,
}

impl<'g> Prim<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 计算最小生成树
    pub fn run(&self) -> SpanningTree {
        let index = self.graph.index();
        let n = index.len();
        debug!(vertices = n, "running prim");

        let mut tree = SpanningTree {
            edges: Vec::new(),
            total_weight: 0,
            vertex_count: n,
        };
        if n == 0 {
            return tree;
        }

        let mut visited = vec![false; n];
        visited[0] = true;

        while tree.edges.len() < n - 1 {
            let mut best: Option<(&Edge, usize)> = None;

            for (u, vertex) in self.graph.vertices().enumerate() {
                if !visited[u] {
                    continue;
                }
                for edge in vertex.edges() {
                    let Some(v) = index.index_of(edge.dest()) else {
                        continue;
                    };
                    if visited[v] {
                        continue;
                    }
                    if best.map_or(true, |(b, _)| edge.weight() < b.weight()) {
                        best = Some((edge, v));
                    }
                }
            }

            // 没有可扩展的边：图不连通
            let Some((edge, v)) = best else { break };
            visited[v] = true;
            tree.total_weight += edge.weight();
            tree.edges.push(*edge);
        }

        debug!(
            edges = tree.edges.len(),
            spanning = tree.is_spanning(),
            "prim finished"
        );
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

    fn id(n: i64) -> VertexId {
        VertexId::new(n)
    }

    fn build(directed: bool, vertices: &[i64], edges: &[(i64, i64, Weight)]) -> Graph {
        let mut graph = Graph::new(directed, true);
        for &v in vertices {
            graph.add_vertex(id(v), v.to_string(), 0, 0).unwrap();
        }
        for &(a, b, w) in edges {
            graph.add_edge(id(a), id(b), w).unwrap();
        }
        graph
    }

    #[test]
    fn test_mst_undirected() {
        // 正方形加一条对角线
        let graph = build(
            false,
            &[1, 2, 3, 4],
            &[(1, 2, 1), (2, 3, 2), (3, 4, 1), (4, 1, 5), (1, 3, 3)],
        );
        let tree = Prim::new(&graph).run();

        assert_eq!(tree.edges.len(), 3);
        assert_eq!(tree.total_weight, 4);
        assert!(tree.is_spanning());
        let picked: Vec<(i64, i64)> = tree
            .edges
            .iter()
            .map(|e| (e.source().as_i64(), e.dest().as_i64()))
            .collect();
        assert_eq!(picked, vec![(1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_mst_starts_from_first_inserted_vertex() {
        let graph = build(false, &[9, 3], &[(3, 9, 4)]);
        let tree = Prim::new(&graph).run();

        assert_eq!(tree.edges.len(), 1);
        assert_eq!(tree.edges[0].source(), id(9));
        assert_eq!(tree.edges[0].dest(), id(3));
    }

    #[test]
    fn test_mst_tie_keeps_first_scanned() {
        let graph = build(false, &[1, 2, 3], &[(1, 3, 2), (1, 2, 2)]);
        let tree = Prim::new(&graph).run();

        assert_eq!(tree.edges[0].dest(), id(3));
        assert_eq!(tree.total_weight, 4);
    }

    #[test]
    fn test_mst_disconnected_is_partial() {
        let graph = build(false, &[1, 2, 3, 4], &[(1, 2, 1), (3, 4, 1)]);
        let tree = Prim::new(&graph).run();

        assert_eq!(tree.edges.len(), 1);
        assert!(!tree.is_spanning());
    }

    #[test]
    fn test_mst_directed_follows_outgoing_edges() {
        // 1 无法通过出边到达 3
        let graph = build(true, &[1, 2, 3], &[(1, 2, 1), (3, 2, 1)]);
        let tree = Prim::new(&graph).run();
        assert_eq!(tree.edges.len(), 1);

        let graph = build(true, &[1, 2, 3], &[(1, 2, 4), (1, 3, 1), (3, 2, 1)]);
        let tree = Prim::new(&graph).run();
        assert_eq!(tree.total_weight, 2);
        assert!(tree.is_spanning());
    }

    #[test]
    fn test_mst_trivial_graphs() {
        let empty = Graph::undirected();
        let tree = Prim::new(&empty).run();
        assert!(tree.edges.is_empty());
        assert!(tree.is_spanning());

        let single = build(false, &[1], &[]);
        let tree = Prim::new(&single).run();
        assert!(tree.edges.is_empty());
        assert!(tree.is_spanning());
    }
}
