//! 接近中心性
//!
//! 基于全源最短路径结果计算

use super::paths::PathFinder;
use crate::graph::{Graph, VertexId, VertexIndex, INFINITY};
use serde::Serialize;
use tracing::debug;

/// 中心性得分，与 `index` 的下标一一对应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityScores {
    pub index: VertexIndex,
    pub scores: Vec<f64>,
}

impl CentralityScores {
    /// 顶点的得分
    pub fn score(&self, id: VertexId) -> Option<f64> {
        self.index.index_of(id).map(|i| self.scores[i])
    }

    /// 遍历 (顶点 ID, 得分)
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.index
            .ids()
            .iter()
            .copied()
            .zip(self.scores.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// 接近中心性
///
/// 得分 = 可达顶点数 / 到这些顶点的距离之和；
/// 距离和不为正（孤立顶点等）时得分为 0
pub struct Closeness<'g> {
    graph: &'g Graph,
}

impl<'g> Closeness<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn compute(&self) -> CentralityScores {
        let distances = PathFinder::new(self.graph).all_pairs();
        let n = distances.size();
        debug!(vertices = n, "computing closeness centrality");

        let scores = (0..n)
            .map(|i| {
                let mut sum = 0.0;
                let mut reachable = 0usize;
                for j in 0..n {
                    let d = distances.raw(i, j);
                    if i != j && d < INFINITY {
                        sum += d as f64;
                        reachable += 1;
                    }
                }
                if sum > 0.0 {
                    reachable as f64 / sum
                } else {
                    0.0
                }
            })
            .collect();

        CentralityScores {
            index: distances.index,
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> VertexId {
        VertexId::new(n)
    }

    #[test]
    fn test_star_center_scores_highest() {
        let mut graph = Graph::undirected();
        for n in 1..=4 {
            graph.add_vertex(id(n), n.to_string(), 0, 0).unwrap();
        }
        for leaf in 2..=4 {
            graph.add_edge(id(1), id(leaf), 1).unwrap();
        }

        let scores = Closeness::new(&graph).compute();
        assert_eq!(scores.len(), 4);
        assert_eq!(scores.score(id(1)), Some(1.0));
        // 叶子: 3 个可达顶点, 距离和 1 + 2 + 2
        let leaf = scores.score(id(2)).unwrap();
        assert!((leaf - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_vertex_scores_zero() {
        let mut graph = Graph::directed();
        graph.add_vertex(id(1), "A", 0, 0).unwrap();
        graph.add_vertex(id(2), "B", 0, 0).unwrap();
        graph.add_vertex(id(3), "C", 0, 0).unwrap();
        graph.add_edge(id(1), id(2), 2).unwrap();

        let scores = Closeness::new(&graph).compute();
        assert_eq!(scores.score(id(3)), Some(0.0));
        // 有向图中 2 没有出边
        assert_eq!(scores.score(id(2)), Some(0.0));
        assert_eq!(scores.score(id(1)), Some(0.5));
        assert_eq!(scores.score(id(9)), None);
    }

    #[test]
    fn test_zero_weight_edges_score_zero() {
        let mut graph = Graph::undirected();
        graph.add_vertex(id(1), "A", 0, 0).unwrap();
        graph.add_vertex(id(2), "B", 0, 0).unwrap();
        graph.add_edge(id(1), id(2), 0).unwrap();

        let scores = Closeness::new(&graph).compute();
        assert!(scores.iter().all(|(_, s)| s == 0.0));
    }

    #[test]
    fn test_scores_follow_index_order() {
        let mut graph = Graph::undirected();
        for n in [5, 3, 8] {
            graph.add_vertex(id(n), "", 0, 0).unwrap();
        }
        let scores = Closeness::new(&graph).compute();
        let ids: Vec<VertexId> = scores.iter().map(|(v, _)| v).collect();
        assert_eq!(ids, vec![id(5), id(3), id(8)]);
    }
}
