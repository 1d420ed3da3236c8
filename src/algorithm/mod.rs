//! 图算法模块
//!
//! 可达性、最短路径、最小生成树、环检测和接近中心性。
//! 所有算法每次调用都从当前图重新计算，不缓存结果。

mod centrality;
mod cycle;
mod matrix;
mod paths;
mod spanning_tree;

pub use centrality::{CentralityScores, Closeness};
pub use cycle::CycleDetector;
pub use matrix::Matrix;
pub use paths::{
    transitive_closure, DistanceMatrix, PathFinder, PathResult, ReachabilityMatrix,
};
pub use spanning_tree::{Prim, SpanningTree};

use crate::error::Result;
use crate::graph::{Graph, VertexId};

/// 可达性矩阵（Warshall 传递闭包）
pub fn path_matrix(graph: &Graph) -> ReachabilityMatrix {
    PathFinder::new(graph).reachability()
}

/// Dijkstra 单源最短路径
pub fn shortest_path(graph: &Graph, start: VertexId, end: VertexId) -> Result<Option<PathResult>> {
    PathFinder::new(graph).shortest_path(start, end)
}

/// Floyd–Warshall 全源最短路径
pub fn all_pairs_shortest_paths(graph: &Graph) -> DistanceMatrix {
    PathFinder::new(graph).all_pairs()
}

/// Prim 最小生成树
pub fn minimum_spanning_tree(graph: &Graph) -> SpanningTree {
    Prim::new(graph).run()
}

/// 环检测
pub fn has_cycles(graph: &Graph) -> bool {
    CycleDetector::new(graph).has_cycles()
}

/// 接近中心性
pub fn closeness_centrality(graph: &Graph) -> CentralityScores {
    Closeness::new(graph).compute()
}
