//! 环检测
//!
//! 有向图：DFS 遇到仍在栈上的顶点即成环。
//! 无向图：DFS 遇到已访问且不是父节点的顶点即成环。
//! 两者都使用显式栈，不依赖递归深度。

use crate::graph::{Graph, VertexIndex};
use tracing::debug;

/// 显式 DFS 栈帧
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    /// 下一条待检查出边在邻接数组中的位置
    cursor: usize,
}

impl Frame {
    fn new(vertex: usize, parent: Option<usize>) -> Self {
        Self {
            vertex,
            parent,
            cursor: 0,
        }
    }
}

/// 环检测器
pub struct CycleDetector<'g> {
    graph: &'g Graph,
}

impl<'g> CycleDetector<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 图中是否存在环
    pub fn has_cycles(&self) -> bool {
        let index = self.graph.index();
        let adjacency = self.adjacency(&index);
        debug!(
            vertices = index.len(),
            directed = self.graph.is_directed(),
            "running cycle detection"
        );

        let found = if self.graph.is_directed() {
            directed_has_cycle(&adjacency)
        } else {
            undirected_has_cycle(&adjacency)
        };
        debug!(found, "cycle detection finished");
        found
    }

    /// 下标形式的邻接表，保持出边顺序
    fn adjacency(&self, index: &VertexIndex) -> Vec<Vec<usize>> {
        self.graph
            .vertices()
            .map(|v| {
                v.edges()
                    .iter()
                    .filter_map(|e| index.index_of(e.dest()))
                    .collect()
            })
            .collect()
    }
}

fn directed_has_cycle(adjacency: &[Vec<usize>]) -> bool {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        on_stack[root] = true;
        stack.push(Frame::new(root, None));

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;
            match adjacency[u].get(frame.cursor) {
                Some(&v) => {
                    frame.cursor += 1;
                    if on_stack[v] {
                        return true;
                    }
                    if !visited[v] {
                        visited[v] = true;
                        on_stack[v] = true;
                        stack.push(Frame::new(v, Some(u)));
                    }
                }
                None => {
                    on_stack[u] = false;
                    stack.pop();
                }
            }
        }
    }

    false
}

fn undirected_has_cycle(adjacency: &[Vec<usize>]) -> bool {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut stack: Vec<Frame> = Vec::new();

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        stack.push(Frame::new(root, None));

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;
            let parent = frame.parent;
            match adjacency[u].get(frame.cursor) {
                Some(&v) => {
                    frame.cursor += 1;
                    if !visited[v] {
                        visited[v] = true;
                        stack.push(Frame::new(v, Some(u)));
                    } else if Some(v) != parent {
                        return true;
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

    fn id(n: i64) -> VertexId {
        VertexId::new(n)
    }

    fn build(directed: bool, n: i64, edges: &[(i64, i64)]) -> Graph {
        let mut graph = Graph::new(directed, false);
        for v in 1..=n {
            graph.add_vertex(id(v), v.to_string(), 0, 0).unwrap();
        }
        for &(a, b) in edges {
            graph.add_edge(id(a), id(b), 0).unwrap();
        }
        graph
    }

    #[test]
    fn test_directed_triangle() {
        let mut graph = build(true, 3, &[(1, 2), (2, 3), (3, 1)]);
        assert!(CycleDetector::new(&graph).has_cycles());

        graph.remove_edge(id(3), id(1)).unwrap();
        assert!(!CycleDetector::new(&graph).has_cycles());
    }

    #[test]
    fn test_directed_diamond_is_acyclic() {
        // 两条路径汇合到同一顶点不是环
        let graph = build(true, 4, &[(1, 2), (1, 3), (2, 4), (3, 4)]);
        assert!(!CycleDetector::new(&graph).has_cycles());
    }

    #[test]
    fn test_directed_two_cycle_and_self_loop() {
        let graph = build(true, 2, &[(1, 2), (2, 1)]);
        assert!(CycleDetector::new(&graph).has_cycles());

        let graph = build(true, 1, &[(1, 1)]);
        assert!(CycleDetector::new(&graph).has_cycles());
    }

    #[test]
    fn test_directed_cycle_in_later_component() {
        let graph = build(true, 5, &[(1, 2), (3, 4), (4, 5), (5, 3)]);
        assert!(CycleDetector::new(&graph).has_cycles());
    }

    #[test]
    fn test_undirected_triangle() {
        for removed in [(1, 2), (2, 3), (3, 1)] {
            let mut graph = build(false, 3, &[(1, 2), (2, 3), (3, 1)]);
            assert!(CycleDetector::new(&graph).has_cycles());

            graph.remove_edge(id(removed.0), id(removed.1)).unwrap();
            assert!(!CycleDetector::new(&graph).has_cycles());
        }
    }

    #[test]
    fn test_undirected_tree_and_forest() {
        let tree = build(false, 5, &[(1, 2), (1, 3), (3, 4), (3, 5)]);
        assert!(!CycleDetector::new(&tree).has_cycles());

        let forest = build(false, 6, &[(1, 2), (3, 4), (5, 6)]);
        assert!(!CycleDetector::new(&forest).has_cycles());

        let mut closed = tree.clone();
        closed.add_edge(id(4), id(5), 0).unwrap();
        assert!(CycleDetector::new(&closed).has_cycles());
    }

    #[test]
    fn test_undirected_self_loop() {
        let graph = build(false, 1, &[(1, 1)]);
        assert!(CycleDetector::new(&graph).has_cycles());
    }

    #[test]
    fn test_empty_graph() {
        assert!(!CycleDetector::new(&Graph::directed()).has_cycles());
        assert!(!CycleDetector::new(&Graph::undirected()).has_cycles());
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 50_000;
        let mut graph = Graph::directed();
        for v in 0..n {
            graph.add_vertex(id(v), "", 0, 0).unwrap();
        }
        for v in 1..n {
            graph.add_edge(id(v - 1), id(v), 1).unwrap();
        }
        assert!(!CycleDetector::new(&graph).has_cycles());
    }
}
