//! 图核心模块
//!
//! 定义顶点、边、图存储以及顶点下标映射

mod edge;
mod graph;
mod index;
mod vertex;

pub use edge::{Edge, Weight, DEFAULT_WEIGHT, INFINITY};
pub use graph::Graph;
pub use index::VertexIndex;
pub use vertex::{Vertex, VertexId};
