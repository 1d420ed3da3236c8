//! GraphLab - 图编辑与分析工具
//!
//! 基于邻接表的图存储，支持：
//! - 有向 / 无向、带权 / 不带权图的编辑
//! - 可达性、Dijkstra、Floyd–Warshall、Prim、环检测和接近中心性
//! - 简单文本格式的读写
//! - 交互式命令行

pub mod algorithm;
pub mod cli;
pub mod collections;
pub mod error;
pub mod graph;
pub mod storage;

// 重导出常用类型
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Vertex, VertexId, VertexIndex, Weight, DEFAULT_WEIGHT, INFINITY};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
