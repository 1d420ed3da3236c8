//! 顶点定义
//!
//! 顶点由调用方指定的稀疏整数 ID 标识，携带显示标签、
//! 画布坐标（算法不使用）以及自己的出边邻接表

use crate::collections::OrderedList;
use crate::graph::edge::Edge;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内唯一，由调用方选择）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub i64);

impl VertexId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for VertexId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 顶点
#[derive(Debug, Clone, Serialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 显示标签
    label: String,
    /// 画布坐标
    x: i32,
    y: i32,
    /// 出边邻接表（按插入顺序）
    edges: OrderedList<Edge>,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(id: VertexId, label: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id,
            label: label.into(),
            x,
            y,
            edges: OrderedList::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取标签
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 设置标签
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// 获取坐标
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// 设置坐标
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// 出边
    pub fn edges(&self) -> &OrderedList<Edge> {
        &self.edges
    }

    /// 出度
    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    /// 查找指向 `dest` 的出边
    pub fn edge_to(&self, dest: VertexId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.dest() == dest)
    }

    pub(crate) fn edges_mut(&mut self) -> &mut OrderedList<Edge> {
        &mut self.edges
    }
}
