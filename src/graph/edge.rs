//! 边定义

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边权重（无权图同样保存，默认为 1）
pub type Weight = i64;

/// 默认权重
pub const DEFAULT_WEIGHT: Weight = 1;

/// "不可达" 哨兵距离
pub const INFINITY: Weight = 1_000_000_000;

/// 边
///
/// 始终保存在源顶点的邻接表中；端点以 ID 引用，不拥有顶点。
/// 无向图中的一条连接由两条互为镜像的边表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点 ID
    source: VertexId,
    /// 目标顶点 ID
    dest: VertexId,
    /// 权重
    weight: Weight,
    /// 是否有向（取自所属图的模式）
    directed: bool,
}

impl Edge {
    /// 创建新边
    pub fn new(source: VertexId, dest: VertexId, weight: Weight, directed: bool) -> Self {
        Self {
            source,
            dest,
            weight,
            directed,
        }
    }

    /// 获取源顶点 ID
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 获取目标顶点 ID
    pub fn dest(&self) -> VertexId {
        self.dest
    }

    /// 获取权重
    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// 镜像边（交换端点，权重不变）
    pub fn mirror(&self) -> Self {
        Self::new(self.dest, self.source, self.weight, self.directed)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "{} {} {} ({})", self.source, arrow, self.dest, self.weight)
    }
}
