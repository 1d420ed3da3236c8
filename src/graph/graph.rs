//! 图数据结构
//!
//! 邻接表图：顶点按 ID 哈希存放以便 O(1) 查找，
//! 另有一条有序链表记录插入顺序，用于遍历与序列化

use super::edge::{Edge, Weight};
use super::index::VertexIndex;
use super::vertex::{Vertex, VertexId};
use crate::collections::OrderedList;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

/// 图
///
/// `directed` 与 `weighted` 在图的生命周期内不可变。
/// `weighted` 仅为描述信息，算法始终读取边上保存的权重。
#[derive(Debug, Clone)]
pub struct Graph {
    /// ID 到顶点的映射
    vertices: HashMap<VertexId, Vertex>,
    /// 插入顺序，与 `vertices` 同步维护
    order: OrderedList<VertexId>,
    /// 是否有向
    directed: bool,
    /// 是否带权
    weighted: bool,
}

impl Graph {
    /// 创建空图
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            vertices: HashMap::new(),
            order: OrderedList::new(),
            directed,
            weighted,
        }
    }

    /// 有向无权图
    pub fn directed() -> Self {
        Self::new(true, false)
    }

    /// 无向无权图
    pub fn undirected() -> Self {
        Self::new(false, false)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，ID 冲突时不做任何修改
    pub fn add_vertex(
        &mut self,
        id: VertexId,
        label: impl Into<String>,
        x: i32,
        y: i32,
    ) -> Result<&Vertex> {
        if self.vertices.contains_key(&id) {
            return Err(Error::VertexAlreadyExists(id));
        }

        self.order.push_back(id);
        let vertex = self
            .vertices
            .entry(id)
            .or_insert_with(|| Vertex::new(id, label, x, y));
        Ok(vertex)
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// 获取可变顶点（只能修改标签与坐标）
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// 删除顶点
    ///
    /// 先在整张图中删除所有指向该顶点的边，再删除它自己的出边，
    /// 最后移除顶点本身。返回被移除的顶点（邻接表已清空）。
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex> {
        if !self.vertices.contains_key(&id) {
            return Err(Error::VertexNotFound(id));
        }

        let mut removed_edges = 0;
        for vertex in self.vertices.values_mut() {
            let incoming: Vec<Edge> = vertex
                .edges()
                .iter()
                .filter(|e| e.dest() == id)
                .copied()
                .collect();
            for edge in &incoming {
                vertex.edges_mut().remove(edge);
            }
            removed_edges += incoming.len();
        }

        self.order.remove(&id);
        let mut vertex = self
            .vertices
            .remove(&id)
            .ok_or(Error::VertexNotFound(id))?;
        removed_edges += vertex.out_degree();
        vertex.edges_mut().clear();

        debug!(vertex = %id, removed_edges, "vertex removed");
        Ok(vertex)
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 按插入顺序遍历顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.order.iter().filter_map(move |id| self.vertices.get(id))
    }

    /// 按插入顺序遍历顶点 ID
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 无向图同时写入镜像边 `(dst, src)`，不检查镜像是否已存在。
    /// 无向自环只保存一条。
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, weight: Weight) -> Result<()> {
        if !self.vertices.contains_key(&src) {
            return Err(Error::VertexNotFound(src));
        }
        if !self.vertices.contains_key(&dst) {
            return Err(Error::VertexNotFound(dst));
        }

        let edge = Edge::new(src, dst, weight, self.directed);
        let source = self
            .vertices
            .get_mut(&src)
            .ok_or(Error::VertexNotFound(src))?;
        if source.edge_to(dst).is_some() {
            return Err(Error::EdgeAlreadyExists { src, dst });
        }
        source.edges_mut().push_back(edge);

        if !self.directed && src != dst {
            if let Some(dest) = self.vertices.get_mut(&dst) {
                dest.edges_mut().push_back(edge.mirror());
            }
        }

        Ok(())
    }

    /// 删除边
    ///
    /// 无向图还会尝试删除镜像边；镜像删除失败不报错，
    /// 结果只取决于正向边是否删除成功。
    pub fn remove_edge(&mut self, src: VertexId, dst: VertexId) -> Result<()> {
        if !self.vertices.contains_key(&src) {
            return Err(Error::VertexNotFound(src));
        }
        if !self.vertices.contains_key(&dst) {
            return Err(Error::VertexNotFound(dst));
        }

        let removed = self
            .vertices
            .get_mut(&src)
            .and_then(|v| v.edges_mut().remove_first(|e| e.dest() == dst));

        if !self.directed {
            if let Some(dest) = self.vertices.get_mut(&dst) {
                dest.edges_mut().remove_first(|e| e.dest() == src);
            }
        }

        match removed {
            Some(_) => Ok(()),
            None => Err(Error::EdgeNotFound { src, dst }),
        }
    }

    /// 获取 `src -> dst` 的边
    pub fn edge(&self, src: VertexId, dst: VertexId) -> Option<&Edge> {
        self.vertices.get(&src)?.edge_to(dst)
    }

    /// 遍历所有保存的边（顶点顺序，再按邻接表顺序；无向图含镜像边）
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.vertices().flat_map(|v| v.edges().iter())
    }

    /// 保存的边数量（无向图每条连接计两次）
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::out_degree).sum()
    }

    /// 出边邻居
    pub fn neighbors(&self, id: VertexId) -> Vec<VertexId> {
        self.vertices
            .get(&id)
            .map(|v| v.edges().iter().map(Edge::dest).collect())
            .unwrap_or_default()
    }

    /// 清空所有顶点和边
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.order.clear();
    }

    /// 为当前顶点集合建立稠密下标
    pub fn index(&self) -> VertexIndex {
        VertexIndex::build(self)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::undirected()
    }
}
