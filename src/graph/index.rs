//! 顶点下标
//!
//! 将稀疏的顶点 ID 映射到 0..N-1 的稠密下标（按图的遍历顺序），
//! 供矩阵类算法使用。每次算法调用时重新建立，不随图的修改而更新。

use crate::graph::{Graph, VertexId};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// 顶点下标映射
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexIndex {
    /// 下标 -> ID
    ids: Vec<VertexId>,
    /// ID -> 下标
    positions: HashMap<VertexId, usize>,
}

impl VertexIndex {
    /// 按当前顶点遍历顺序建立映射
    pub fn build(graph: &Graph) -> Self {
        graph.vertex_ids().collect()
    }

    /// 顶点数量
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// ID 对应的下标
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// 下标对应的 ID
    pub fn id_at(&self, index: usize) -> Option<VertexId> {
        self.ids.get(index).copied()
    }

    /// 下标顺序的 ID 数组
    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    /// 遍历 (下标, ID)
    pub fn iter(&self) -> impl Iterator<Item = (usize, VertexId)> + '_ {
        self.ids.iter().copied().enumerate()
    }
}

impl FromIterator<VertexId> for VertexIndex {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        let ids: Vec<VertexId> = iter.into_iter().collect();
        let positions = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self { ids, positions }
    }
}

impl Serialize for VertexIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}
