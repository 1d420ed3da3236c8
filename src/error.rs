//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(VertexId),

    #[error("顶点已存在: {0}")]
    VertexAlreadyExists(VertexId),

    #[error("边不存在: {src} -> {dst}")]
    EdgeNotFound { src: VertexId, dst: VertexId },

    #[error("边已存在: {src} -> {dst}")]
    EdgeAlreadyExists { src: VertexId, dst: VertexId },

    #[error("解析错误 (第 {line} 行): {message}")]
    ParseError { line: usize, message: String },

    #[error("命令错误: {0}")]
    CommandError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
