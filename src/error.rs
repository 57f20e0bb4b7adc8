//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("源顶点不属于该图: {0}")]
    SourceNotInGraph(String),

    #[error("图必须是有向图")]
    GraphMustBeDirected,

    #[error("图必须是无向图")]
    GraphMustBeUndirected,

    #[error("边权重不能为负: [{start} -> {end}] = {weight}")]
    NegativeWeight {
        start: String,
        end: String,
        weight: String,
    },

    #[error("图中不能包含环")]
    CycleDetected,

    #[error("图不连通, 无法到达顶点: {0}")]
    Disconnected(String),

    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: [{start} -> {end}]")]
    EdgeNotFound { start: String, end: String },

    #[error("顶点下标越界: {index} (共 {len} 个顶点)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("未知的集合元素: {0}")]
    UnknownKey(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// 是否为可恢复的查找失败（顶点或边不存在）
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Error::VertexNotFound(_) | Error::EdgeNotFound { .. } | Error::UnknownKey(_)
        )
    }
}
