//! GraphAlgo - 图表示与经典图算法引擎
//!
//! - 可变的有向/无向、带权/无权图，以及邻接表、邻接矩阵等只读视图
//! - 广度/深度优先遍历、拓扑排序
//! - Dijkstra、单源（允许负权重）与 Floyd-Warshall 全源最短路径
//! - Prim、Kruskal 最小生成树
//! - 边列表导入与命令行工具

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use algorithm::ShortestPaths;
pub use error::{Error, Result};
pub use graph::{
    AdjacencyList, AdjacencyMatrix, Edge, Graph, MinimumSpanningTree, Path, Vertex,
    VerticesIndexes,
};
pub use types::{Distance, Weight};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
