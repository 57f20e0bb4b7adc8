//! 图核心模块
//!
//! 定义顶点、边、图及其只读视图，以及算法输出的路径和最小生成树

mod adjacency;
mod edge;
mod graph;
mod index;
mod mst;
mod path;
mod vertex;

pub use adjacency::{AdjacencyList, AdjacencyMatrix};
pub use edge::Edge;
pub use graph::Graph;
pub use index::VerticesIndexes;
pub use mst::MinimumSpanningTree;
pub use path::Path;
pub use vertex::Vertex;
