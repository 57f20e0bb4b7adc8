//! 图算法模块
//!
//! 包含遍历、拓扑排序、最短路径和最小生成树算法。所有算法都不修改输入的图。

mod shortest_path;
mod spanning_tree;
mod traversal;
mod union_find;

pub use shortest_path::{
    adjust_weight, all_pairs_shortest_paths, dijkstra, single_source_shortest_paths, ShortestPaths,
};
pub use spanning_tree::{kruskal_mst, prim_mst};
pub use traversal::{
    bfs, no_op, recursive_dfs, stack_based_dfs, topological_sort, topological_sort_with,
};
pub use union_find::UnionFind;

use crate::error::{Error, Result};
use crate::graph::{Graph, Vertex};
use crate::metrics;

/// 计时并记录一次算法运行
fn instrumented<T, F>(name: &'static str, graph: &Graph, run: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    tracing::debug!(
        algorithm = name,
        vertices = graph.vertices_count(),
        edges = graph.edges_count(),
        directed = graph.is_directed(),
        "algorithm started"
    );

    let metrics = metrics::global_metrics();
    let timer = metrics.record_algorithm_start();
    let result = run();
    let elapsed = metrics.record_algorithm_complete(timer, result.is_ok());

    match &result {
        Ok(_) => tracing::debug!(algorithm = name, ?elapsed, "algorithm finished"),
        Err(e) => tracing::debug!(algorithm = name, ?elapsed, error = %e, "algorithm failed"),
    }
    result
}

/// 源顶点必须属于该图，返回图中保存的同一顶点
fn ensure_source<'g>(graph: &'g Graph, source: &Vertex) -> Result<&'g Vertex> {
    graph
        .vertices()
        .get(source)
        .ok_or_else(|| Error::SourceNotInGraph(source.label().to_string()))
}
