//! 遍历与拓扑排序
//!
//! 回调 `action(start, end)` 对每条发现边（第一次到达某个未发现顶点的边）调用一次。

use super::{ensure_source, instrumented};
use crate::error::{Error, Result};
use crate::graph::{AdjacencyList, Graph, Vertex};
use std::collections::{HashSet, VecDeque};

/// 什么也不做的回调
pub fn no_op(_start: &Vertex, _end: &Vertex) {}

/// 广度优先遍历，只覆盖从 source 可达的顶点
pub fn bfs<F>(graph: &Graph, source: &Vertex, mut action: F) -> Result<()>
where
    F: FnMut(&Vertex, &Vertex),
{
    instrumented("bfs", graph, || {
        ensure_source(graph, source)?;
        let adjacency = graph.as_adjacency_list();
        let mut discovered: HashSet<&Vertex> = HashSet::new();
        let mut queue = VecDeque::new();

        discovered.insert(source);
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            for neighbor in adjacency.neighbors(current) {
                if discovered.insert(neighbor) {
                    action(current, neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(())
    })
}

/// 基于显式栈的深度优先遍历，只覆盖从 source 可达的顶点
pub fn stack_based_dfs<F>(graph: &Graph, source: &Vertex, mut action: F) -> Result<()>
where
    F: FnMut(&Vertex, &Vertex),
{
    instrumented("stack_based_dfs", graph, || {
        ensure_source(graph, source)?;
        let adjacency = graph.as_adjacency_list();
        let mut discovered: HashSet<&Vertex> = HashSet::new();

        discovered.insert(source);
        let mut stack = vec![(source, adjacency.neighbors(source))];

        while let Some((vertex, neighbors)) = stack.last_mut() {
            let vertex: &Vertex = *vertex;
            match neighbors.find(|neighbor| !discovered.contains(neighbor)) {
                Some(next) => {
                    discovered.insert(next);
                    action(vertex, next);
                    stack.push((next, adjacency.neighbors(next)));
                }
                None => {
                    stack.pop();
                }
            }
        }
        Ok(())
    })
}

/// 递归深度优先遍历
///
/// 先从 source 出发，再依次从每个尚未发现的顶点重新开始，因此不连通的图也会被完整覆盖。
pub fn recursive_dfs<F>(graph: &Graph, source: &Vertex, mut action: F) -> Result<()>
where
    F: FnMut(&Vertex, &Vertex),
{
    instrumented("recursive_dfs", graph, || {
        ensure_source(graph, source)?;
        let adjacency = graph.as_adjacency_list();
        let mut discovered: HashSet<&Vertex> = HashSet::new();

        for start in std::iter::once(source).chain(graph.vertices()) {
            if discovered.insert(start) {
                visit(&adjacency, start, &mut discovered, &mut action);
            }
        }
        Ok(())
    })
}

fn visit<'a, F>(
    adjacency: &'a AdjacencyList,
    vertex: &'a Vertex,
    discovered: &mut HashSet<&'a Vertex>,
    action: &mut F,
) where
    F: FnMut(&Vertex, &Vertex),
{
    for neighbor in adjacency.neighbors(vertex) {
        if discovered.insert(neighbor) {
            action(vertex, neighbor);
            visit(adjacency, neighbor, discovered, action);
        }
    }
}

/// 拓扑排序（不关心发现边）
pub fn topological_sort(graph: &Graph, source: &Vertex) -> Result<Vec<Vertex>> {
    topological_sort_with(graph, source, no_op)
}

/// 拓扑排序
///
/// 只对有向图有效。从 source 做深度优先遍历，按完成顺序的逆序输出；
/// 只包含从 source 可达的顶点。遇到指向当前路径上顶点的边（包括自环）时失败。
pub fn topological_sort_with<F>(graph: &Graph, source: &Vertex, mut action: F) -> Result<Vec<Vertex>>
where
    F: FnMut(&Vertex, &Vertex),
{
    instrumented("topological_sort", graph, || {
        ensure_source(graph, source)?;
        if !graph.is_directed() {
            return Err(Error::GraphMustBeDirected);
        }

        let adjacency = graph.as_adjacency_list();
        // 已发现但未完成的顶点就是当前路径上的祖先
        let mut on_path: HashSet<&Vertex> = HashSet::new();
        let mut finished: HashSet<&Vertex> = HashSet::new();
        let mut order: Vec<Vertex> = Vec::new();

        on_path.insert(source);
        let mut stack = vec![(source, adjacency.neighbors(source))];

        while let Some((vertex, neighbors)) = stack.last_mut() {
            let vertex: &Vertex = *vertex;
            match neighbors.find(|neighbor| !finished.contains(neighbor)) {
                Some(next) if on_path.contains(next) => {
                    tracing::warn!(from = %vertex, to = %next, "cycle detected during topological sort");
                    return Err(Error::CycleDetected);
                }
                Some(next) => {
                    on_path.insert(next);
                    action(vertex, next);
                    stack.push((next, adjacency.neighbors(next)));
                }
                None => {
                    on_path.remove(vertex);
                    finished.insert(vertex);
                    order.push(vertex.clone());
                    stack.pop();
                }
            }
        }

        order.reverse();
        Ok(order)
    })
}
