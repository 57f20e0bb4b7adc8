//! 最小生成树：Prim 与 Kruskal
//!
//! 两者都只接受无向图；图不连通时返回 `Error::Disconnected`。

use super::union_find::UnionFind;
use super::{ensure_source, instrumented};
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, MinimumSpanningTree, Vertex};
use crate::types::{Distance, Weight};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;

fn ensure_undirected(graph: &Graph) -> Result<()> {
    if graph.is_directed() {
        Err(Error::GraphMustBeUndirected)
    } else {
        Ok(())
    }
}

/// Prim 最小生成树
///
/// 从 start 出发，每次把离当前树最近的顶点连同它的父边并入树中。
pub fn prim_mst(graph: &Graph, start: &Vertex) -> Result<MinimumSpanningTree> {
    instrumented("prim_mst", graph, || {
        let start = ensure_source(graph, start)?;
        ensure_undirected(graph)?;

        let mut outgoing: HashMap<&Vertex, Vec<&Edge>> = HashMap::new();
        for edge in graph.edges() {
            outgoing.entry(edge.start()).or_default().push(edge);
        }

        // 顶点 -> 把它连入树的边
        let mut parents: HashMap<&Vertex, &Edge> = HashMap::new();
        let mut queue: PriorityQueue<&Vertex, Reverse<(Distance, &Vertex)>> = PriorityQueue::new();
        for vertex in graph.vertices() {
            let distance = if vertex == start {
                Distance::zero()
            } else {
                Distance::Infinite
            };
            queue.push(vertex, Reverse((distance, vertex)));
        }

        while let Some((vertex, Reverse((distance, _)))) = queue.pop() {
            if !distance.is_finite() {
                break;
            }
            for &edge in outgoing.get(vertex).into_iter().flatten() {
                let candidate = Distance::Finite(edge.weight().clone());
                let improves = matches!(
                    queue.get_priority(edge.end()),
                    Some(Reverse((current, _))) if candidate < *current
                );
                if improves {
                    queue.change_priority(edge.end(), Reverse((candidate, edge.end())));
                    parents.insert(edge.end(), edge);
                }
            }
        }

        let mut mst = MinimumSpanningTree::new(graph.is_weighted());
        mst.add_vertex(start.clone());
        for vertex in graph.vertices().iter().filter(|&vertex| vertex != start) {
            let edge = parents
                .get(vertex)
                .ok_or_else(|| Error::Disconnected(vertex.label().to_string()))?;
            mst.add_edge((*edge).clone());
        }

        tracing::debug!(cost = %mst.cost(), "prim spanning tree built");
        Ok(mst)
    })
}

/// Kruskal 最小生成树
///
/// 按权重升序考察每条逻辑边（无向图中反向的那条只入队一次），
/// 用并查集丢弃会成环的边，接受 |V|-1 条边后结束。
pub fn kruskal_mst(graph: &Graph, start: &Vertex) -> Result<MinimumSpanningTree> {
    instrumented("kruskal_mst", graph, || {
        let start = ensure_source(graph, start)?;
        ensure_undirected(graph)?;

        let mut queue: PriorityQueue<&Edge, Reverse<(&Weight, &Vertex, &Vertex)>> =
            PriorityQueue::new();
        for edge in graph.edges() {
            if queue.get_priority(&edge.reversed()).is_none() {
                queue.push(edge, Reverse((edge.weight(), edge.start(), edge.end())));
            }
        }

        let mut components: UnionFind<String> = UnionFind::new();
        for vertex in graph.vertices() {
            components.create(vertex.label().to_string())?;
        }

        let mut mst = MinimumSpanningTree::new(graph.is_weighted());
        mst.add_vertex(start.clone());

        let required = graph.vertices_count().saturating_sub(1);
        let mut accepted = 0;
        while accepted < required {
            let Some((edge, _)) = queue.pop() else {
                let root = components.find(&start.label().to_string())?;
                for vertex in graph.vertices() {
                    if components.find(&vertex.label().to_string())? != root {
                        return Err(Error::Disconnected(vertex.label().to_string()));
                    }
                }
                return Err(Error::Disconnected(start.label().to_string()));
            };

            let (from, to) = (edge.start().label().to_string(), edge.end().label().to_string());
            if components.union(&from, &to)? {
                mst.add_edge(edge.clone());
                accepted += 1;
            }
        }

        tracing::debug!(cost = %mst.cost(), "kruskal spanning tree built");
        Ok(mst)
    })
}
