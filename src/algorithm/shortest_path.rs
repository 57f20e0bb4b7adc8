//! 最短路径算法
//!
//! - `dijkstra`: 非负权重的单源最短路径
//! - `single_source_shortest_paths`: 有向图按拓扑序松弛，无向图做 |V|-1 轮全边松弛并检测负环
//! - `all_pairs_shortest_paths`: Floyd-Warshall
//!
//! 无权重的边一律按权重 1 计算。

use super::traversal::topological_sort;
use super::{ensure_source, instrumented};
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Path, Vertex, VerticesIndexes};
use crate::types::{is_negative, unit_weight, Distance, Weight};
use indexmap::IndexMap;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;

/// 单源最短路径的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortestPaths {
    /// 每个可达顶点（源点除外）一条路径
    Found(Vec<Path>),
    /// 图中没有边
    NoEdges,
    /// 存在负环，最短路径无意义
    NegativeCycle,
}

impl ShortestPaths {
    /// 退化结果视为空列表
    pub fn into_paths(self) -> Vec<Path> {
        match self {
            ShortestPaths::Found(paths) => paths,
            ShortestPaths::NoEdges | ShortestPaths::NegativeCycle => Vec::new(),
        }
    }

    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, ShortestPaths::NegativeCycle)
    }
}

/// 最短路径计算使用的权重：无权重的边视为 1
fn effective_weight(edge: &Edge) -> Weight {
    if edge.has_weight() {
        edge.weight().clone()
    } else {
        unit_weight()
    }
}

/// 返回用于最短路径计算的边，原边不变
pub fn adjust_weight(edge: &Edge) -> Edge {
    Edge::weighted(edge.start().clone(), edge.end().clone(), effective_weight(edge))
}

type Outgoing<'g> = HashMap<&'g Vertex, Vec<(&'g Vertex, Weight)>>;

fn outgoing_edges(graph: &Graph) -> Outgoing<'_> {
    let mut outgoing: Outgoing<'_> = HashMap::new();
    for edge in graph.edges() {
        outgoing
            .entry(edge.start())
            .or_default()
            .push((edge.end(), effective_weight(edge)));
    }
    outgoing
}

/// 沿 start -> end 松弛后的新距离；不能缩短时返回 None
fn relaxed_distance(
    distances: &HashMap<&Vertex, Distance>,
    start: &Vertex,
    end: &Vertex,
    weight: &Weight,
) -> Option<Distance> {
    let candidate = distances.get(start)?.extend(weight);
    let current = distances.get(end).unwrap_or(&Distance::Infinite);
    (candidate < *current).then_some(candidate)
}

fn relax<'g>(
    distances: &mut HashMap<&'g Vertex, Distance>,
    parents: &mut HashMap<&'g Vertex, &'g Vertex>,
    start: &'g Vertex,
    end: &'g Vertex,
    weight: &Weight,
) -> bool {
    match relaxed_distance(distances, start, end, weight) {
        Some(distance) => {
            distances.insert(end, distance);
            parents.insert(end, start);
            true
        }
        None => false,
    }
}

/// 沿父节点表回溯出 source -> target 的路径
fn build_path(
    source: &Vertex,
    target: &Vertex,
    length: Weight,
    parents: &HashMap<&Vertex, &Vertex>,
) -> Path {
    let mut intermediates = Vec::new();
    let mut current = parents.get(target).copied();
    while let Some(vertex) = current {
        if vertex == source || intermediates.len() > parents.len() {
            break;
        }
        intermediates.push(vertex.clone());
        current = parents.get(vertex).copied();
    }
    intermediates.reverse();

    let mut path = Path::new(source.clone(), target.clone(), length);
    path.add_intermediate_vertices(intermediates);
    path
}

/// Dijkstra 单源最短路径
///
/// 任何一条边（按 1 补齐无权重后）为负都会直接失败。每次取出暂定距离最小的顶点，
/// 距离相同时按标签升序。不可达的顶点不出现在结果中，结果按确定距离的先后排列。
pub fn dijkstra(graph: &Graph, source: &Vertex) -> Result<Vec<Path>> {
    instrumented("dijkstra", graph, || {
        let source = ensure_source(graph, source)?;
        if let Some(edge) = graph.edges().iter().find(|edge| is_negative(&effective_weight(edge))) {
            return Err(Error::NegativeWeight {
                start: edge.start().to_string(),
                end: edge.end().to_string(),
                weight: edge.weight().to_string(),
            });
        }

        if !graph.has_edges() {
            return Ok(Vec::new());
        }

        let outgoing = outgoing_edges(graph);
        let mut parents: HashMap<&Vertex, &Vertex> = HashMap::new();
        let mut queue: PriorityQueue<&Vertex, Reverse<(Distance, &Vertex)>> = PriorityQueue::new();
        for vertex in graph.vertices() {
            let distance = if vertex == source {
                Distance::zero()
            } else {
                Distance::Infinite
            };
            queue.push(vertex, Reverse((distance, vertex)));
        }

        let mut settled: Vec<(&Vertex, Weight)> = Vec::new();
        while let Some((vertex, Reverse((distance, _)))) = queue.pop() {
            // 剩下的顶点都不可达
            let Distance::Finite(length) = distance else {
                break;
            };

            for (neighbor, weight) in outgoing.get(vertex).into_iter().flatten() {
                let candidate = Distance::Finite(&length + weight);
                let improves = matches!(
                    queue.get_priority(neighbor),
                    Some(Reverse((current, _))) if candidate < *current
                );
                if improves {
                    queue.change_priority(neighbor, Reverse((candidate, *neighbor)));
                    parents.insert(*neighbor, vertex);
                }
            }
            settled.push((vertex, length));
        }

        Ok(settled
            .into_iter()
            .filter(|(vertex, _)| *vertex != source)
            .map(|(vertex, length)| build_path(source, vertex, length, &parents))
            .collect())
    })
}

/// 单源最短路径（允许负权重）
///
/// 有向图先从 start 做拓扑排序，再按拓扑序松弛，因此要求从 start 可达的部分无环；
/// 无向图做 |V|-1 轮全边松弛。最后再扫描一遍所有边，仍能松弛说明存在负环。
pub fn single_source_shortest_paths(graph: &Graph, start: &Vertex) -> Result<ShortestPaths> {
    instrumented("single_source_shortest_paths", graph, || {
        let source = ensure_source(graph, start)?;

        if !graph.has_edges() {
            return Ok(ShortestPaths::NoEdges);
        }

        let mut distances: HashMap<&Vertex, Distance> = HashMap::new();
        let mut parents: HashMap<&Vertex, &Vertex> = HashMap::new();
        distances.insert(source, Distance::zero());

        if graph.is_directed() {
            let outgoing = outgoing_edges(graph);
            for vertex in topological_sort(graph, source)? {
                if let Some((&vertex, edges)) = outgoing.get_key_value(&vertex) {
                    for (neighbor, weight) in edges {
                        relax(&mut distances, &mut parents, vertex, *neighbor, weight);
                    }
                }
            }
        } else {
            for _ in 1..graph.vertices_count() {
                let mut changed = false;
                for edge in graph.edges() {
                    changed |= relax(
                        &mut distances,
                        &mut parents,
                        edge.start(),
                        edge.end(),
                        &effective_weight(edge),
                    );
                }
                if !changed {
                    break;
                }
            }
        }

        let negative_cycle = graph.edges().iter().any(|edge| {
            relaxed_distance(&distances, edge.start(), edge.end(), &effective_weight(edge)).is_some()
        });
        if negative_cycle {
            tracing::warn!(source = %source, "negative cycle detected");
            return Ok(ShortestPaths::NegativeCycle);
        }

        let mut reached: Vec<(&Vertex, Weight)> = distances
            .into_iter()
            .filter(|(vertex, _)| *vertex != source)
            .filter_map(|(vertex, distance)| distance.into_weight().map(|length| (vertex, length)))
            .collect();
        reached.sort_by(|a, b| (&a.1, a.0).cmp(&(&b.1, b.0)));

        Ok(ShortestPaths::Found(
            reached
                .into_iter()
                .map(|(vertex, length)| build_path(source, vertex, length, &parents))
                .collect(),
        ))
    })
}

/// Floyd-Warshall 全源最短路径
///
/// 顶点按标签升序编号。每个顶点对应一组路径，覆盖所有距离有限的其它顶点。
/// 存在负环时返回空表。
pub fn all_pairs_shortest_paths(graph: &Graph) -> Result<IndexMap<Vertex, Vec<Path>>> {
    instrumented("all_pairs_shortest_paths", graph, || {
        let mut result = IndexMap::new();
        if graph.is_empty() {
            return Ok(result);
        }

        let indexes = VerticesIndexes::new(graph.vertices());
        let size = indexes.len();

        let mut distances = vec![vec![Distance::Infinite; size]; size];
        let mut predecessors: Vec<Vec<Option<usize>>> = vec![vec![None; size]; size];
        for (i, row) in distances.iter_mut().enumerate() {
            row[i] = Distance::zero();
        }

        for edge in graph.edges() {
            let (Some(i), Some(j)) = (indexes.index(edge.start()), indexes.index(edge.end())) else {
                continue;
            };
            let weight = Distance::Finite(effective_weight(edge));
            if weight < distances[i][j] {
                distances[i][j] = weight;
                predecessors[i][j] = Some(i);
            }
        }

        for k in 0..size {
            for i in 0..size {
                if !distances[i][k].is_finite() {
                    continue;
                }
                for j in 0..size {
                    let candidate = distances[i][k].sum(&distances[k][j]);
                    if candidate < distances[i][j] {
                        distances[i][j] = candidate;
                        predecessors[i][j] = predecessors[k][j];
                    }
                }
            }
        }

        let zero = Distance::zero();
        if (0..size).any(|i| distances[i][i] < zero) {
            tracing::warn!("negative cycle detected, all pairs shortest paths undefined");
            return Ok(result);
        }

        for i in 0..size {
            let start = indexes.vertex(i)?;
            let mut paths = Vec::new();
            for j in (0..size).filter(|&j| j != i) {
                let Some(length) = distances[i][j].as_weight() else {
                    continue;
                };

                let mut intermediates = Vec::new();
                let mut current = predecessors[i][j];
                while let Some(k) = current {
                    if k == i || intermediates.len() >= size {
                        break;
                    }
                    intermediates.push(indexes.vertex(k)?.clone());
                    current = predecessors[i][k];
                }
                intermediates.reverse();

                let mut path = Path::new(start.clone(), indexes.vertex(j)?.clone(), length.clone());
                path.add_intermediate_vertices(intermediates);
                paths.push(path);
            }
            result.insert(start.clone(), paths);
        }
        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::{labels, unweighted_graph, v, weighted_graph, weighted_tree};
    use bigdecimal::BigDecimal;

    fn find<'a>(paths: &'a [Path], end: &str) -> &'a Path {
        paths
            .iter()
            .find(|path| path.end().label() == end)
            .unwrap_or_else(|| panic!("no path to {}", end))
    }

    fn assert_path(paths: &[Path], end: &str, length: i32, intermediates: &[&str]) {
        let path = find(paths, end);
        assert_eq!(path.length(), &BigDecimal::from(length), "length to {}", end);
        assert_eq!(
            labels(path.intermediate_vertices()),
            intermediates.to_vec(),
            "intermediates to {}",
            end
        );
    }

    #[test]
    fn test_adjust_weight() {
        let unweighted = Edge::from_labels("A", "B").unwrap();
        let adjusted = adjust_weight(&unweighted);
        assert_eq!(adjusted.weight(), &BigDecimal::from(1));
        assert!(!unweighted.has_weight());

        let weighted = Edge::weighted_from_labels("A", "B", -3).unwrap();
        assert_eq!(adjust_weight(&weighted), weighted);
    }

    #[test]
    fn test_dijkstra_undirected_weighted() {
        let graph = weighted_graph(false, true);
        let paths = dijkstra(&graph, &v("A")).unwrap();

        assert_eq!(paths.len(), 9);
        assert_path(&paths, "B", 1, &[]);
        assert_path(&paths, "C", 6, &["B"]);
        assert_path(&paths, "D", 4, &["B"]);
        assert_path(&paths, "E", 6, &["B", "D"]);
        assert_path(&paths, "G", 7, &["B", "D", "E"]);
        assert_path(&paths, "F", 10, &["B", "D", "E", "G"]);
        assert_path(&paths, "J", 8, &["B", "D", "E", "G"]);
        assert_path(&paths, "H", 9, &["B", "D", "E", "G", "J"]);
        assert_path(&paths, "I", 12, &["B", "D", "E", "G", "J"]);

        // 按确定距离的先后排列，距离相同按标签
        let ends: Vec<&str> = paths.iter().map(|p| p.end().label()).collect();
        assert_eq!(ends, vec!["B", "D", "C", "E", "G", "J", "H", "F", "I"]);
    }

    #[test]
    fn test_dijkstra_directed_weighted() {
        let graph = weighted_graph(true, false);
        let paths = dijkstra(&graph, &v("A")).unwrap();

        assert_path(&paths, "H", 12, &["B", "D", "E", "G", "F"]);
        assert_path(&paths, "I", 13, &["B", "D", "E", "G"]);
        assert_path(&paths, "J", 13, &["B", "D", "E", "G", "F", "H"]);
    }

    #[test]
    fn test_dijkstra_skips_unreachable_vertices() {
        let graph = weighted_graph(true, false);
        let paths = dijkstra(&graph, &v("G")).unwrap();
        let ends: Vec<&str> = paths.iter().map(|p| p.end().label()).collect();
        assert_eq!(ends, vec!["F", "H", "I", "J"]);
    }

    #[test]
    fn test_dijkstra_rejects_negative_weight() {
        let mut graph = weighted_graph(true, false);
        graph.add_edge(Edge::weighted_from_labels("J", "K", -1).unwrap());
        let err = dijkstra(&graph, &v("A")).unwrap_err();
        assert!(matches!(err, Error::NegativeWeight { ref start, .. } if start == "J"));
    }

    #[test]
    fn test_dijkstra_unknown_source_and_no_edges() {
        let graph = weighted_graph(true, false);
        assert!(matches!(
            dijkstra(&graph, &v("Z")),
            Err(Error::SourceNotInGraph(_))
        ));

        let mut lonely = Graph::new(true, true);
        lonely.add_vertex(v("A"));
        assert!(dijkstra(&lonely, &v("A")).unwrap().is_empty());
    }

    #[test]
    fn test_sssp_undirected_weighted() {
        let graph = weighted_graph(false, true);
        let paths = single_source_shortest_paths(&graph, &v("A")).unwrap().into_paths();

        assert_eq!(paths.len(), 9);
        assert_path(&paths, "B", 1, &[]);
        assert_path(&paths, "C", 6, &["B"]);
        assert_path(&paths, "D", 4, &["B"]);
        assert_path(&paths, "E", 6, &["B", "D"]);
        assert_path(&paths, "G", 7, &["B", "D", "E"]);
        assert_path(&paths, "F", 10, &["B", "D", "E", "G"]);
        assert_path(&paths, "J", 8, &["B", "D", "E", "G"]);
        assert_path(&paths, "H", 9, &["B", "D", "E", "G", "J"]);
        assert_path(&paths, "I", 12, &["B", "D", "E", "G", "J"]);
    }

    #[test]
    fn test_sssp_directed_weighted() {
        let graph = weighted_graph(true, false);
        let paths = single_source_shortest_paths(&graph, &v("A")).unwrap().into_paths();

        assert_path(&paths, "B", 1, &[]);
        assert_path(&paths, "D", 4, &["B"]);
        assert_path(&paths, "C", 6, &["B"]);
        assert_path(&paths, "E", 6, &["B", "D"]);
        assert_path(&paths, "G", 7, &["B", "D", "E"]);
        assert_path(&paths, "F", 10, &["B", "D", "E", "G"]);
        assert_path(&paths, "H", 12, &["B", "D", "E", "G", "F"]);
        assert_path(&paths, "I", 13, &["B", "D", "E", "G"]);
        assert_path(&paths, "J", 13, &["B", "D", "E", "G", "F", "H"]);
    }

    #[test]
    fn test_sssp_directed_unweighted() {
        let graph = unweighted_graph(true, false);
        let paths = single_source_shortest_paths(&graph, &v("A")).unwrap().into_paths();

        assert_path(&paths, "B", 1, &[]);
        assert_path(&paths, "D", 1, &[]);
        assert_path(&paths, "C", 2, &["B"]);
        assert_path(&paths, "E", 2, &["B"]);
        assert_path(&paths, "F", 3, &["B", "E"]);
        assert_path(&paths, "G", 2, &["D"]);
        assert_path(&paths, "H", 3, &["D", "G"]);
        assert_path(&paths, "I", 3, &["D", "G"]);
        assert_path(&paths, "J", 4, &["D", "G", "I"]);
    }

    #[test]
    fn test_sssp_directed_negative_weight_without_cycle() {
        let graph = Graph::with_edges(
            true,
            true,
            vec![
                Edge::weighted_from_labels("A", "B", 2).unwrap(),
                Edge::weighted_from_labels("B", "C", -1).unwrap(),
                Edge::weighted_from_labels("A", "C", 3).unwrap(),
            ],
        );
        let paths = single_source_shortest_paths(&graph, &v("A")).unwrap().into_paths();
        assert_path(&paths, "C", 1, &["B"]);
    }

    #[test]
    fn test_sssp_directed_cycle_fails() {
        let graph = weighted_graph(true, true);
        assert!(matches!(
            single_source_shortest_paths(&graph, &v("A")),
            Err(Error::CycleDetected)
        ));
    }

    #[test]
    fn test_sssp_negative_cycle() {
        let graph = Graph::with_edges(
            false,
            true,
            vec![
                Edge::weighted_from_labels("A", "B", 1).unwrap(),
                Edge::weighted_from_labels("B", "C", -2).unwrap(),
            ],
        );
        let result = single_source_shortest_paths(&graph, &v("A")).unwrap();
        assert!(result.is_negative_cycle());
        assert!(result.into_paths().is_empty());
    }

    #[test]
    fn test_sssp_no_edges() {
        let mut graph = Graph::new(false, false);
        graph.add_vertex(v("A"));
        assert_eq!(
            single_source_shortest_paths(&graph, &v("A")).unwrap(),
            ShortestPaths::NoEdges
        );
    }

    #[test]
    fn test_all_pairs_on_tree() {
        let graph = weighted_tree();
        let result = all_pairs_shortest_paths(&graph).unwrap();

        assert_eq!(result.len(), 10);
        let keys: Vec<&str> = result.keys().map(|v| v.label()).collect();
        assert_eq!(keys, vec!["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]);

        let from_a = &result[&v("A")];
        assert_eq!(from_a.len(), 9);
        for (end, length) in [
            ("B", 1),
            ("C", 6),
            ("D", 8),
            ("E", 11),
            ("F", 20),
            ("G", 12),
            ("H", 21),
            ("I", 26),
            ("J", 22),
        ] {
            assert_eq!(find(from_a, end).length(), &BigDecimal::from(length));
        }
        assert_path(from_a, "I", 26, &["B", "E", "G", "H", "J"]);
    }

    #[test]
    fn test_all_pairs_matches_dijkstra() {
        let graph = weighted_graph(false, true);
        let all_pairs = all_pairs_shortest_paths(&graph).unwrap();

        for source in graph.vertices() {
            let single = dijkstra(&graph, source).unwrap();
            let rows = &all_pairs[source];
            assert_eq!(single.len(), rows.len());
            for path in &single {
                assert_eq!(find(rows, path.end().label()).length(), path.length());
            }
        }
    }

    #[test]
    fn test_all_pairs_degenerate_graphs() {
        let empty = Graph::new(true, false);
        assert!(all_pairs_shortest_paths(&empty).unwrap().is_empty());

        let mut single = Graph::new(true, false);
        single.add_vertex(v("A"));
        let result = all_pairs_shortest_paths(&single).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[&v("A")].is_empty());
    }

    #[test]
    fn test_all_pairs_negative_cycle() {
        let graph = Graph::with_edges(
            false,
            true,
            vec![Edge::weighted_from_labels("A", "B", -1).unwrap()],
        );
        assert!(all_pairs_shortest_paths(&graph).unwrap().is_empty());
    }
}
