//! 图数据结构
//!
//! 可变的顶点集合 + 边集合。无向图中每条边 (a, b, w) 会同时存入
//! (b, a, w) 作为独立的一条边，因此无向图的边数是逻辑连接数的两倍。

use super::adjacency::{AdjacencyList, AdjacencyMatrix};
use super::edge::Edge;
use super::vertex::Vertex;
use crate::error::{Error, Result};
use crate::metrics;
use indexmap::IndexSet;

/// 图
#[derive(Debug, Clone)]
pub struct Graph {
    /// 是否为有向图
    directed: bool,
    /// 是否为带权图
    weighted: bool,
    /// 边集合（插入顺序）
    edges: IndexSet<Edge>,
    /// 顶点集合：显式添加的顶点 ∪ 所有边的端点
    vertices: IndexSet<Vertex>,
}

impl Graph {
    /// 创建空图
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            edges: IndexSet::new(),
            vertices: IndexSet::new(),
        }
    }

    /// 由边集合创建图
    pub fn with_edges<I>(directed: bool, weighted: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new(directed, weighted);
        graph.add_edges(edges);
        graph
    }

    /// 由边集合和额外的顶点集合创建图
    pub fn with_edges_and_vertices<E, V>(directed: bool, weighted: bool, edges: E, vertices: V) -> Self
    where
        E: IntoIterator<Item = Edge>,
        V: IntoIterator<Item = Vertex>,
    {
        let mut graph = Self::new(directed, weighted);
        graph.add_vertices(vertices);
        graph.add_edges(edges);
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    // ==================== 边操作 ====================

    /// 添加边，已存在的边不会重复添加；无向图同时添加反向边
    ///
    /// 返回是否有新边被插入。
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        self.vertices.insert(edge.start().clone());
        self.vertices.insert(edge.end().clone());

        let reversed = (!self.directed).then(|| edge.reversed());
        let mut inserted = self.edges.insert(edge);
        if let Some(reversed) = reversed {
            inserted |= self.edges.insert(reversed);
        }

        if inserted {
            metrics::global_metrics().record_edge_insert();
        }
        inserted
    }

    /// 批量添加边
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = Edge>,
    {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    /// 是否包含该边（权重也必须相同）
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// 是否存在 start -> end 的边，忽略权重
    pub fn contains_edge_between(&self, start: &Vertex, end: &Vertex) -> bool {
        self.edges.iter().any(|edge| edge.connects(start, end))
    }

    /// 获取 start -> end 的边（有多条时返回最先插入的一条）
    pub fn get_edge(&self, start: &Vertex, end: &Vertex) -> Result<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.connects(start, end))
            .ok_or_else(|| Error::EdgeNotFound {
                start: start.label().to_string(),
                end: end.label().to_string(),
            })
    }

    /// 所有边（无向图中每条逻辑边出现两次）
    pub fn edges(&self) -> &IndexSet<Edge> {
        &self.edges
    }

    /// 获取边数量
    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，返回是否为新顶点
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        let inserted = self.vertices.insert(vertex);
        if inserted {
            metrics::global_metrics().record_vertex_insert();
        }
        inserted
    }

    /// 批量添加顶点
    pub fn add_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = Vertex>,
    {
        for vertex in vertices {
            self.add_vertex(vertex);
        }
    }

    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.vertices.contains(vertex)
    }

    /// 通过标签获取顶点
    pub fn get_vertex(&self, label: &str) -> Result<&Vertex> {
        self.vertices
            .get(label)
            .ok_or_else(|| Error::VertexNotFound(label.to_string()))
    }

    /// 所有顶点
    ///
    /// 顶点集合在每次添加边时同步维护，读取时无需再从边集合重建。
    pub fn vertices(&self) -> &IndexSet<Vertex> {
        &self.vertices
    }

    /// 获取顶点数量
    pub fn vertices_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn has_vertices(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// 既没有顶点也没有边
    pub fn is_empty(&self) -> bool {
        !(self.has_vertices() || self.has_edges())
    }

    // ==================== 视图 ====================

    /// 基于当前边集合计算邻接表快照
    pub fn as_adjacency_list(&self) -> AdjacencyList {
        metrics::global_metrics().record_view_build();
        AdjacencyList::new(&self.edges, self.directed)
    }

    /// 基于当前边集合计算邻接矩阵快照
    pub fn as_adjacency_matrix(&self) -> AdjacencyMatrix {
        metrics::global_metrics().record_view_build();
        AdjacencyMatrix::new(&self.edges, self.directed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn v(label: &str) -> Vertex {
        Vertex::new(label).unwrap()
    }

    #[test]
    fn test_graph_basic() {
        let mut graph = Graph::new(true, false);
        assert!(graph.is_empty());

        graph.add_edge(Edge::from_labels("A", "B").unwrap());
        graph.add_edge(Edge::from_labels("B", "C").unwrap());

        assert!(!graph.is_empty());
        assert_eq!(graph.vertices_count(), 3);
        assert_eq!(graph.edges_count(), 2);
        assert!(graph.contains_vertex(&v("C")));
        assert!(graph.contains_edge_between(&v("A"), &v("B")));
        assert!(!graph.contains_edge_between(&v("B"), &v("A")));
    }

    #[test]
    fn test_undirected_graph_mirrors_edges() {
        let mut graph = Graph::new(false, true);
        graph.add_edge(Edge::weighted_from_labels("A", "B", 5).unwrap());

        assert_eq!(graph.edges_count(), 2);
        assert!(graph.contains_edge(&Edge::weighted_from_labels("B", "A", 5).unwrap()));
        assert_eq!(graph.get_edge(&v("B"), &v("A")).unwrap().weight(), &BigDecimal::from(5));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut graph = Graph::new(false, false);
        assert!(graph.add_edge(Edge::from_labels("A", "B").unwrap()));
        assert!(!graph.add_edge(Edge::from_labels("A", "B").unwrap()));
        assert!(!graph.add_edge(Edge::from_labels("B", "A").unwrap()));
        assert_eq!(graph.edges_count(), 2);

        assert!(!graph.add_vertex(v("A")));
        assert!(graph.add_vertex(v("Z")));
        assert!(!graph.add_vertex(v("Z")));
        assert_eq!(graph.vertices_count(), 3);
    }

    #[test]
    fn test_contains_edge_ignores_weight_only_between_endpoints() {
        let mut graph = Graph::new(true, true);
        graph.add_edge(Edge::weighted_from_labels("A", "B", 2).unwrap());

        assert!(!graph.contains_edge(&Edge::weighted_from_labels("A", "B", 3).unwrap()));
        assert!(graph.contains_edge_between(&v("A"), &v("B")));

        // 同端点不同权重的边是两条不同的边
        graph.add_edge(Edge::weighted_from_labels("A", "B", 3).unwrap());
        assert_eq!(graph.edges_count(), 2);
        assert_eq!(graph.get_edge(&v("A"), &v("B")).unwrap().weight(), &BigDecimal::from(2));
    }

    #[test]
    fn test_lookup_failures() {
        let graph = Graph::with_edges(true, false, vec![Edge::from_labels("A", "B").unwrap()]);

        let err = graph.get_vertex("Q").unwrap_err();
        assert!(matches!(err, Error::VertexNotFound(ref label) if label == "Q"));
        assert!(err.is_lookup());

        let err = graph.get_edge(&v("B"), &v("A")).unwrap_err();
        assert!(matches!(err, Error::EdgeNotFound { .. }));
        assert_eq!(graph.get_vertex("A").unwrap(), &v("A"));
    }

    #[test]
    fn test_vertices_include_isolated_and_endpoints() {
        let graph = Graph::with_edges_and_vertices(
            true,
            false,
            vec![Edge::from_labels("A", "B").unwrap()],
            vec![v("X")],
        );
        assert_eq!(graph.vertices_count(), 3);
        assert!(graph.contains_vertex(&v("X")));
        assert!(graph.has_vertices());
        assert!(graph.has_edges());
    }

    #[test]
    fn test_views_are_snapshots() {
        let mut graph = Graph::with_edges(true, false, vec![Edge::from_labels("A", "B").unwrap()]);
        let list = graph.as_adjacency_list();
        let matrix = graph.as_adjacency_matrix();

        graph.add_edge(Edge::from_labels("B", "C").unwrap());

        assert!(!list.contains_vertex(&v("C")));
        assert!(!matrix.contains_vertex(&v("C")));
        assert_eq!(matrix.size(), 2);
        assert_eq!(graph.as_adjacency_list(), graph.as_adjacency_list());
    }
}
