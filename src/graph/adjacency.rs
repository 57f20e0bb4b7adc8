//! 邻接表与邻接矩阵
//!
//! 两者都是调用时由边集合计算出的只读快照，之后对图的修改不会影响已生成的视图。

use super::edge::Edge;
use super::vertex::Vertex;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;

static NO_ADJACENT_VERTICES: BTreeSet<Vertex> = BTreeSet::new();

/// 邻接表：顶点 -> 按标签排序的邻居集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    adjacency: IndexMap<Vertex, BTreeSet<Vertex>>,
    directed: bool,
}

impl AdjacencyList {
    /// 由边集合构建邻接表
    pub fn new<'a, I>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let mut adjacency: IndexMap<Vertex, BTreeSet<Vertex>> = IndexMap::new();
        for edge in edges {
            adjacency
                .entry(edge.start().clone())
                .or_default()
                .insert(edge.end().clone());
            let end_entry = adjacency.entry(edge.end().clone()).or_default();
            if !directed {
                end_entry.insert(edge.start().clone());
            }
        }
        Self {
            adjacency,
            directed,
        }
    }

    pub fn has_directed_edges(&self) -> bool {
        self.directed
    }

    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// 是否包含该边的端点关系（忽略权重）
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.adjacency
            .get(edge.start())
            .map(|adjacents| adjacents.contains(edge.end()))
            .unwrap_or(false)
    }

    /// 顶点的度（邻居数量），顶点不存在时返回 None
    pub fn vertex_degree(&self, vertex: &Vertex) -> Option<usize> {
        self.adjacency.get(vertex).map(|adjacents| adjacents.len())
    }

    /// 获取邻居集合，顶点不存在时失败
    pub fn adjacent_vertices(&self, vertex: &Vertex) -> Result<&BTreeSet<Vertex>> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| Error::VertexNotFound(vertex.label().to_string()))
    }

    /// 邻居迭代器；不在任何边上的孤立顶点没有邻居
    pub fn neighbors(&self, vertex: &Vertex) -> impl Iterator<Item = &Vertex> + '_ {
        self.adjacency
            .get(vertex)
            .unwrap_or(&NO_ADJACENT_VERTICES)
            .iter()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.adjacency.keys()
    }
}

impl fmt::Display for AdjacencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, adjacents) in &self.adjacency {
            let labels: Vec<&str> = adjacents.iter().map(|v| v.label()).collect();
            writeln!(f, "{} => [{}]", vertex, labels.join(", "))?;
        }
        Ok(())
    }
}

/// 邻接矩阵：顶点按在边集合中首次出现的顺序编号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    indexes: IndexMap<Vertex, usize>,
    matrix: Vec<Vec<u8>>,
    directed: bool,
}

impl AdjacencyMatrix {
    pub const EDGE_PRESENT: u8 = 1;
    pub const EDGE_MISSING: u8 = 0;

    /// 由边集合构建邻接矩阵
    pub fn new<'a, I>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
        I::IntoIter: Clone,
    {
        let edges = edges.into_iter();

        let mut indexes = IndexMap::new();
        for edge in edges.clone() {
            for vertex in [edge.start(), edge.end()] {
                if !indexes.contains_key(vertex) {
                    let next = indexes.len();
                    indexes.insert(vertex.clone(), next);
                }
            }
        }

        let size = indexes.len();
        let mut matrix = vec![vec![Self::EDGE_MISSING; size]; size];
        for edge in edges {
            let start = indexes[edge.start()];
            let end = indexes[edge.end()];
            matrix[start][end] = Self::EDGE_PRESENT;
            if !directed {
                matrix[end][start] = Self::EDGE_PRESENT;
            }
        }

        Self {
            indexes,
            matrix,
            directed,
        }
    }

    pub fn has_directed_edges(&self) -> bool {
        self.directed
    }

    pub fn contains_vertex(&self, vertex: &Vertex) -> bool {
        self.indexes.contains_key(vertex)
    }

    /// 是否包含该边的端点关系（忽略权重）
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.contains_edge_between(edge.start(), edge.end())
    }

    /// O(1) 判断 start -> end 是否存在
    pub fn contains_edge_between(&self, start: &Vertex, end: &Vertex) -> bool {
        match (self.indexes.get(start), self.indexes.get(end)) {
            (Some(&start), Some(&end)) => self.matrix[start][end] == Self::EDGE_PRESENT,
            _ => false,
        }
    }

    /// 矩阵阶数（顶点数量）
    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    /// 顶点的矩阵下标
    pub fn index_of(&self, vertex: &Vertex) -> Option<usize> {
        self.indexes.get(vertex).copied()
    }

    /// 按下标顺序排列的顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.indexes.keys()
    }

    /// 矩阵的一行
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        self.matrix.get(index).map(|row| row.as_slice())
    }

    /// 逐行输出矩阵
    pub fn pretty(&self) -> String {
        let labels: Vec<&str> = self.vertices().map(|v| v.label()).collect();
        let mut output = format!("vertices order [{}]\n", labels.join(", "));
        for row in &self.matrix {
            let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            output.push_str(&format!("[{}]\n", cells.join(", ")));
        }
        output
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices: Vec<&Vertex> = self.vertices().collect();
        let labels: Vec<&str> = vertices.iter().map(|v| v.label()).collect();
        writeln!(f, "[{}]", labels.join(", "))?;
        for (row, start) in vertices.iter().enumerate() {
            for (col, end) in vertices.iter().enumerate() {
                writeln!(f, "[{},{}]={}", start, end, self.matrix[row][col])?;
            }
        }
        Ok(())
    }
}
