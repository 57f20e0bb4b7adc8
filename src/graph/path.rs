//! 路径
//!
//! 最短路径算法的输出：起点、终点、按插入顺序去重的中间顶点以及累计长度

use super::vertex::Vertex;
use crate::types::Weight;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 路径
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    start: Vertex,
    end: Vertex,
    intermediates: IndexSet<Vertex>,
    length: Weight,
}

impl Path {
    /// 创建没有中间顶点的路径
    pub fn new(start: Vertex, end: Vertex, length: Weight) -> Self {
        Self {
            start,
            end,
            intermediates: IndexSet::new(),
            length,
        }
    }

    pub fn start(&self) -> &Vertex {
        &self.start
    }

    pub fn end(&self) -> &Vertex {
        &self.end
    }

    pub fn length(&self) -> &Weight {
        &self.length
    }

    /// 追加中间顶点，已存在的顶点被忽略
    pub fn add_intermediate_vertex(&mut self, vertex: Vertex) {
        self.intermediates.insert(vertex);
    }

    /// 批量追加中间顶点
    pub fn add_intermediate_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = Vertex>,
    {
        self.intermediates.extend(vertices);
    }

    pub fn intermediate_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.intermediates.iter()
    }

    /// 起点 + 中间顶点 + 终点
    pub fn as_list(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.intermediates.len() + 2);
        vertices.push(self.start.clone());
        vertices.extend(self.intermediates.iter().cloned());
        vertices.push(self.end.clone());
        vertices
    }

    /// 反向路径，长度不变
    pub fn reverse(&self) -> Path {
        let mut path = Path::new(self.end.clone(), self.start.clone(), self.length.clone());
        path.add_intermediate_vertices(self.intermediates.iter().rev().cloned());
        path
    }

    /// 顶点数量；环路（起点即终点）只计一次公共端点
    pub fn vertices_count(&self) -> usize {
        let endpoints = if self.start == self.end { 1 } else { 2 };
        self.intermediates.len() + endpoints
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.length == other.length
            && self.intermediates.iter().eq(other.intermediates.iter())
    }
}

impl Eq for Path {}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.as_list().iter().map(|v| v.to_string()).collect();
        write!(f, "[vertices=[{}]; length = {}]", labels.join(", "), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn v(label: &str) -> Vertex {
        Vertex::new(label).unwrap()
    }

    fn sample_path() -> Path {
        let mut path = Path::new(v("A"), v("D"), BigDecimal::from(6));
        path.add_intermediate_vertices(vec![v("B"), v("C")]);
        path
    }

    #[test]
    fn test_path_as_list() {
        let path = sample_path();
        let labels: Vec<String> = path.as_list().iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
        assert_eq!(path.vertices_count(), 4);
        assert_eq!(path.to_string(), "[vertices=[A, B, C, D]; length = 6]");
    }

    #[test]
    fn test_path_ignores_duplicate_intermediates() {
        let mut path = sample_path();
        path.add_intermediate_vertex(v("B"));
        assert_eq!(path.vertices_count(), 4);
        let intermediates: Vec<&str> = path.intermediate_vertices().map(|v| v.label()).collect();
        assert_eq!(intermediates, vec!["B", "C"]);
    }

    #[test]
    fn test_path_reverse() {
        let path = sample_path();
        let reversed = path.reverse();
        assert_eq!(reversed.start(), &v("D"));
        assert_eq!(reversed.end(), &v("A"));
        assert_eq!(reversed.length(), path.length());
        let intermediates: Vec<&str> = reversed.intermediate_vertices().map(|v| v.label()).collect();
        assert_eq!(intermediates, vec!["C", "B"]);
        assert_eq!(reversed.reverse(), path);
        assert_ne!(reversed, path);
    }

    #[test]
    fn test_circular_path_counts_shared_endpoint_once() {
        let mut path = Path::new(v("A"), v("A"), BigDecimal::from(3));
        path.add_intermediate_vertex(v("B"));
        assert_eq!(path.vertices_count(), 2);
    }

    #[test]
    fn test_path_equality_respects_order() {
        let mut first = Path::new(v("A"), v("D"), BigDecimal::from(6));
        first.add_intermediate_vertices(vec![v("C"), v("B")]);
        assert_ne!(first, sample_path());
    }
}
