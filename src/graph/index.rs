//! 顶点下标表
//!
//! 顶点与下标的双向映射，下标按顶点自然顺序（标签升序）分配

use super::vertex::Vertex;
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};

/// 顶点下标表
#[derive(Debug, Clone)]
pub struct VerticesIndexes {
    /// 下标 -> 顶点
    vertices: Vec<Vertex>,
    /// 顶点 -> 下标
    indexes: HashMap<Vertex, usize>,
}

impl VerticesIndexes {
    /// 由顶点集合创建，重复顶点只计一次
    pub fn new<'a, I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let sorted: BTreeSet<&Vertex> = vertices.into_iter().collect();
        let vertices: Vec<Vertex> = sorted.into_iter().cloned().collect();
        let indexes = vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (vertex.clone(), index))
            .collect();
        Self { vertices, indexes }
    }

    /// 获取顶点下标，未知顶点返回 None
    pub fn index(&self, vertex: &Vertex) -> Option<usize> {
        self.indexes.get(vertex).copied()
    }

    /// 获取下标对应的顶点
    pub fn vertex(&self, index: usize) -> Result<&Vertex> {
        self.vertices
            .get(index)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
