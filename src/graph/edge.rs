//! 边定义
//!
//! 有向边 (start, end, weight)。权重为零表示无权重；
//! 相等性包含权重，端点相同但权重不同的两条边是不同的边。

use crate::error::Result;
use crate::graph::vertex::Vertex;
use crate::types::{zero_weight, Weight};
use bigdecimal::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 起点
    start: Vertex,
    /// 终点
    end: Vertex,
    /// 权重
    weight: Weight,
}

impl Edge {
    /// 创建无权重边
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self::weighted(start, end, zero_weight())
    }

    /// 创建带权重边
    pub fn weighted(start: Vertex, end: Vertex, weight: Weight) -> Self {
        Self { start, end, weight }
    }

    /// 通过标签创建无权重边
    pub fn from_labels(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(Vertex::new(start)?, Vertex::new(end)?))
    }

    /// 通过标签创建带权重边
    pub fn weighted_from_labels(start: &str, end: &str, weight: impl Into<Weight>) -> Result<Self> {
        Ok(Self::weighted(
            Vertex::new(start)?,
            Vertex::new(end)?,
            weight.into(),
        ))
    }

    /// 获取起点
    pub fn start(&self) -> &Vertex {
        &self.start
    }

    /// 获取终点
    pub fn end(&self) -> &Vertex {
        &self.end
    }

    /// 获取权重
    pub fn weight(&self) -> &Weight {
        &self.weight
    }

    /// 只有零值表示无权重
    pub fn has_weight(&self) -> bool {
        !self.weight.is_zero()
    }

    /// 端点互换、权重不变的新边
    pub fn reversed(&self) -> Edge {
        Edge::weighted(self.end.clone(), self.start.clone(), self.weight.clone())
    }

    /// 端点是否为 (start, end)，忽略权重
    pub fn connects(&self, start: &Vertex, end: &Vertex) -> bool {
        &self.start == start && &self.end == end
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[start={}, end={}", self.start, self.end)?;
        if self.has_weight() {
            write!(f, ", weight={}", self.weight)?;
        }
        write!(f, "]")
    }
}
