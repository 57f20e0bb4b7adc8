//! 最小生成树
//!
//! 无向图 + 累计总权重

use super::edge::Edge;
use super::graph::Graph;
use super::vertex::Vertex;
use crate::types::{zero_weight, Weight};
use std::ops::Deref;

/// 最小生成树
#[derive(Debug, Clone)]
pub struct MinimumSpanningTree {
    tree: Graph,
    cost: Weight,
}

impl MinimumSpanningTree {
    pub fn new(weighted: bool) -> Self {
        Self {
            tree: Graph::new(false, weighted),
            cost: zero_weight(),
        }
    }

    /// 添加一条树边
    ///
    /// 底层无向图会存入两条有向边，但每次逻辑添加只累计一次权重；
    /// 已存在的边不再计费。
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let weight = edge.weight().clone();
        let inserted = self.tree.add_edge(edge);
        if inserted {
            self.cost += weight;
        }
        inserted
    }

    /// 添加顶点（用于只有一个顶点的生成树）
    pub fn add_vertex(&mut self, vertex: Vertex) -> bool {
        self.tree.add_vertex(vertex)
    }

    /// 总权重
    pub fn cost(&self) -> &Weight {
        &self.cost
    }

    pub fn as_graph(&self) -> &Graph {
        &self.tree
    }

    pub fn into_graph(self) -> Graph {
        self.tree
    }
}

impl Deref for MinimumSpanningTree {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn test_mst_cost_counted_once_per_edge() {
        let mut mst = MinimumSpanningTree::new(true);
        assert!(mst.add_edge(Edge::weighted_from_labels("A", "B", 4).unwrap()));
        assert!(mst.add_edge(Edge::weighted_from_labels("B", "C", 3).unwrap()));

        assert_eq!(mst.cost(), &BigDecimal::from(7));
        assert_eq!(mst.edges_count(), 4);
        assert_eq!(mst.vertices_count(), 3);
        assert!(!mst.is_directed());
    }

    #[test]
    fn test_mst_duplicate_edge_not_charged() {
        let mut mst = MinimumSpanningTree::new(true);
        mst.add_edge(Edge::weighted_from_labels("A", "B", 4).unwrap());
        assert!(!mst.add_edge(Edge::weighted_from_labels("B", "A", 4).unwrap()));
        assert_eq!(mst.cost(), &BigDecimal::from(4));
    }

    #[test]
    fn test_unweighted_mst_has_zero_cost() {
        let mut mst = MinimumSpanningTree::new(false);
        mst.add_edge(Edge::from_labels("A", "B").unwrap());
        assert_eq!(mst.cost(), &zero_weight());
        assert_eq!(mst.as_graph().edges_count(), 2);
    }
}
