//! 算法命令
//!
//! 把命令行子命令映射到算法调用，结果整理成列 + 行，供表格或 JSON 输出

use crate::algorithm::{
    all_pairs_shortest_paths, bfs, dijkstra, kruskal_mst, prim_mst, recursive_dfs,
    single_source_shortest_paths, stack_based_dfs, topological_sort_with, ShortestPaths,
};
use crate::error::Result;
use crate::graph::{Graph, MinimumSpanningTree, Path, Vertex};
use clap::Subcommand;
use serde::Serialize;

/// 可执行的算法
#[derive(Subcommand, Debug, Clone)]
pub enum AlgorithmCommand {
    /// 显示图统计信息
    Stats,
    /// 广度优先遍历
    Bfs {
        /// 起点标签
        source: String,
    },
    /// 深度优先遍历
    Dfs {
        source: String,
        /// 使用递归版本（覆盖不连通的部分）
        #[arg(long)]
        recursive: bool,
    },
    /// 拓扑排序
    Topo { source: String },
    /// Dijkstra 单源最短路径
    Dijkstra { source: String },
    /// 单源最短路径（允许负权重）
    Sssp { source: String },
    /// 全源最短路径
    Apsp,
    /// Prim 最小生成树
    Prim { start: String },
    /// Kruskal 最小生成树
    Kruskal { start: String },
}

/// 命令输出
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 附加说明（如生成树总权重、负环）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl CommandOutput {
    fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

impl AlgorithmCommand {
    /// 命令名称
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmCommand::Stats => "stats",
            AlgorithmCommand::Bfs { .. } => "bfs",
            AlgorithmCommand::Dfs { .. } => "dfs",
            AlgorithmCommand::Topo { .. } => "topo",
            AlgorithmCommand::Dijkstra { .. } => "dijkstra",
            AlgorithmCommand::Sssp { .. } => "sssp",
            AlgorithmCommand::Apsp => "apsp",
            AlgorithmCommand::Prim { .. } => "prim",
            AlgorithmCommand::Kruskal { .. } => "kruskal",
        }
    }

    /// 在图上执行命令
    pub fn execute(&self, graph: &Graph) -> Result<CommandOutput> {
        match self {
            AlgorithmCommand::Stats => Ok(stats_output(graph)),
            AlgorithmCommand::Bfs { source } => {
                let source = graph.get_vertex(source)?;
                traversal_output(|action| bfs(graph, source, action))
            }
            AlgorithmCommand::Dfs { source, recursive } => {
                let source = graph.get_vertex(source)?;
                if *recursive {
                    traversal_output(|action| recursive_dfs(graph, source, action))
                } else {
                    traversal_output(|action| stack_based_dfs(graph, source, action))
                }
            }
            AlgorithmCommand::Topo { source } => {
                let source = graph.get_vertex(source)?;
                let order = topological_sort_with(graph, source, |_, _| {})?;
                let mut output = CommandOutput::new(&["position", "vertex"]);
                for (position, vertex) in order.iter().enumerate() {
                    output.push(vec![(position + 1).to_string(), vertex.to_string()]);
                }
                Ok(output)
            }
            AlgorithmCommand::Dijkstra { source } => {
                let source = graph.get_vertex(source)?;
                Ok(paths_output(&dijkstra(graph, source)?))
            }
            AlgorithmCommand::Sssp { source } => {
                let source = graph.get_vertex(source)?;
                Ok(match single_source_shortest_paths(graph, source)? {
                    ShortestPaths::Found(paths) => paths_output(&paths),
                    ShortestPaths::NoEdges => CommandOutput {
                        summary: Some("graph has no edges".to_string()),
                        ..paths_output(&[])
                    },
                    ShortestPaths::NegativeCycle => CommandOutput {
                        summary: Some("negative cycle detected".to_string()),
                        ..paths_output(&[])
                    },
                })
            }
            AlgorithmCommand::Apsp => {
                let mut output = CommandOutput::new(&["start", "end", "length", "vertices"]);
                for paths in all_pairs_shortest_paths(graph)?.values() {
                    for path in paths {
                        output.push(path_row(path, true));
                    }
                }
                Ok(output)
            }
            AlgorithmCommand::Prim { start } => {
                let start = graph.get_vertex(start)?;
                Ok(tree_output(&prim_mst(graph, start)?))
            }
            AlgorithmCommand::Kruskal { start } => {
                let start = graph.get_vertex(start)?;
                Ok(tree_output(&kruskal_mst(graph, start)?))
            }
        }
    }
}

fn stats_output(graph: &Graph) -> CommandOutput {
    let mut output = CommandOutput::new(&["property", "value"]);
    output.push(vec!["directed".to_string(), graph.is_directed().to_string()]);
    output.push(vec!["weighted".to_string(), graph.is_weighted().to_string()]);
    output.push(vec!["vertices".to_string(), graph.vertices_count().to_string()]);
    output.push(vec!["edges".to_string(), graph.edges_count().to_string()]);
    output
}

/// 收集遍历过程中的发现边
fn traversal_output<T>(traverse: T) -> Result<CommandOutput>
where
    T: FnOnce(&mut dyn FnMut(&Vertex, &Vertex)) -> Result<()>,
{
    let mut output = CommandOutput::new(&["step", "from", "to"]);
    let mut step = 0;
    traverse(&mut |start: &Vertex, end: &Vertex| {
        step += 1;
        output.push(vec![step.to_string(), start.to_string(), end.to_string()]);
    })?;
    Ok(output)
}

fn path_row(path: &Path, with_start: bool) -> Vec<String> {
    let vertices: Vec<String> = path.as_list().iter().map(|v| v.to_string()).collect();
    let mut row = Vec::with_capacity(4);
    if with_start {
        row.push(path.start().to_string());
    }
    row.push(path.end().to_string());
    row.push(path.length().to_string());
    row.push(vertices.join(" -> "));
    row
}

fn paths_output(paths: &[Path]) -> CommandOutput {
    let mut output = CommandOutput::new(&["end", "length", "vertices"]);
    for path in paths {
        output.push(path_row(path, false));
    }
    output
}

fn tree_output(mst: &MinimumSpanningTree) -> CommandOutput {
    let mut output = CommandOutput::new(&["start", "end", "weight"]);
    // 无向树的每条边存了两次，只输出按标签有序的一条
    for edge in mst.edges().iter().filter(|edge| edge.start() < edge.end()) {
        output.push(vec![
            edge.start().to_string(),
            edge.end().to_string(),
            edge.weight().to_string(),
        ]);
    }
    output.summary = Some(format!("total cost = {}", mst.cost()));
    output
}
