//! 数据导入模块
//!
//! 从边列表文件构建图，支持 CSV（`start,end[,weight]`）和 JSON Lines。
//! `end` 为空的行声明一个孤立顶点；格式错误的行计入错误数并跳过。

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Vertex};
use crate::types::Weight;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 导入选项
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// 生成有向图
    pub directed: bool,
    /// 读取权重列；关闭时所有边都是无权重边
    pub weighted: bool,
    /// CSV 第一行是表头
    pub has_headers: bool,
    /// CSV 分隔符
    pub delimiter: u8,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            directed: false,
            weighted: true,
            has_headers: true,
            delimiter: b',',
        }
    }
}

/// CSV 记录
#[derive(Debug, Deserialize)]
struct CsvEdgeRecord {
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    weight: Option<String>,
}

/// JSON Lines 记录
#[derive(Debug, Deserialize)]
struct JsonEdgeRecord {
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    weight: Option<Weight>,
}

/// 边列表导入器
pub struct EdgeListImporter {
    options: ImportOptions,
}

impl EdgeListImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let file = File::open(path)?;
        self.import_csv_reader(file)
    }

    /// 从任意 CSV 输入导入
    pub fn import_csv_reader<R: Read>(&self, reader: R) -> Result<(Graph, ImportStats)> {
        let start = Instant::now();
        let mut reader = ReaderBuilder::new()
            .has_headers(self.options.has_headers)
            .delimiter(self.options.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut graph = self.empty_graph();
        let mut stats = ImportStats::default();

        for (row, record) in reader.deserialize::<CsvEdgeRecord>().enumerate() {
            let outcome = record.map_err(Error::from).and_then(|record| {
                let weight = match record.weight.as_deref().map(str::trim) {
                    Some(raw) if !raw.is_empty() => Some(parse_weight(raw)?),
                    _ => None,
                };
                self.apply(&mut graph, &record.start, record.end.as_deref(), weight)
            });
            self.tally(&mut stats, row + 1, outcome);
        }

        Ok(self.finish(graph, stats, start))
    }

    /// 从 JSON Lines 文件导入，每行一个 `{"start": .., "end": .., "weight": ..}`
    pub fn import_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<(Graph, ImportStats)> {
        let start = Instant::now();
        let reader = BufReader::new(File::open(path)?);

        let mut graph = self.empty_graph();
        let mut stats = ImportStats::default();

        for (row, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let outcome = serde_json::from_str::<JsonEdgeRecord>(&line)
                .map_err(|e| Error::ParseError(format!("JSON 解析错误: {}", e)))
                .and_then(|record| {
                    self.apply(&mut graph, &record.start, record.end.as_deref(), record.weight)
                });
            self.tally(&mut stats, row + 1, outcome);
        }

        Ok(self.finish(graph, stats, start))
    }

    fn empty_graph(&self) -> Graph {
        Graph::new(self.options.directed, self.options.weighted)
    }

    /// 把一条记录写入图，返回是否插入了新边
    fn apply(
        &self,
        graph: &mut Graph,
        start: &str,
        end: Option<&str>,
        weight: Option<Weight>,
    ) -> Result<bool> {
        let start = Vertex::new(start)?;
        match end.map(str::trim).filter(|end| !end.is_empty()) {
            None => {
                graph.add_vertex(start);
                Ok(false)
            }
            Some(end) => {
                let end = Vertex::new(end)?;
                let edge = match weight {
                    Some(weight) if self.options.weighted => Edge::weighted(start, end, weight),
                    _ => Edge::new(start, end),
                };
                Ok(graph.add_edge(edge))
            }
        }
    }

    fn tally(&self, stats: &mut ImportStats, row: usize, outcome: Result<bool>) {
        match outcome {
            Ok(true) => stats.edges_imported += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping malformed edge record");
                stats.errors += 1;
            }
        }
    }

    fn finish(&self, graph: Graph, mut stats: ImportStats, start: Instant) -> (Graph, ImportStats) {
        stats.vertices_imported = graph.vertices_count();
        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            duration_ms = stats.duration_ms,
            "edge list imported"
        );
        (graph, stats)
    }
}

fn parse_weight(raw: &str) -> Result<Weight> {
    Weight::from_str(raw).map_err(|e| Error::ParseError(format!("无效的权重 {:?}: {}", raw, e)))
}

/// 用给定选项从 CSV 文件导入
pub fn import_csv<P: AsRef<Path>>(path: P, options: ImportOptions) -> Result<(Graph, ImportStats)> {
    EdgeListImporter::new(options).import_csv(path)
}

/// 用给定选项从 JSON Lines 文件导入
pub fn import_jsonl<P: AsRef<Path>>(path: P, options: ImportOptions) -> Result<(Graph, ImportStats)> {
    EdgeListImporter::new(options).import_jsonl(path)
}
