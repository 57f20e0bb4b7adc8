//! 性能指标收集模块
//!
//! 收集图构建与算法执行的计数和耗时，可导出为快照或 Prometheus 文本格式

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 算法统计
    algorithm_stats: AlgorithmStats,
    /// 图操作统计
    graph_stats: GraphStats,
    /// 启动时间
    start_time: Instant,
}

/// 算法统计
#[derive(Debug)]
struct AlgorithmStats {
    /// 总运行次数
    total_runs: AtomicU64,
    /// 失败次数
    failed_runs: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 慢运行次数（>1s）
    slow_runs: AtomicU64,
}

/// 图操作统计
#[derive(Debug)]
struct GraphStats {
    /// 顶点插入数
    vertices_inserted: AtomicU64,
    /// 边插入数
    edges_inserted: AtomicU64,
    /// 邻接表/邻接矩阵构建次数
    views_built: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 算法指标
    pub algorithm_runs: u64,
    pub algorithm_failures: u64,
    pub avg_algorithm_duration_ms: f64,
    pub slow_algorithm_runs: u64,

    // 图操作指标
    pub vertices_inserted: u64,
    pub edges_inserted: u64,
    pub views_built: u64,

    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            algorithm_stats: AlgorithmStats {
                total_runs: AtomicU64::new(0),
                failed_runs: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
                slow_runs: AtomicU64::new(0),
            },
            graph_stats: GraphStats {
                vertices_inserted: AtomicU64::new(0),
                edges_inserted: AtomicU64::new(0),
                views_built: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录算法开始
    pub fn record_algorithm_start(&self) -> AlgorithmTimer {
        self.algorithm_stats.total_runs.fetch_add(1, Ordering::Relaxed);
        AlgorithmTimer::new()
    }

    /// 记录算法结束
    pub fn record_algorithm_complete(&self, timer: AlgorithmTimer, success: bool) -> Duration {
        let duration = timer.elapsed();

        if !success {
            self.algorithm_stats.failed_runs.fetch_add(1, Ordering::Relaxed);
        }

        self.algorithm_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if duration.as_secs() >= 1 {
            self.algorithm_stats.slow_runs.fetch_add(1, Ordering::Relaxed);
        }
        duration
    }

    /// 记录顶点插入
    pub fn record_vertex_insert(&self) {
        self.graph_stats.vertices_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边插入
    pub fn record_edge_insert(&self) {
        self.graph_stats.edges_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录视图构建
    pub fn record_view_build(&self) {
        self.graph_stats.views_built.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let algorithm_runs = self.algorithm_stats.total_runs.load(Ordering::Relaxed);
        let total_duration_us = self.algorithm_stats.total_duration_us.load(Ordering::Relaxed);

        let avg_algorithm_duration_ms = if algorithm_runs > 0 {
            (total_duration_us as f64) / (algorithm_runs as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            algorithm_runs,
            algorithm_failures: self.algorithm_stats.failed_runs.load(Ordering::Relaxed),
            avg_algorithm_duration_ms,
            slow_algorithm_runs: self.algorithm_stats.slow_runs.load(Ordering::Relaxed),
            vertices_inserted: self.graph_stats.vertices_inserted.load(Ordering::Relaxed),
            edges_inserted: self.graph_stats.edges_inserted.load(Ordering::Relaxed),
            views_built: self.graph_stats.views_built.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();
        let mut content = String::new();

        let mut push = |name: &str, kind: &str, help: &str, value: String| {
            content.push_str(&format!("# HELP graphalgo_{} {}\n", name, help));
            content.push_str(&format!("# TYPE graphalgo_{} {}\n", name, kind));
            content.push_str(&format!("graphalgo_{} {}\n", name, value));
        };

        push(
            "algorithm_runs_total",
            "counter",
            "Total number of algorithm runs",
            snapshot.algorithm_runs.to_string(),
        );
        push(
            "algorithm_failures_total",
            "counter",
            "Number of failed algorithm runs",
            snapshot.algorithm_failures.to_string(),
        );
        push(
            "algorithm_duration_avg_ms",
            "gauge",
            "Average algorithm duration in milliseconds",
            format!("{:.2}", snapshot.avg_algorithm_duration_ms),
        );
        push(
            "slow_algorithm_runs_total",
            "counter",
            "Number of slow algorithm runs (>1s)",
            snapshot.slow_algorithm_runs.to_string(),
        );
        push(
            "vertices_inserted_total",
            "counter",
            "Total vertices inserted",
            snapshot.vertices_inserted.to_string(),
        );
        push(
            "edges_inserted_total",
            "counter",
            "Total edges inserted",
            snapshot.edges_inserted.to_string(),
        );
        push(
            "views_built_total",
            "counter",
            "Adjacency views built",
            snapshot.views_built.to_string(),
        );
        push(
            "uptime_seconds",
            "counter",
            "Uptime in seconds",
            snapshot.uptime_seconds.to_string(),
        );

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.algorithm_stats.total_runs.store(0, Ordering::Relaxed);
        self.algorithm_stats.failed_runs.store(0, Ordering::Relaxed);
        self.algorithm_stats.total_duration_us.store(0, Ordering::Relaxed);
        self.algorithm_stats.slow_runs.store(0, Ordering::Relaxed);

        self.graph_stats.vertices_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.edges_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.views_built.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 算法计时器
pub struct AlgorithmTimer {
    start: Instant,
}

impl AlgorithmTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_algorithm_start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = metrics.record_algorithm_complete(timer, true);
        assert!(elapsed >= Duration::from_millis(10));

        let timer = metrics.record_algorithm_start();
        metrics.record_algorithm_complete(timer, false);

        metrics.record_vertex_insert();
        metrics.record_edge_insert();
        metrics.record_edge_insert();
        metrics.record_view_build();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.algorithm_runs, 2);
        assert_eq!(snapshot.algorithm_failures, 1);
        assert!(snapshot.avg_algorithm_duration_ms >= 5.0);
        assert_eq!(snapshot.vertices_inserted, 1);
        assert_eq!(snapshot.edges_inserted, 2);
        assert_eq!(snapshot.views_built, 1);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_algorithm_start();
        metrics.record_edge_insert();

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("graphalgo_algorithm_runs_total 1"));
        assert!(prom.content.contains("# TYPE graphalgo_edges_inserted_total counter"));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_vertex_insert();
        metrics.record_algorithm_start();
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.vertices_inserted, 0);
        assert_eq!(snapshot.algorithm_runs, 0);
    }
}
