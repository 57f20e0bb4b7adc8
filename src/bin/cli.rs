//! GraphAlgo CLI 工具
//!
//! 从边列表文件加载图并运行一个算法

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use graphalgo::cli::{AlgorithmCommand, PrintMode, Printer};
use graphalgo::import::{EdgeListImporter, ImportOptions};
use graphalgo::metrics;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphalgo-cli")]
#[command(about = "GraphAlgo 图算法命令行工具")]
struct Args {
    /// 边列表文件
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, jsonl
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// 按有向图加载
    #[arg(short, long)]
    directed: bool,

    /// 忽略权重列
    #[arg(long)]
    unweighted: bool,

    /// CSV 没有表头
    #[arg(long)]
    no_headers: bool,

    /// CSV 分隔符
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 垂直显示结果
    #[arg(long)]
    vertical: bool,

    /// 结束后输出 Prometheus 格式的指标
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: AlgorithmCommand,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{} {:#}", "错误:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.delimiter.is_ascii() {
        bail!("分隔符必须是 ASCII 字符: {:?}", args.delimiter);
    }
    let options = ImportOptions {
        directed: args.directed,
        weighted: !args.unweighted,
        has_headers: !args.no_headers,
        delimiter: args.delimiter as u8,
    };

    let importer = EdgeListImporter::new(options);
    let (graph, stats) = match args.format.as_str() {
        "csv" => importer.import_csv(&args.input),
        "jsonl" | "json" => importer.import_jsonl(&args.input),
        other => bail!("不支持的格式: {}", other),
    }
    .with_context(|| format!("无法加载 {}", args.input.display()))?;

    if stats.errors > 0 {
        eprintln!(
            "{} 跳过了 {} 条格式错误的记录",
            "警告:".yellow().bold(),
            stats.errors
        );
    }

    let started = Instant::now();
    let output = args
        .command
        .execute(&graph)
        .with_context(|| format!("{} 执行失败", args.command.name()))?;
    let elapsed = started.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mode = if args.vertical {
            PrintMode::Vertical
        } else {
            PrintMode::Table
        };
        print!("{}", Printer::new(mode).render(&output, elapsed));
    }

    if args.metrics {
        print!("{}", metrics::global_metrics().to_prometheus().content);
    }
    Ok(())
}
