//! 命令行支持模块

pub mod commands;
pub mod printer;

pub use commands::{AlgorithmCommand, CommandOutput};
pub use printer::{PrintMode, Printer};
