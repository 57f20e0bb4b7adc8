//! 结果打印器
//!
//! 把 `CommandOutput` 渲染成表格或逐行的键值块

use super::commands::CommandOutput;
use crate::types::Weight;
use prettytable::format::{self, Alignment};
use prettytable::{Cell, Row, Table};
use std::str::FromStr;
use std::time::Duration;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    Table,
    /// 每行输出为一个 `列名 = 值` 块，适合很长的路径
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 渲染命令输出，末尾附上行数、耗时和 summary
    pub fn render(&self, output: &CommandOutput, elapsed: Duration) -> String {
        let mut text = if output.rows.is_empty() {
            String::from("(no rows)\n")
        } else {
            match self.mode {
                PrintMode::Table => render_table(output),
                PrintMode::Vertical => render_blocks(output),
            }
        };

        text.push_str(&format!(
            "{} row(s), {:.3} ms\n",
            output.rows.len(),
            elapsed.as_secs_f64() * 1000.0
        ));
        if let Some(summary) = &output.summary {
            text.push_str(summary);
            text.push('\n');
        }
        text
    }
}

/// 数值（长度、权重、序号）右对齐
fn cell(value: &str) -> Cell {
    if Weight::from_str(value).is_ok() {
        Cell::new_align(value, Alignment::RIGHT)
    } else {
        Cell::new(value)
    }
}

fn render_table(output: &CommandOutput) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(output.columns.iter().map(|column| Cell::new(column)).collect()));
    for row in &output.rows {
        table.add_row(Row::new(row.iter().map(|value| cell(value)).collect()));
    }
    table.to_string()
}

fn render_blocks(output: &CommandOutput) -> String {
    let width = output.columns.iter().map(|column| column.chars().count()).max().unwrap_or(0);
    let mut text = String::new();
    for (index, row) in output.rows.iter().enumerate() {
        text.push_str(&format!("-- row {} --\n", index + 1));
        for (column, value) in output.columns.iter().zip(row) {
            text.push_str(&format!("{:<width$} = {}\n", column, value, width = width));
        }
    }
    text
}
