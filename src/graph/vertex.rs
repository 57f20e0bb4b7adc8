//! 顶点定义
//!
//! 顶点只由标签标识，相等与排序都按标签进行

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// 顶点（创建后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vertex {
    label: String,
}

impl Vertex {
    /// 创建新顶点，标签不能为空或只包含空白
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(Error::InvalidArgument("顶点标签不能为空".to_string()));
        }
        Ok(Self { label })
    }

    /// 获取顶点标签
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// 哈希与比较都只看标签，因此集合可以直接按 `&str` 查找
impl Borrow<str> for Vertex {
    fn borrow(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
