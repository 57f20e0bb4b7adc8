//! 并查集
//!
//! 基于下标数组，路径压缩 + 按大小合并。

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// 并查集
#[derive(Debug, Clone, Default)]
pub struct UnionFind<K> {
    /// 下标 -> 键
    keys: Vec<K>,
    /// 键 -> 下标
    indexes: HashMap<K, usize>,
    parents: Vec<usize>,
    sizes: Vec<usize>,
}

impl<K> UnionFind<K>
where
    K: Hash + Eq + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            indexes: HashMap::new(),
            parents: Vec::new(),
            sizes: Vec::new(),
        }
    }

    /// 新建只含 key 的集合，key 已存在时失败
    pub fn create(&mut self, key: K) -> Result<()> {
        if self.indexes.contains_key(&key) {
            return Err(Error::InvalidArgument(format!("{:?} 已存在于并查集中", key)));
        }
        let index = self.keys.len();
        self.indexes.insert(key.clone(), index);
        self.keys.push(key);
        self.parents.push(index);
        self.sizes.push(1);
        Ok(())
    }

    /// 返回 key 所在集合的代表元
    pub fn find(&mut self, key: &K) -> Result<K> {
        let index = self.index_of(key)?;
        let root = self.root(index);
        Ok(self.keys[root].clone())
    }

    /// 合并 a 和 b 所在的集合，已在同一集合时什么也不做
    ///
    /// 返回是否发生了合并。
    pub fn union(&mut self, a: &K, b: &K) -> Result<bool> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        let (root_a, root_b) = (self.root(a), self.root(b));
        if root_a == root_b {
            return Ok(false);
        }

        let (child, parent) = if self.sizes[root_a] > self.sizes[root_b] {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        self.parents[child] = parent;
        self.sizes[parent] += self.sizes[child];
        Ok(true)
    }

    /// a 和 b 是否在同一集合
    pub fn connected(&mut self, a: &K, b: &K) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.indexes.contains_key(key)
    }

    /// 元素数量
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn index_of(&self, key: &K) -> Result<usize> {
        self.indexes
            .get(key)
            .copied()
            .ok_or_else(|| Error::UnknownKey(format!("{:?}", key)))
    }

    fn root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        let mut current = index;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }
        root
    }
}
