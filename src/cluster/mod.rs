//! Weighted, path-compressing union-find over document ids.
//!
//! The structure is sparse: ids register on first contact, so only
//! documents touched by at least one candidate edge occupy memory. The
//! parent map is insertion-ordered, which makes JSON dumps byte-identical
//! across runs of a deterministic pipeline.
//!
//! Persistence format: `{"parent": {"<id>": <parent_id>, ...}}` with keys
//! as decimal strings. Loading accepts parent values as JSON numbers or
//! numeric strings and reconstructs a structure with identical roots.

use crate::error::{DedupError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Disjoint-set forest with union by rank and path halving.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: IndexMap<u64, u64>,
    rank: HashMap<u64, u32>,
}

#[derive(Serialize)]
struct UnionFindDump<'a> {
    parent: &'a IndexMap<u64, u64>,
}

impl UnionFind {
    /// Empty forest; ids register lazily on first `find`/`union`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forest pre-registered with ids `0..n`, each its own root.
    pub fn make(n: u64) -> Self {
        let mut uf = Self::new();
        for i in 0..n {
            uf.parent.insert(i, i);
        }
        uf
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether any id has been registered.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Whether `x` has been registered.
    pub fn contains(&self, x: u64) -> bool {
        self.parent.contains_key(&x)
    }

    /// Representative of `x`, compressing the path by halving. Registers
    /// `x` as its own root if unseen.
    pub fn find(&mut self, x: u64) -> u64 {
        if !self.parent.contains_key(&x) {
            self.parent.insert(x, x);
            return x;
        }
        let mut x = x;
        loop {
            let p = self.parent[&x];
            if p == x {
                return x;
            }
            let gp = self.parent[&p];
            self.parent.insert(x, gp);
            x = gp;
        }
    }

    /// Representative of `x` without mutation. Unregistered ids are their
    /// own representative.
    pub fn root(&self, mut x: u64) -> u64 {
        while let Some(&p) = self.parent.get(&x) {
            if p == x {
                return x;
            }
            x = p;
        }
        x
    }

    /// Merge the classes of `x` and `y`. Returns `true` if a merge
    /// occurred, `false` if they were already joined.
    ///
    /// Union is by rank; on equal rank the numerically smaller root becomes
    /// the parent, keeping representatives reproducible.
    pub fn union(&mut self, x: u64, y: u64) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }

        let rank_x = self.rank.get(&rx).copied().unwrap_or(1);
        let rank_y = self.rank.get(&ry).copied().unwrap_or(1);
        let (parent, child) = match rank_x.cmp(&rank_y) {
            std::cmp::Ordering::Greater => (rx, ry),
            std::cmp::Ordering::Less => (ry, rx),
            std::cmp::Ordering::Equal => {
                let parent = rx.min(ry);
                self.rank.insert(parent, rank_x + 1);
                (parent, rx.max(ry))
            }
        };
        self.parent.insert(child, parent);
        true
    }

    /// Iterate `(id, representative)` for every registered id.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.parent.keys().map(|&k| (k, self.root(k)))
    }

    /// Persist the parent map as JSON.
    pub fn dump(&self, path: &Path) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &UnionFindDump {
            parent: &self.parent,
        })
        .map_err(std::io::Error::other)?;
        writer.flush()
    }

    /// Load a previously dumped parent map.
    ///
    /// Keys must be decimal strings; values may be JSON numbers or numeric
    /// strings. Ranks are not persisted: the loaded structure is
    /// semantically equal (identical roots), not structurally identical.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| DedupError::io(path, e))?;
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| DedupError::input(format!("invalid union-find JSON: {e}")))?;

        let parent_obj = value
            .get("parent")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| DedupError::input("union-find JSON missing \"parent\" object"))?;

        let mut parent = IndexMap::with_capacity(parent_obj.len());
        for (key, val) in parent_obj {
            let id: u64 = key
                .parse()
                .map_err(|_| DedupError::input(format!("non-numeric union-find key: {key:?}")))?;
            let p = match val {
                serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| {
                    DedupError::input(format!("union-find parent out of range: {n}"))
                })?,
                serde_json::Value::String(s) => s.parse().map_err(|_| {
                    DedupError::input(format!("non-numeric union-find parent: {s:?}"))
                })?,
                other => {
                    return Err(DedupError::input(format!(
                        "unexpected union-find parent value: {other}"
                    )))
                }
            };
            parent.insert(id, p);
        }

        Ok(Self {
            parent,
            rank: HashMap::new(),
        })
    }
}
