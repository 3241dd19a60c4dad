//! Batch files: a list of named items with tiers, loaded from TOML.
//!
//! ```toml
//! [[item]]
//! name = "Lacey"
//! tier = "normal"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Sequence, Tier};
use crate::queue::StablePriorityQueue;
use crate::ranking::Ranking;

/// Top-level TOML wrapper.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BatchFile {
    #[serde(default)]
    item: Vec<BatchItem>,
}

/// One item to enqueue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchItem {
    pub name: String,
    pub tier: Tier,
}

/// Items in file order. File order is admission order.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    items: Vec<BatchItem>,
}

impl Batch {
    pub fn new(items: Vec<BatchItem>) -> Self {
        Self { items }
    }

    /// Parse a batch from TOML text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        let file: BatchFile = toml::from_str(content)
            .map_err(|e| Error::Batch(format!("bad batch file {origin}: {e}")))?;
        Ok(Self { items: file.item })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Batch(format!("cannot read batch file {}: {e}", path.display()))
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push every item into `queue` in file order.
    pub fn enqueue_into<R>(
        &self,
        queue: &mut StablePriorityQueue<String, R>,
    ) -> Result<Vec<Sequence>>
    where
        R: Ranking<Tier = Tier>,
    {
        self.items
            .iter()
            .map(|item| queue.push(item.name.clone(), item.tier))
            .collect()
    }
}
