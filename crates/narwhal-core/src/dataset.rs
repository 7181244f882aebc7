//! Serialized form of a precomputed diff.
//!
//! The match itself is produced elsewhere; this module only describes its shape so it can be
//! loaded with `serde_json` and validated while the [`Topology`](crate::Topology) is built.

use crate::address::Address;
use crate::error::Result;
use crate::model::{GraphFlavor, MatchKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffDataset {
    #[serde(default)]
    pub flavor: GraphFlavor,
    pub primary: SideDataset,
    pub secondary: SideDataset,
    #[serde(default)]
    pub matches: Vec<NodeMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideDataset {
    /// Function name (flow graphs).
    #[serde(default)]
    pub name: Option<String>,
    /// Executable image name (call graphs).
    #[serde(default)]
    pub image_name: Option<String>,
    /// Function address (flow graphs). Absent for a side that has no function in this view.
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub address: Address,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub source: Address,
    pub target: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMatch {
    pub primary: Address,
    pub secondary: Address,
    pub kind: MatchKind,
}

impl DiffDataset {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl SideDataset {
    pub fn node(mut self, address: u64, label: impl Into<String>) -> Self {
        self.nodes.push(NodeRecord {
            address: Address(address),
            label: label.into(),
        });
        self
    }

    pub fn edge(mut self, source: u64, target: u64) -> Self {
        self.edges.push(EdgeRecord {
            source: Address(source),
            target: Address(target),
        });
        self
    }
}
