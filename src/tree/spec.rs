//! External tree specification
//!
//! The recursive `{ id, value?, children? }` structure a tree is built from.
//! Tree files hold either the bare root specification or the wrapped
//! `{ "root": { ... } }` form.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// Recursive node specification.
///
/// `id` is optional here so that a missing id is reported as a
/// [`TreeFormatError`](super::TreeFormatError) by the builder instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSpec>,
}

impl TreeSpec {
    /// Terminal position with a static payoff.
    pub fn leaf(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: Some(id.into()),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// Decision node with ordered children.
    pub fn node(id: impl Into<String>, children: Vec<TreeSpec>) -> Self {
        Self {
            id: Some(id.into()),
            value: None,
            children,
        }
    }
}

/// Contents of a tree file.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeDocument {
    Wrapped { root: TreeSpec },
    Bare(TreeSpec),
}

#[derive(Deserialize)]
struct RootKey {
    #[serde(default)]
    root: Option<IgnoredAny>,
}

#[derive(Deserialize)]
struct Wrapped {
    root: TreeSpec,
}

impl TreeDocument {
    /// Parses either form. The presence of a top-level `root` key picks the
    /// wrapped form, then the text is parsed again as that form so errors
    /// carry the line and column of the offending field.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let probe: RootKey = serde_json::from_str(json)?;
        if probe.root.is_some() {
            let wrapped: Wrapped = serde_json::from_str(json)?;
            Ok(TreeDocument::Wrapped { root: wrapped.root })
        } else {
            Ok(TreeDocument::Bare(serde_json::from_str(json)?))
        }
    }

    pub fn into_root(self) -> TreeSpec {
        match self {
            TreeDocument::Wrapped { root } => root,
            TreeDocument::Bare(root) => root,
        }
    }
}
