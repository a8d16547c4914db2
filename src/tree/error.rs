/// Malformed tree specification.
///
/// Raised once while building a [`GameTree`](super::GameTree), never during a search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeFormatError {
    #[error("node at {path} has no id")]
    MissingId { path: String },

    #[error("duplicate node id '{0}'")]
    DuplicateId(String),

    #[error("internal node '{0}' carries a static value")]
    ValueOnInternalNode(String),

    #[error("leaf node '{0}' has no value")]
    LeafWithoutValue(String),

    #[error("node '{id}' has non-finite value {value}")]
    NonFiniteValue { id: String, value: f64 },

    #[error("node '{id}' at depth {depth} exceeds the depth limit of {limit}")]
    TooDeep { id: String, depth: usize, limit: usize },
}
