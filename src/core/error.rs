//! Error type shared by the core modules.

use thiserror::Error;

use super::tree::NodeId;

pub type Result<T> = std::result::Result<T, TreeError>;

/// Everything that can go wrong while building or editing the tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The input forest could not be decoded; nothing was projected.
    #[error("malformed fixture at {path}: {reason}")]
    MalformedFixture { path: String, reason: String },

    /// The fixture is not valid JSON at all.
    #[error("fixture is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The id does not belong to this forest.
    #[error("no node with id {0}")]
    UnknownNode(NodeId),

    /// The node was removed by an earlier delete.
    #[error("node {0} has been deleted")]
    Detached(NodeId),

    /// A delete answer arrived while no confirmation was pending.
    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_fixture_display_names_path() {
        let err = TreeError::MalformedFixture {
            path: "[0].children[1]".into(),
            reason: "missing `type`".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed fixture at [0].children[1]: missing `type`"
        );
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: TreeError = json_err.into();
        assert!(matches!(err, TreeError::Json(_)));
    }
}
