use std::fmt;

use trailblazer_core::NodeId;

/// Collaborator contract violations detected during a search.
///
/// An unreachable goal is not an error: searches report it with an empty
/// [`Route`](crate::Route).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A start, end or neighbor id lies outside the network.
    UnknownNode(NodeId),
    /// The network listed `to` as a neighbor of `from` but has no road
    /// between them.
    MissingEdge { from: NodeId, to: NodeId },
    /// A road cost is negative or NaN.
    InvalidCost { from: NodeId, to: NodeId, cost: f64 },
    /// The maximum road speed is not strictly positive.
    InvalidSpeed(f64),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(n) => write!(f, "search: unknown node {n}"),
            Self::MissingEdge { from, to } => {
                write!(f, "search: {to} is a neighbor of {from} but no road joins them")
            }
            Self::InvalidCost { from, to, cost } => {
                write!(f, "search: road {from} - {to} has invalid cost {cost}")
            }
            Self::InvalidSpeed(s) => write!(f, "search: invalid maximum road speed {s}"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_nodes() {
        let err = SearchError::MissingEdge {
            from: NodeId(1),
            to: NodeId(4),
        };
        assert_eq!(err.to_string(), "search: n4 is a neighbor of n1 but no road joins them");
        assert_eq!(
            SearchError::InvalidSpeed(0.0).to_string(),
            "search: invalid maximum road speed 0"
        );
    }
}
