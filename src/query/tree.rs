//! Boolean filter tree
//!
//! The filter expression of a query, as handed to the search backend.

use serde::{Deserialize, Serialize};

/// One node of a boolean filter expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterNode {
    /// Conjunction of child filters
    And(Vec<FilterNode>),
    /// Disjunction of child filters
    Or(Vec<FilterNode>),
    /// Inclusive integer range on a named field; low == high is an equality match
    Range { field: String, low: i64, high: i64 },
}

impl FilterNode {
    /// Build an AND node
    pub fn and(children: Vec<FilterNode>) -> Self {
        debug_assert!(!children.is_empty(), "AND node must have children");
        FilterNode::And(children)
    }

    /// Build an OR node
    pub fn or(children: Vec<FilterNode>) -> Self {
        debug_assert!(!children.is_empty(), "OR node must have children");
        FilterNode::Or(children)
    }

    /// Build an inclusive range on a field
    pub fn range(field: impl Into<String>, low: i64, high: i64) -> Self {
        FilterNode::Range {
            field: field.into(),
            low,
            high,
        }
    }

    /// Children of a composite node, empty slice for a leaf
    pub fn children(&self) -> &[FilterNode] {
        match self {
            FilterNode::And(children) | FilterNode::Or(children) => children,
            FilterNode::Range { .. } => &[],
        }
    }
}

/// A query's filter tree; the root is absent until filtering is applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryTree {
    root: Option<FilterNode>,
}

impl QueryTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree with the given root
    pub fn with_root(root: FilterNode) -> Self {
        Self { root: Some(root) }
    }

    /// The root node, if any
    pub fn root(&self) -> Option<&FilterNode> {
        self.root.as_ref()
    }

    /// Whether the tree has no root
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Conjoin a clause with the existing tree.
    ///
    /// An absent root becomes the clause itself; otherwise the old root is
    /// moved in unmodified as the first child of a new AND node. Existing
    /// nodes are never rewritten.
    pub fn and_with(self, clause: FilterNode) -> QueryTree {
        let root = match self.root {
            None => clause,
            Some(existing) => FilterNode::And(vec![existing, clause]),
        };
        QueryTree::with_root(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree = QueryTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_and_with_on_empty_tree_sets_root() {
        let clause = FilterNode::range("price", 10, 20);
        let tree = QueryTree::new().and_with(clause.clone());
        assert_eq!(tree.root(), Some(&clause));
    }

    #[test]
    fn test_and_with_wraps_existing_root() {
        let original = FilterNode::range("brand_idx", 3, 3);
        let clause = FilterNode::range("price", 10, 20);
        let tree = QueryTree::with_root(original.clone()).and_with(clause.clone());

        match tree.root() {
            Some(FilterNode::And(children)) => {
                assert_eq!(children.len(), 2);
                assert_eq!(children[0], original);
                assert_eq!(children[1], clause);
            }
            other => panic!("expected AND root, got {:?}", other),
        }
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        let leaf = FilterNode::range("price", 1, 2);
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_tree_serialization_round_trip() {
        let tree = QueryTree::with_root(FilterNode::and(vec![
            FilterNode::range("currency_idx", 7, 7),
            FilterNode::range("price", 17, 72),
        ]));
        let json = serde_json::to_string(&tree).unwrap();
        let back: QueryTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
