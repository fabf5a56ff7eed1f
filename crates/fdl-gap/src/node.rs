use fdl_core::enums::{ChainStatus, NodeKind};
use serde::Serialize;

use crate::remediation::Remediation;

/// One artifact in a traceability tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainNode {
    pub id: String,
    pub kind: NodeKind,
    pub status: ChainStatus,
    pub exists: bool,
    /// Project-relative path, inferred when the artifact is absent.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub gaps: Vec<String>,
    pub children: Vec<ChainNode>,
}

impl ChainNode {
    /// Pre-order walk.
    pub fn walk(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    #[must_use]
    pub fn complete_count(&self) -> usize {
        self.walk()
            .filter(|n| n.status == ChainStatus::Complete)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainTree {
    pub root: ChainNode,
    /// Every node in the tree is COMPLETE.
    pub chain_complete: bool,
    pub remediation: Vec<Remediation>,
}

impl ChainTree {
    #[must_use]
    pub fn new(root: ChainNode, remediation: Vec<Remediation>) -> Self {
        let chain_complete = root.walk().all(|n| n.status == ChainStatus::Complete);
        Self {
            root,
            chain_complete,
            remediation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, status: ChainStatus, children: Vec<ChainNode>) -> ChainNode {
        ChainNode {
            id: id.to_string(),
            kind: NodeKind::Code,
            status,
            exists: true,
            path: id.to_string(),
            title: None,
            gaps: vec![],
            children,
        }
    }

    #[test]
    fn walk_is_pre_order() {
        let tree = node(
            "a",
            ChainStatus::Complete,
            vec![
                node("b", ChainStatus::Complete, vec![node("c", ChainStatus::Missing, vec![])]),
                node("d", ChainStatus::Complete, vec![]),
            ],
        );
        let ids: Vec<&str> = tree.walk().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.complete_count(), 3);
        assert!(!ChainTree::new(tree, vec![]).chain_complete);
    }
}
