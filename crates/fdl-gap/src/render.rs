//! Text and Markdown renderings. JSON comes straight from `serde`.
//!
//! Output depends only on the tree, so an unchanged project renders
//! byte-identically.

use std::fmt::Write as _;

use fdl_core::enums::ChainStatus;

use crate::node::{ChainNode, ChainTree};

#[must_use]
pub fn text(tree: &ChainTree) -> String {
    let mut out = String::new();
    text_node(&tree.root, "", "", &mut out);

    if !tree.remediation.is_empty() {
        out.push_str("\nRemediation:\n");
        for (i, r) in tree.remediation.iter().enumerate() {
            let _ = writeln!(out, "{}. {} {} ({})", i + 1, r.action, r.path, r.note);
        }
    }

    out.push('\n');
    out.push_str(&summary(tree));
    out.push('\n');
    out
}

fn text_node(node: &ChainNode, lead: &str, child_lead: &str, out: &mut String) {
    let _ = write!(out, "{lead}{}: {}", node.id, node.status);
    if let Some(title) = &node.title {
        let _ = write!(out, " - {title}");
    }
    out.push('\n');
    for gap in &node.gaps {
        let _ = writeln!(out, "{child_lead}  gap: {gap}");
    }

    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, next) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        text_node(
            child,
            &format!("{child_lead}{branch}"),
            &format!("{child_lead}{next}"),
            out,
        );
    }
}

#[must_use]
pub fn markdown(tree: &ChainTree) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Traceability: {}\n", tree.root.id);
    markdown_node(&tree.root, 0, &mut out);

    if !tree.remediation.is_empty() {
        out.push_str("\n## Remediation\n\n");
        for (i, r) in tree.remediation.iter().enumerate() {
            let _ = writeln!(out, "{}. {} `{}`: {}", i + 1, r.action, r.path, r.note);
        }
    }

    out.push('\n');
    out.push_str(&summary(tree));
    out.push('\n');
    out
}

fn markdown_node(node: &ChainNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}- **{}** ({}): {}", node.id, node.kind, node.status);
    if let Some(title) = &node.title {
        let _ = write!(out, " - {title}");
    }
    out.push('\n');
    for gap in &node.gaps {
        let _ = writeln!(out, "{indent}  - _gap_: {gap}");
    }
    for child in &node.children {
        markdown_node(child, depth + 1, out);
    }
}

fn summary(tree: &ChainTree) -> String {
    if tree.chain_complete {
        format!("Chain complete: {} nodes", tree.root.node_count())
    } else {
        let label = match tree.root.status {
            ChainStatus::Missing => "Chain missing elements",
            ChainStatus::Complete | ChainStatus::Partial => "Chain has gaps",
        };
        format!(
            "{label}: {} of {} nodes complete",
            tree.root.complete_count(),
            tree.root.node_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use fdl_core::enums::NodeKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::remediation::Remediation;

    fn node(id: &str, kind: NodeKind, status: ChainStatus, children: Vec<ChainNode>) -> ChainNode {
        ChainNode {
            id: id.into(),
            kind,
            status,
            exists: true,
            path: format!("{id}.md"),
            title: None,
            gaps: vec![],
            children,
        }
    }

    fn sample() -> ChainTree {
        let mut sys = node("SYS-REQ-001", NodeKind::SysReq, ChainStatus::Missing, vec![]);
        sys.gaps.push("no refined_in or traces_to links".into());
        let other = node("SYS-REQ-002", NodeKind::SysReq, ChainStatus::Complete, vec![node(
            "SW-REQ-002",
            NodeKind::SwReq,
            ChainStatus::Complete,
            vec![],
        )]);
        let root = node("US-A1", NodeKind::Us, ChainStatus::Complete, vec![sys, other]);
        ChainTree::new(
            root,
            vec![Remediation {
                action: "create",
                path: "requirements/SW-REQ-001.md".into(),
                note: "software requirement refining SYS-REQ-001".into(),
            }],
        )
    }

    #[test]
    fn text_tree_layout() {
        let expected = "\
US-A1: COMPLETE
├── SYS-REQ-001: MISSING
│     gap: no refined_in or traces_to links
└── SYS-REQ-002: COMPLETE
    └── SW-REQ-002: COMPLETE

Remediation:
1. create requirements/SW-REQ-001.md (software requirement refining SYS-REQ-001)

Chain has gaps: 3 of 4 nodes complete
";
        assert_eq!(text(&sample()), expected);
    }

    #[test]
    fn markdown_nests_children() {
        let md = markdown(&sample());
        assert!(md.starts_with("# Traceability: US-A1\n\n- **US-A1** (US): COMPLETE\n"));
        assert!(md.contains("\n  - **SYS-REQ-001** (SYS-REQ): MISSING\n    - _gap_: no refined_in"));
        assert!(md.contains("\n    - **SW-REQ-002** (SW-REQ): COMPLETE\n"));
        assert!(md.contains("## Remediation\n\n1. create `requirements/SW-REQ-001.md`"));
    }
}
