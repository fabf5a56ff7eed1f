//! Remediation list derived from a finished tree.

use fdl_core::enums::{ChainStatus, NodeKind};
use fdl_core::ids;
use fdl_trace::Layout;
use fdl_trace::naming::slugify;
use serde::Serialize;

use crate::builder::NO_FRONTMATTER;
use crate::node::ChainNode;

/// One file to create or fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remediation {
    pub action: &'static str,
    pub path: String,
    pub note: String,
}

impl Remediation {
    fn create(path: String, note: String) -> Self {
        Self {
            action: "create",
            path,
            note,
        }
    }

    fn edit(path: String, note: String) -> Self {
        Self {
            action: "edit",
            path,
            note,
        }
    }
}

/// Pre-order: parents before children, siblings in declaration order.
#[must_use]
pub fn collect(root: &ChainNode, layout: &Layout) -> Vec<Remediation> {
    let mut out = Vec::new();
    visit(root, None, layout, &mut out);
    out
}

fn visit(node: &ChainNode, parent: Option<&ChainNode>, layout: &Layout, out: &mut Vec<Remediation>) {
    if node.status == ChainStatus::Missing {
        if !node.exists {
            out.push(Remediation::create(node.path.clone(), absent_note(node, parent)));
        } else if node.gaps.iter().any(|g| g == NO_FRONTMATTER) {
            out.push(Remediation::edit(node.path.clone(), frontmatter_note(node)));
        } else if node.kind.is_requirement() && node.children.is_empty() {
            if let Some(next) = next_level(node, layout) {
                out.push(next);
            }
        }
    }
    for child in &node.children {
        visit(child, Some(node), layout, out);
    }
}

fn absent_note(node: &ChainNode, parent: Option<&ChainNode>) -> String {
    let what = match node.kind {
        NodeKind::Us => "user story",
        NodeKind::SysReq => "system requirement",
        NodeKind::SwReq => "software requirement",
        NodeKind::Code => "code file",
        NodeKind::Test => "test file",
    };
    match (parent, node.kind) {
        (Some(p), NodeKind::Test) => format!("{what} referenced by {}; include `Validates: {}`", p.id, p.id),
        (Some(p), _) => format!("{what} referenced by {}", p.id),
        (None, _) => format!("{what} {} does not exist", node.id),
    }
}

fn frontmatter_note(node: &ChainNode) -> String {
    let links = match node.kind {
        NodeKind::Us => "traces_to",
        NodeKind::SysReq => "refined_in or traces_to",
        _ => "refined_in and tested_by",
    };
    format!("add front-matter to {} with id: {} and its {links} links", node.path, node.id)
}

/// The artifact one level below a requirement that declares no children.
fn next_level(node: &ChainNode, layout: &Layout) -> Option<Remediation> {
    let suffix = ids::requirement_suffix(&node.id)?;
    match node.kind {
        NodeKind::Us => {
            let id = ids::requirement_id(NodeKind::SysReq, suffix)?;
            Some(Remediation::create(
                layout.requirement_path(&format!("{id}.md")),
                format!("system requirement for {}; list {id} in its traces_to", node.id),
            ))
        }
        NodeKind::SysReq => {
            let id = ids::requirement_id(NodeKind::SwReq, suffix)?;
            Some(Remediation::create(
                layout.requirement_path(&format!("{id}.md")),
                format!("software requirement refining {}; list {id} in its refined_in", node.id),
            ))
        }
        NodeKind::SwReq => {
            let slug = node.title.as_deref().map_or_else(|| "component".to_string(), slugify);
            let file_name = format!("TC-UT-{suffix}_{slug}.{}", layout.test_extension());
            Some(Remediation::create(
                layout.test_path(&file_name),
                format!(
                    "unit test with `Validates: {}`; list {file_name} in its tested_by",
                    node.id
                ),
            ))
        }
        NodeKind::Code | NodeKind::Test => None,
    }
}
