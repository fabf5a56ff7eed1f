//! Depth-first tree construction over an [`ArtifactIndex`].

use fdl_core::enums::{ChainStatus, NodeKind};
use fdl_core::errors::CoreError;
use fdl_core::ids;
use fdl_trace::ArtifactIndex;
use serde::Serialize;

use crate::error::GapError;
use crate::node::{ChainNode, ChainTree};
use crate::remediation;

/// Gap recorded for a requirement document without a front-matter block.
pub const NO_FRONTMATTER: &str = "no front-matter";

pub struct ChainBuilder<'a> {
    index: &'a ArtifactIndex,
    max_depth: usize,
}

/// Result of one root in a multi-root run. Failures are isolated per root.
#[derive(Debug, Serialize)]
pub struct RootOutcome {
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<ChainTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> ChainBuilder<'a> {
    #[must_use]
    pub const fn new(index: &'a ArtifactIndex, max_depth: usize) -> Self {
        Self { index, max_depth }
    }

    /// Build the tree below `root_id`.
    ///
    /// # Errors
    ///
    /// `GapError::Core(CoreError::CircularReference)` if an ID reappears on
    /// its own path; `GapError::DepthExceeded` past `max_depth` levels.
    pub fn build(&self, root_id: &str) -> Result<ChainTree, GapError> {
        let mut path = Vec::new();
        let root = self.visit(root_id.trim(), &mut path)?;
        let remediation = remediation::collect(&root, self.index.layout());
        Ok(ChainTree::new(root, remediation))
    }

    /// Build one tree per user story, in ID order.
    #[must_use]
    pub fn build_all(&self) -> Vec<RootOutcome> {
        self.index
            .requirements()
            .filter(|doc| doc.kind == NodeKind::Us)
            .map(|doc| match self.build(&doc.id) {
                Ok(tree) => RootOutcome {
                    root: doc.id.clone(),
                    tree: Some(tree),
                    error: None,
                },
                Err(error) => {
                    tracing::warn!(root = %doc.id, %error, "tree construction failed");
                    RootOutcome {
                        root: doc.id.clone(),
                        tree: None,
                        error: Some(error.to_string()),
                    }
                }
            })
            .collect()
    }

    fn visit(&self, id: &str, path: &mut Vec<String>) -> Result<ChainNode, GapError> {
        if let Some(start) = path.iter().position(|seen| same_node(seen, id)) {
            let mut cycle = path[start..].to_vec();
            cycle.push(id.to_string());
            return Err(CoreError::CircularReference { path: cycle }.into());
        }
        if path.len() > self.max_depth {
            let mut trail = path.clone();
            trail.push(id.to_string());
            return Err(GapError::DepthExceeded {
                limit: self.max_depth,
                path: trail,
            });
        }

        let kind = ids::classify_reference(id);
        tracing::trace!(%id, %kind, depth = path.len(), "visiting");
        match kind {
            NodeKind::Code => Ok(self.code_leaf(id)),
            NodeKind::Test => Ok(self.test_leaf(id)),
            NodeKind::Us | NodeKind::SysReq | NodeKind::SwReq => {
                path.push(id.to_string());
                let node = self.requirement(id, kind, path);
                path.pop();
                node
            }
        }
    }

    fn requirement(
        &self,
        id: &str,
        kind: NodeKind,
        path: &mut Vec<String>,
    ) -> Result<ChainNode, GapError> {
        let layout = self.index.layout();
        let Some(doc) = self.index.requirement(id) else {
            return Ok(ChainNode {
                id: id.to_string(),
                kind,
                status: ChainStatus::Missing,
                exists: false,
                path: layout.requirement_path(&format!("{id}.md")),
                title: None,
                gaps: vec![format!("requirement file not found: {id}")],
                children: Vec::new(),
            });
        };

        let mut children = Vec::new();
        for child in doc.children() {
            children.push(self.visit(child, path)?);
        }

        let mut gaps = Vec::new();
        let status = if children.is_empty() {
            gaps.push(match (doc.has_frontmatter, kind) {
                (false, _) => NO_FRONTMATTER.to_string(),
                (true, NodeKind::Us) => "no traces_to links".to_string(),
                (true, NodeKind::SysReq) => "no refined_in or traces_to links".to_string(),
                (true, _) => "no refined_in or tested_by links".to_string(),
            });
            ChainStatus::Missing
        } else {
            let present = children.iter().filter(|c| c.exists).count();
            if present == children.len() {
                ChainStatus::Complete
            } else if present == 0 {
                ChainStatus::Missing
            } else {
                ChainStatus::Partial
            }
        };

        Ok(ChainNode {
            id: doc.id.clone(),
            kind: doc.kind,
            status,
            exists: true,
            path: layout.display(&doc.path),
            title: doc.title.clone(),
            gaps,
            children,
        })
    }

    fn code_leaf(&self, reference: &str) -> ChainNode {
        let exists = self.index.code_exists(reference);
        leaf(
            reference,
            NodeKind::Code,
            exists,
            self.index.layout().code_path(reference),
            "code file not found",
        )
    }

    fn test_leaf(&self, reference: &str) -> ChainNode {
        let layout = self.index.layout();
        match self.index.find_test(reference) {
            Some(test) => leaf(reference, NodeKind::Test, true, layout.display(&test.path), ""),
            None => leaf(
                reference,
                NodeKind::Test,
                false,
                test_path_for(reference, layout),
                "test file not found",
            ),
        }
    }
}

fn leaf(id: &str, kind: NodeKind, exists: bool, path: String, gap: &str) -> ChainNode {
    ChainNode {
        id: id.to_string(),
        kind,
        status: if exists {
            ChainStatus::Complete
        } else {
            ChainStatus::Missing
        },
        exists,
        path,
        title: None,
        gaps: if exists {
            Vec::new()
        } else {
            vec![format!("{gap}: {id}")]
        },
        children: Vec::new(),
    }
}

/// References already rooted at the tests directory are kept as written.
fn test_path_for(reference: &str, layout: &fdl_trace::Layout) -> String {
    let reference = fdl_trace::layout::normalize_reference(reference);
    let prefix = layout.display(&layout.tests_dir);
    if reference.starts_with(&format!("{prefix}/")) {
        reference
    } else {
        layout.test_path(&reference)
    }
}

fn same_node(a: &str, b: &str) -> bool {
    a == b || ids::same_requirement(a, b)
}
