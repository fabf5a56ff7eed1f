use std::fmt::Write as _;

use anyhow::{Context, bail};
use fdl_gap::{ChainBuilder, ChainTree, RootOutcome, render};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TreeArgs;
use crate::context::AppContext;
use crate::output::{Report, output};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TreeResponse {
    Single(ChainTree),
    All(Vec<RootOutcome>),
}

impl TreeResponse {
    fn render_with(&self, one: fn(&ChainTree) -> String) -> String {
        match self {
            Self::Single(tree) => one(tree),
            Self::All(outcomes) if outcomes.is_empty() => "No user stories found".to_string(),
            Self::All(outcomes) => {
                let mut out = String::new();
                for (i, outcome) in outcomes.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    match (&outcome.tree, &outcome.error) {
                        (Some(tree), _) => out.push_str(&one(tree)),
                        (None, error) => {
                            let _ = writeln!(
                                out,
                                "{}: error: {}",
                                outcome.root,
                                error.as_deref().unwrap_or("unknown failure")
                            );
                        }
                    }
                }
                out
            }
        }
    }
}

impl Report for TreeResponse {
    fn text(&self) -> String {
        self.render_with(render::text)
    }

    fn markdown(&self) -> String {
        self.render_with(render::markdown)
    }
}

/// Handle `fdl tree`. Gaps are reported, not failed; a cycle or depth
/// overflow exits non-zero.
pub fn handle(args: &TreeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let max_depth = args.max_depth.unwrap_or(ctx.config.gap.max_depth);
    if max_depth == 0 {
        bail!("invalid --max-depth 0: must be at least 1");
    }

    let index = ctx.scan(None, None)?;
    let builder = ChainBuilder::new(&index, max_depth);

    if let Some(root) = &args.root {
        let tree = builder
            .build(root)
            .with_context(|| format!("failed to build traceability tree for {root}"))?;
        return output(&TreeResponse::Single(tree), flags);
    }

    let outcomes = builder.build_all();
    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    output(&TreeResponse::All(outcomes), flags)?;
    if failed > 0 {
        bail!("tree: {failed} root(s) could not be traversed");
    }
    Ok(())
}
