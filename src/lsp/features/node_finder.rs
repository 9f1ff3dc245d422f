//! Smallest-node searches over an info tree
//!
//! "Smallest" means deepest: a node only matches when none of its descendants
//! do. Children are always visited before their parent, in child order, so
//! the leftmost deepest match comes first.

use std::ops::Range;
use std::sync::Arc;

use tracing::trace;

use crate::error::QueryError;
use crate::ir::info::{ContextInfo, Info};
use crate::ir::info_tree::InfoTree;
use crate::ir::syntax::Pos;

/// An info together with the innermost context it was elaborated in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedInfo {
    pub ctx: Arc<ContextInfo>,
    pub info: Info,
}

impl LocatedInfo {
    pub fn width(&self) -> Result<usize, QueryError> {
        self.info.width()
    }

    pub fn range(&self) -> Option<Range<Pos>> {
        self.info.range()
    }
}

/// Find the leftmost deepest node whose info satisfies `pred`
///
/// Context wrappers on the path to the match are kept, so the caller still
/// knows which context the node lives in.
///
/// # Arguments
/// * `tree` - Tree to search
/// * `pred` - Predicate over node infos
///
/// # Returns
/// The matching subtree (children included), or `None`
pub fn smallest_node<F>(tree: &InfoTree, pred: F) -> Option<InfoTree>
where
    F: Fn(&Info) -> bool,
{
    smallest_node_rec(tree, &pred)
}

fn smallest_node_rec<F>(tree: &InfoTree, pred: &F) -> Option<InfoTree>
where
    F: Fn(&Info) -> bool,
{
    match tree {
        InfoTree::Context(ctx, child) => smallest_node_rec(child, pred)
            .map(|found| InfoTree::Context(Arc::clone(ctx), Arc::new(found))),
        InfoTree::Node(info, children) => children
            .iter()
            .find_map(|child| smallest_node_rec(child, pred))
            .or_else(|| pred(info).then(|| tree.clone())),
        InfoTree::Leaf => None,
    }
}

/// Find every deepest node whose info satisfies `pred`, in document order
///
/// Context wrappers are transparent and are not reattached to the results.
pub fn smallest_nodes<F>(tree: &InfoTree, pred: F) -> Vec<InfoTree>
where
    F: Fn(&Info) -> bool,
{
    let mut out = Vec::new();
    smallest_nodes_rec(tree, &pred, &mut out);
    out
}

fn smallest_nodes_rec<F>(tree: &InfoTree, pred: &F, out: &mut Vec<InfoTree>)
where
    F: Fn(&Info) -> bool,
{
    match tree {
        InfoTree::Context(_, child) => smallest_nodes_rec(child, pred, out),
        InfoTree::Node(info, children) => {
            let before = out.len();
            for child in children {
                smallest_nodes_rec(child, pred, out);
            }
            if out.len() == before && pred(info) {
                out.push(tree.clone());
            }
        }
        InfoTree::Leaf => {}
    }
}

/// Same traversal as [`smallest_nodes`], pairing each match with its innermost context
///
/// Matches outside any context wrapper are paired with one shared, empty root
/// context.
pub fn smallest_infos<F>(tree: &InfoTree, pred: F) -> Vec<LocatedInfo>
where
    F: Fn(&Info) -> bool,
{
    let mut matches = Vec::new();
    smallest_infos_rec(tree, None, &pred, &mut matches);

    let mut root_ctx: Option<Arc<ContextInfo>> = None;
    matches
        .into_iter()
        .map(|(ctx, info)| {
            let ctx = ctx.unwrap_or_else(|| {
                trace!("No enclosing context for {}, using root context", info);
                Arc::clone(root_ctx.get_or_insert_with(Arc::default))
            });
            LocatedInfo { ctx, info }
        })
        .collect()
}

fn smallest_infos_rec<F>(
    tree: &InfoTree,
    ctx: Option<&Arc<ContextInfo>>,
    pred: &F,
    out: &mut Vec<(Option<Arc<ContextInfo>>, Info)>,
) where
    F: Fn(&Info) -> bool,
{
    match tree {
        InfoTree::Context(inner, child) => smallest_infos_rec(child, Some(inner), pred, out),
        InfoTree::Node(info, children) => {
            let before = out.len();
            for child in children {
                smallest_infos_rec(child, ctx, pred, out);
            }
            if out.len() == before && pred(info) {
                out.push((ctx.cloned(), info.clone()));
            }
        }
        InfoTree::Leaf => {}
    }
}
