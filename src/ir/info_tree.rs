//! The elaboration info tree
//!
//! An `InfoTree` is built once per elaborated command and never mutated.
//! Children live in a [`PersistentSequence`] and context wrappers are shared
//! through `Arc`, so cloning any subtree is O(1) and the whole structure is
//! `Send + Sync`.

use std::sync::Arc;

use super::info::{ContextInfo, Info};
use super::persistent_seq::PersistentSequence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoTree {
    /// Scoping wrapper. Everything below runs in this context. Never a match itself.
    Context(Arc<ContextInfo>, Arc<InfoTree>),
    /// Annotated node. A child's range lies inside its parent's when both are defined.
    Node(Info, PersistentSequence<InfoTree>),
    /// Placeholder for info that is still being elaborated; never matches
    Leaf,
}

impl InfoTree {
    pub fn node(info: Info, children: impl IntoIterator<Item = InfoTree>) -> Self {
        InfoTree::Node(info, children.into_iter().collect())
    }

    pub fn context(ctx: ContextInfo, child: InfoTree) -> Self {
        InfoTree::Context(Arc::new(ctx), Arc::new(child))
    }

    /// Wrap in an already shared context
    pub fn with_context(ctx: Arc<ContextInfo>, child: InfoTree) -> Self {
        InfoTree::Context(ctx, Arc::new(child))
    }

    pub fn leaf() -> Self {
        InfoTree::Leaf
    }

    /// Info of the node under any context wrappers
    pub fn info(&self) -> Option<&Info> {
        match self {
            InfoTree::Context(_, child) => child.info(),
            InfoTree::Node(info, _) => Some(info),
            InfoTree::Leaf => None,
        }
    }

    pub fn children(&self) -> Option<&PersistentSequence<InfoTree>> {
        match self {
            InfoTree::Context(_, child) => child.children(),
            InfoTree::Node(_, children) => Some(children),
            InfoTree::Leaf => None,
        }
    }

    /// Pre-order fold over every info, paired with its innermost enclosing context
    pub fn fold_info<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, Option<&Arc<ContextInfo>>, &Info) -> B,
    {
        self.fold_info_in(None, init, &mut f)
    }

    fn fold_info_in<B, F>(&self, ctx: Option<&Arc<ContextInfo>>, acc: B, f: &mut F) -> B
    where
        F: FnMut(B, Option<&Arc<ContextInfo>>, &Info) -> B,
    {
        match self {
            InfoTree::Context(inner, child) => child.fold_info_in(Some(inner), acc, f),
            InfoTree::Node(info, children) => {
                let acc = f(acc, ctx, info);
                children
                    .iter()
                    .fold(acc, |acc, child| child.fold_info_in(ctx, acc, f))
            }
            InfoTree::Leaf => acc,
        }
    }

    /// Number of `Node`s in the tree
    pub fn size(&self) -> usize {
        self.fold_info(0, |n, _, _| n + 1)
    }
}
