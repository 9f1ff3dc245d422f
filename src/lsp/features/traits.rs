//! Contracts for the services hover rendering depends on
//!
//! Type inference and pretty-printing need the elaborator's full environment,
//! which this crate does not own. The host implements [`MetaService`]; the
//! renderer only ever talks to one [`MetaSession`] at a time, scoped to the
//! context and local variables of the info being rendered.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! let renderer = HoverRenderer::new(Arc::new(ElabMetaService::new(env)), Arc::new(docs));
//! let markdown = renderer.render(&located.ctx, &located.info).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::MetaError;
use crate::ir::expr::{Expr, LocalContext, MVarId, Name};
use crate::ir::info::ContextInfo;

/// Entry point into the host's elaborator
pub trait MetaService: Send + Sync {
    /// Open a session evaluating inside `ctx` with `lctx` in scope
    fn session(&self, ctx: &Arc<ContextInfo>, lctx: &LocalContext) -> Box<dyn MetaSession>;
}

/// A scoped inference / pretty-printing session
#[async_trait::async_trait]
pub trait MetaSession: Send + Sync {
    /// Infer the type of `expr`
    async fn infer_type(&self, expr: &Expr) -> Result<Expr, MetaError>;

    /// Pretty-print `expr` as source text
    async fn pp_expr(&self, expr: &Expr) -> Result<String, MetaError>;

    /// Pretty-print a goal (hypotheses and target)
    async fn pp_goal(&self, goal: &MVarId) -> Result<String, MetaError>;
}

/// Doc-string lookup by declaration name
pub trait DocStringStore: Send + Sync {
    fn find_doc_string(&self, name: &Name) -> Option<String>;
}

/// In-memory [`DocStringStore`]
#[derive(Debug, Clone, Default)]
pub struct HashMapDocStore {
    docs: HashMap<Name, String>,
}

impl HashMapDocStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, doc: impl Into<String>) {
        self.docs.insert(Name::new(name), doc.into());
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl FromIterator<(Name, String)> for HashMapDocStore {
    fn from_iter<I: IntoIterator<Item = (Name, String)>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl DocStringStore for HashMapDocStore {
    fn find_doc_string(&self, name: &Name) -> Option<String> {
        self.docs.get(name).cloned()
    }
}
