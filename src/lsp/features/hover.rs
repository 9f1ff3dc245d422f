//! Hover and goal rendering
//!
//! ```text
//! offset
//!   ↓
//! hoverable_info_at()  ── span ranking over deepest hoverable infos
//!   ↓
//! HoverRenderer::render()
//!   ├─→ open one MetaSession for (context, local context)
//!   ├─→ infer type, pretty-print expression and type
//!   └─→ append doc string for constants
//!   ↓
//! markdown
//! ```

use std::ops::Range;
use std::sync::Arc;

use tracing::debug;

use crate::config::{MissingPositionPolicy, QueryConfig};
use crate::error::{QueryError, RenderError};
use crate::ir::expr::{Expr, LocalContext};
use crate::ir::info::{ContextInfo, Info};
use crate::ir::info_tree::InfoTree;
use crate::ir::syntax::Pos;
use crate::lsp::features::goals::TacticState;
use crate::lsp::features::hoverable::is_hoverable;
use crate::lsp::features::node_finder::LocatedInfo;
use crate::lsp::features::span_ranking::try_locate_info;
use crate::lsp::features::traits::{DocStringStore, MetaService, MetaSession};

/// Rendered hover with the source range it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    pub markdown: String,
    pub range: Range<Pos>,
}

/// Renders located infos to markdown through a [`MetaService`]
#[derive(Clone)]
pub struct HoverRenderer {
    meta: Arc<dyn MetaService>,
    docs: Arc<dyn DocStringStore>,
    policy: MissingPositionPolicy,
}

impl HoverRenderer {
    pub fn new(meta: Arc<dyn MetaService>, docs: Arc<dyn DocStringStore>) -> Self {
        Self {
            meta,
            docs,
            policy: MissingPositionPolicy::default(),
        }
    }

    /// Renderer using the missing-position policy from `config`
    pub fn from_config(
        meta: Arc<dyn MetaService>,
        docs: Arc<dyn DocStringStore>,
        config: &QueryConfig,
    ) -> Self {
        Self::new(meta, docs).with_policy(config.missing_position)
    }

    pub fn with_policy(mut self, policy: MissingPositionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MissingPositionPolicy {
        self.policy
    }

    /// Rank the deepest infos satisfying `pred` under this renderer's policy
    ///
    /// # Returns
    /// The widest candidate, or `Err(QueryError::MissingPosition)` under
    /// [`MissingPositionPolicy::Strict`] when a candidate lacks a bound
    pub fn locate<F>(&self, tree: &InfoTree, pred: F) -> Result<Option<LocatedInfo>, QueryError>
    where
        F: Fn(&Info) -> bool,
    {
        try_locate_info(tree, pred, self.policy)
    }

    /// Render `info` as hover markdown
    ///
    /// Terms render as `expr : type`, followed by the doc string when the
    /// expression is a documented constant. Fields render as `field : type`.
    /// Pretty-printed text is inserted verbatim.
    ///
    /// # Arguments
    /// * `ctx` - Context the info was elaborated in
    /// * `info` - The info to render
    ///
    /// # Returns
    /// `Ok(None)` for kinds that have no hover; no session is opened for them
    pub async fn render(
        &self,
        ctx: &Arc<ContextInfo>,
        info: &Info,
    ) -> Result<Option<String>, RenderError> {
        match info {
            Info::Term(term) => {
                let session = self.meta.session(ctx, &term.lctx);
                let ty = infer_type(&*session, &term.expr).await?;
                let expr_text = pp_expr(&*session, &term.expr).await?;
                let ty_text = pp_expr(&*session, &ty).await?;

                let mut markdown = code_block(&format!("{} : {}", expr_text, ty_text));
                if let Some(doc) = term
                    .expr
                    .const_name()
                    .and_then(|name| self.docs.find_doc_string(name))
                {
                    markdown.push_str("\n***\n");
                    markdown.push_str(&doc);
                }

                debug!("Rendered term hover for {}", info);
                Ok(Some(markdown))
            }
            Info::Field(field) => {
                let session = self.meta.session(ctx, &field.lctx);
                let ty = infer_type(&*session, &field.val).await?;
                let ty_text = pp_expr(&*session, &ty).await?;

                debug!("Rendered field hover for {}", info);
                Ok(Some(code_block(&format!("{} : {}", field.field_name, ty_text))))
            }
            Info::Tactic(_) | Info::Command(_) | Info::MacroExpansion(_) => Ok(None),
        }
    }

    /// Pretty-print the goals remaining after `state`'s tactic
    pub async fn render_goals(&self, state: &TacticState) -> Result<Vec<String>, RenderError> {
        let session = self.meta.session(&state.ctx, &LocalContext::new());
        let mut goals = Vec::with_capacity(state.tactic.goals_after.len());
        for goal in &state.tactic.goals_after {
            let text = session
                .pp_goal(goal)
                .await
                .map_err(|source| RenderError::PrettyPrint { source })?;
            goals.push(text);
        }
        Ok(goals)
    }

    /// Locate and render the hover at `offset`
    pub async fn hover_at(
        &self,
        tree: &InfoTree,
        offset: Pos,
    ) -> Result<Option<HoverResult>, RenderError> {
        let Some(located) = self.locate(tree, |info| is_hoverable(offset, info))? else {
            return Ok(None);
        };
        let Some(range) = located.range() else {
            return Ok(None);
        };

        Ok(self
            .render(&located.ctx, &located.info)
            .await?
            .map(|markdown| HoverResult { markdown, range }))
    }
}

fn code_block(body: &str) -> String {
    format!("```lean\n{}\n```", body)
}

async fn infer_type(session: &dyn MetaSession, expr: &Expr) -> Result<Expr, RenderError> {
    session
        .infer_type(expr)
        .await
        .map_err(|source| RenderError::InferenceFailure { source })
}

async fn pp_expr(session: &dyn MetaSession, expr: &Expr) -> Result<String, RenderError> {
    session
        .pp_expr(expr)
        .await
        .map_err(|source| RenderError::PrettyPrint { source })
}
