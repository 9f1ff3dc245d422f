//! Elaboration info records
//!
//! One `Info` variant per elaboration event the tree can record. Every variant
//! points at the syntax it annotates, which is where positions come from.
//! Positions are always read with `canonical_only = true`, so synthetic
//! syntax produced by macros is invisible to position-based queries.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::expr::{Expr, LocalContext, MVarId, Name};
use super::syntax::{Pos, Syntax};
use crate::error::{Bound, QueryError};

/// A goal's hypotheses and target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDecl {
    pub user_name: Option<Name>,
    pub lctx: LocalContext,
    pub target: Expr,
}

/// Metavariable declarations visible to an elaboration context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetavarContext {
    pub decls: BTreeMap<MVarId, GoalDecl>,
}

impl MetavarContext {
    pub fn find_decl(&self, id: &MVarId) -> Option<&GoalDecl> {
        self.decls.get(id)
    }
}

/// Ambient elaboration context for a subtree
///
/// Opaque to the searches; it is only handed back to the meta service so it
/// can re-run inference or pretty-printing in the right scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextInfo {
    pub module: Name,
    pub namespace: Name,
    pub open_decls: Vec<Name>,
    pub mctx: MetavarContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermInfo {
    pub lctx: LocalContext,
    pub expected_type: Option<Expr>,
    pub expr: Expr,
    pub stx: Syntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacticInfo {
    pub goals_before: Vec<MVarId>,
    pub goals_after: Vec<MVarId>,
    pub stx: Syntax,
}

/// Projection `s.f` resolved to a structure field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub field_name: Name,
    pub lctx: LocalContext,
    pub val: Expr,
    pub stx: Syntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub stx: Syntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpansionInfo {
    pub lctx: LocalContext,
    pub stx: Syntax,
    pub output: Syntax,
}

/// One elaboration event. Payloads sit behind `Arc` so infos clone cheaply
/// out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Info {
    Tactic(Arc<TacticInfo>),
    Term(Arc<TermInfo>),
    Command(Arc<CommandInfo>),
    MacroExpansion(Arc<MacroExpansionInfo>),
    Field(Arc<FieldInfo>),
}

impl Info {
    pub fn term(info: TermInfo) -> Self {
        Info::Term(Arc::new(info))
    }

    pub fn tactic(info: TacticInfo) -> Self {
        Info::Tactic(Arc::new(info))
    }

    pub fn field(info: FieldInfo) -> Self {
        Info::Field(Arc::new(info))
    }

    pub fn command(info: CommandInfo) -> Self {
        Info::Command(Arc::new(info))
    }

    pub fn macro_expansion(info: MacroExpansionInfo) -> Self {
        Info::MacroExpansion(Arc::new(info))
    }

    /// The syntax this info annotates
    pub fn stx(&self) -> &Syntax {
        match self {
            Info::Tactic(i) => &i.stx,
            Info::Term(i) => &i.stx,
            Info::Command(i) => &i.stx,
            Info::MacroExpansion(i) => &i.stx,
            Info::Field(i) => &i.stx,
        }
    }

    pub fn pos(&self) -> Option<Pos> {
        self.stx().pos(true)
    }

    pub fn tail_pos(&self) -> Option<Pos> {
        self.stx().tail_pos(true)
    }

    pub fn range(&self) -> Option<Range<Pos>> {
        self.stx().range(true)
    }

    pub fn has_range(&self) -> bool {
        self.pos().is_some() && self.tail_pos().is_some()
    }

    /// `pos <= offset < tail_pos`; false when either bound is missing
    pub fn contains(&self, offset: Pos) -> bool {
        self.range().is_some_and(|r| r.contains(&offset))
    }

    /// `tail_pos - pos`. A missing bound is an error, never zero.
    pub fn width(&self) -> Result<usize, QueryError> {
        let pos = self.pos().ok_or(QueryError::MissingPosition {
            info_kind: self.kind_name(),
            bound: Bound::Start,
        })?;
        let tail = self.tail_pos().ok_or(QueryError::MissingPosition {
            info_kind: self.kind_name(),
            bound: Bound::End,
        })?;
        Ok(tail.saturating_sub(pos))
    }

    pub fn as_tactic(&self) -> Option<&Arc<TacticInfo>> {
        match self {
            Info::Tactic(t) => Some(t),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Info::Tactic(_) => "tactic",
            Info::Term(_) => "term",
            Info::Command(_) => "command",
            Info::MacroExpansion(_) => "macro expansion",
            Info::Field(_) => "field",
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.kind_name(), self.stx().kind)?;
        match self.range() {
            Some(r) => write!(f, " @ {}..{}", r.start, r.end),
            None => write!(f, " @ <no position>"),
        }
    }
}
