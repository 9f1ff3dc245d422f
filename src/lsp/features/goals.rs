//! Goal state lookup for tactic proofs
//!
//! Deepest tactic infos are laid out along the document in start order. Each
//! one owns the stretch of text from its own start up to the next tactic's
//! start; the last owns its own range. This way whitespace and comments
//! between tactics still show the preceding tactic's goals.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::ir::info::{ContextInfo, Info, TacticInfo};
use crate::ir::info_tree::InfoTree;
use crate::ir::syntax::Pos;
use crate::lsp::features::node_finder::smallest_infos;

/// A deepest tactic with its context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacticState {
    pub ctx: Arc<ContextInfo>,
    pub tactic: Arc<TacticInfo>,
}

impl TacticState {
    /// The tactic as a generic info
    pub fn info(&self) -> Info {
        Info::Tactic(Arc::clone(&self.tactic))
    }

    pub fn pos(&self) -> Option<Pos> {
        self.tactic.stx.pos(true)
    }

    pub fn tail_pos(&self) -> Option<Pos> {
        self.tactic.stx.tail_pos(true)
    }
}

/// Deepest positioned tactics, sorted by start position
///
/// The sort is stable: tactics starting at the same offset stay in traversal order.
pub fn tactic_states(tree: &InfoTree) -> Vec<TacticState> {
    let mut states: Vec<TacticState> = smallest_infos(tree, |info| {
        info.as_tactic().is_some() && info.has_range()
    })
    .into_iter()
    .filter_map(|located| {
        let tactic = Arc::clone(located.info.as_tactic()?);
        Some(TacticState {
            ctx: located.ctx,
            tactic,
        })
    })
    .collect();

    states.sort_by_key(|state| state.pos());
    states
}

/// Goal state active at `offset`
///
/// # Arguments
/// * `tree` - Info tree of the command containing `offset`
/// * `offset` - Document offset
///
/// # Returns
/// The tactic whose interval contains `offset`, or `None` before the first
/// tactic, past the last tactic's end, or when the tree has no tactics
pub fn goals_at(tree: &InfoTree, offset: Pos) -> Option<TacticState> {
    let mut states = tactic_states(tree);
    trace!("goals_at {}: {} tactic states", offset, states.len());

    // Index of the last tactic starting at or before `offset`
    let idx = states
        .partition_point(|state| state.pos().is_some_and(|pos| pos <= offset))
        .checked_sub(1)?;

    let end = match states.get(idx + 1) {
        Some(next) => next.pos()?,
        None => states[idx].tail_pos()?,
    };

    if offset < end {
        debug!("goals_at {}: tactic {}", offset, states[idx].info());
        Some(states.swap_remove(idx))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Range;

    use super::*;
    use crate::ir::expr::{MVarId, Name};
    use crate::ir::syntax::{Syntax, SyntaxKind};

    fn tactic(goal: &str, range: Range<usize>) -> Info {
        Info::tactic(TacticInfo {
            goals_before: vec![MVarId(Name::new(goal))],
            goals_after: vec![],
            stx: Syntax::original(SyntaxKind::new("tactic"), range),
        })
    }

    fn tactic_tree(children: Vec<InfoTree>) -> InfoTree {
        InfoTree::context(
            ContextInfo::default(),
            InfoTree::node(tactic("root", 0..100), children),
        )
    }

    fn goal_name(state: &TacticState) -> String {
        state.tactic.goals_before[0].0.to_string()
    }

    #[test]
    fn test_two_sibling_tactics() {
        let tree = tactic_tree(vec![
            InfoTree::node(tactic("a", 0..5), []),
            InfoTree::node(tactic("b", 5..10), []),
        ]);

        assert_eq!(goals_at(&tree, 0).as_ref().map(goal_name).as_deref(), Some("a"));
        assert_eq!(goals_at(&tree, 4).as_ref().map(goal_name).as_deref(), Some("a"));
        assert_eq!(goals_at(&tree, 5).as_ref().map(goal_name).as_deref(), Some("b"));
        assert_eq!(goals_at(&tree, 9).as_ref().map(goal_name).as_deref(), Some("b"));
        assert!(goals_at(&tree, 10).is_none());
    }

    #[test]
    fn test_middle_of_three_tactics() {
        let tree = tactic_tree(vec![
            InfoTree::node(tactic("a", 0..4), []),
            InfoTree::node(tactic("b", 4..8), []),
            InfoTree::node(tactic("c", 8..12), []),
        ]);

        let state = goals_at(&tree, 6).expect("second tactic covers 6");
        assert_eq!(goal_name(&state), "b");
        assert_eq!(state.pos(), Some(4));
        assert_eq!(goals_at(&tree, 11).as_ref().map(goal_name).as_deref(), Some("c"));
    }

    #[test]
    fn test_gap_between_tactics_belongs_to_previous() {
        let tree = tactic_tree(vec![
            InfoTree::node(tactic("a", 0..3), []),
            InfoTree::node(tactic("b", 8..12), []),
        ]);

        assert_eq!(goals_at(&tree, 5).as_ref().map(goal_name).as_deref(), Some("a"));
        assert_eq!(goals_at(&tree, 8).as_ref().map(goal_name).as_deref(), Some("b"));
    }

    #[test]
    fn test_before_first_tactic_is_none() {
        let tree = tactic_tree(vec![InfoTree::node(tactic("a", 4..8), [])]);
        assert!(goals_at(&tree, 2).is_none());
    }

    #[test]
    fn test_no_tactics() {
        assert!(goals_at(&InfoTree::leaf(), 0).is_none());
        assert!(tactic_states(&InfoTree::leaf()).is_empty());
    }

    #[test]
    fn test_states_sorted_stably_by_start() {
        // Child order deliberately differs from document order
        let tree = tactic_tree(vec![
            InfoTree::node(tactic("late", 20..30), []),
            InfoTree::node(tactic("first-at-0", 0..5), []),
            InfoTree::node(tactic("second-at-0", 0..2), []),
        ]);

        let names: Vec<_> = tactic_states(&tree).iter().map(goal_name).collect();
        assert_eq!(names, vec!["first-at-0", "second-at-0", "late"]);
    }

    #[test]
    fn test_unpositioned_tactics_ignored() {
        let ghost = Info::tactic(TacticInfo {
            goals_before: vec![MVarId(Name::new("ghost"))],
            goals_after: vec![],
            stx: Syntax::missing(SyntaxKind::new("tactic")),
        });
        let tree = tactic_tree(vec![
            InfoTree::node(ghost, []),
            InfoTree::node(tactic("a", 0..5), []),
        ]);

        let names: Vec<_> = tactic_states(&tree).iter().map(goal_name).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_info_is_tactic_kind() {
        let tree = tactic_tree(vec![InfoTree::node(tactic("a", 0..5), [])]);
        let state = goals_at(&tree, 1).expect("tactic at 1");
        assert_eq!(state.info().kind_name(), "tactic");
    }
}
