//! Ranking of smallest-node candidates by span width
//!
//! Several deepest matches can cover the same offset, e.g. a term and a field
//! projection elaborated from the same syntax. Among them we prefer the one
//! with the widest span; on a tie the first in document order wins.

use tracing::debug;

use crate::config::MissingPositionPolicy;
use crate::error::QueryError;
use crate::ir::info::Info;
use crate::ir::info_tree::InfoTree;
use crate::lsp::features::node_finder::{LocatedInfo, smallest_infos};

/// Locate the best-ranked deepest info satisfying `pred`
///
/// Candidates missing either position bound are skipped.
pub fn locate_info<F>(tree: &InfoTree, pred: F) -> Option<LocatedInfo>
where
    F: Fn(&Info) -> bool,
{
    match try_locate_info(tree, pred, MissingPositionPolicy::Filter) {
        Ok(found) => found,
        // Filter never reports missing positions
        Err(_) => None,
    }
}

/// Locate the best-ranked deepest info satisfying `pred`
///
/// # Arguments
/// * `tree` - Tree to search
/// * `pred` - Predicate over node infos
/// * `policy` - What to do with a candidate that lacks a start or end position
///
/// # Returns
/// `Ok(None)` when nothing matches, or `Err(QueryError::MissingPosition)` for the
/// first unrankable candidate under [`MissingPositionPolicy::Strict`]
pub fn try_locate_info<F>(
    tree: &InfoTree,
    pred: F,
    policy: MissingPositionPolicy,
) -> Result<Option<LocatedInfo>, QueryError>
where
    F: Fn(&Info) -> bool,
{
    let mut best: Option<(usize, LocatedInfo)> = None;

    for candidate in smallest_infos(tree, pred) {
        let width = match candidate.width() {
            Ok(width) => width,
            Err(err) => match policy {
                MissingPositionPolicy::Strict => return Err(err),
                MissingPositionPolicy::Filter => {
                    debug!("Skipping unrankable candidate {}: {}", candidate.info, err);
                    continue;
                }
            },
        };

        // Strictly greater, so the first of equally wide candidates stays
        if best.as_ref().is_none_or(|(best_width, _)| width > *best_width) {
            best = Some((width, candidate));
        }
    }

    Ok(best.map(|(_, located)| located))
}
