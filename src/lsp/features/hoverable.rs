//! Which infos may produce a hover at a given offset

use crate::ir::info::Info;
use crate::ir::info_tree::InfoTree;
use crate::ir::syntax::{Pos, SyntaxKind};
use crate::lsp::features::node_finder::LocatedInfo;
use crate::lsp::features::span_ranking::locate_info;

/// Syntax kinds a term hover may be shown for: identifiers and literals
pub const HOVERABLE_KINDS: [SyntaxKind; 9] = [
    SyntaxKind::IDENT,
    SyntaxKind::STR_LIT,
    SyntaxKind::CHAR_LIT,
    SyntaxKind::NUM_LIT,
    SyntaxKind::SCIENTIFIC_LIT,
    SyntaxKind::NAME_LIT,
    SyntaxKind::FIELD_IDX,
    SyntaxKind::INTERPOLATED_STR_LIT,
    SyntaxKind::INTERPOLATED_STR,
];

/// Whether `info` covers `offset` and is of a kind worth hovering
///
/// A term qualifies when it is not an elaborator-inserted `sorry` and its
/// syntax is an identifier or literal. A field projection always qualifies.
/// Tactics, commands and macro expansions never do.
pub fn is_hoverable(offset: Pos, info: &Info) -> bool {
    if !info.contains(offset) {
        return false;
    }

    match info {
        Info::Term(term) => {
            !term.expr.is_synthetic_sorry() && HOVERABLE_KINDS.contains(&term.stx.kind)
        }
        Info::Field(_) => true,
        Info::Tactic(_) | Info::Command(_) | Info::MacroExpansion(_) => false,
    }
}

/// Best hoverable info at `offset`, with its context
pub fn hoverable_info_at(tree: &InfoTree, offset: Pos) -> Option<LocatedInfo> {
    locate_info(tree, |info| is_hoverable(offset, info))
}
