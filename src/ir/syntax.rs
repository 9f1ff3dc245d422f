//! Syntax references carried by info nodes
//!
//! The elaborator hands us syntax that already knows where it came from. We
//! only need its kind and its source range, so `Syntax` is a thin value type
//! rather than a full concrete syntax tree.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// Document offset (char index, consistent within one document)
pub type Pos = usize;

/// Open-ended syntax node kind, e.g. `ident` or `num`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyntaxKind(Cow<'static, str>);

impl SyntaxKind {
    pub const IDENT: SyntaxKind = SyntaxKind(Cow::Borrowed("ident"));
    pub const STR_LIT: SyntaxKind = SyntaxKind(Cow::Borrowed("str"));
    pub const CHAR_LIT: SyntaxKind = SyntaxKind(Cow::Borrowed("char"));
    pub const NUM_LIT: SyntaxKind = SyntaxKind(Cow::Borrowed("num"));
    pub const SCIENTIFIC_LIT: SyntaxKind = SyntaxKind(Cow::Borrowed("scientific"));
    pub const NAME_LIT: SyntaxKind = SyntaxKind(Cow::Borrowed("name"));
    pub const FIELD_IDX: SyntaxKind = SyntaxKind(Cow::Borrowed("fieldIdx"));
    pub const INTERPOLATED_STR_LIT: SyntaxKind =
        SyntaxKind(Cow::Borrowed("interpolatedStrLitKind"));
    pub const INTERPOLATED_STR: SyntaxKind = SyntaxKind(Cow::Borrowed("interpolatedStrKind"));

    /// Kind for any other node, e.g. `Lean.Parser.Term.app`
    pub fn new(name: impl Into<String>) -> Self {
        SyntaxKind(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a piece of syntax came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceInfo {
    /// Parsed from the document text
    Original { pos: Pos, tail_pos: Pos },
    /// Produced by a macro or the elaborator. `canonical` marks synthetic
    /// syntax that should still be treated as covering its source range.
    Synthetic { pos: Pos, tail_pos: Pos, canonical: bool },
    /// No position data at all
    None,
}

/// A syntax node as seen by the info tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Syntax {
    pub kind: SyntaxKind,
    pub info: SourceInfo,
}

impl Syntax {
    pub fn original(kind: SyntaxKind, range: Range<Pos>) -> Self {
        Self {
            kind,
            info: SourceInfo::Original {
                pos: range.start,
                tail_pos: range.end,
            },
        }
    }

    pub fn synthetic(kind: SyntaxKind, range: Range<Pos>, canonical: bool) -> Self {
        Self {
            kind,
            info: SourceInfo::Synthetic {
                pos: range.start,
                tail_pos: range.end,
                canonical,
            },
        }
    }

    pub fn missing(kind: SyntaxKind) -> Self {
        Self {
            kind,
            info: SourceInfo::None,
        }
    }

    /// Start offset. With `canonical_only`, non-canonical synthetic syntax has none.
    pub fn pos(&self, canonical_only: bool) -> Option<Pos> {
        match self.info {
            SourceInfo::Original { pos, .. } => Some(pos),
            SourceInfo::Synthetic { pos, canonical, .. } if canonical || !canonical_only => {
                Some(pos)
            }
            _ => None,
        }
    }

    /// End offset (exclusive), same canonicity rule as [`Syntax::pos`]
    pub fn tail_pos(&self, canonical_only: bool) -> Option<Pos> {
        match self.info {
            SourceInfo::Original { tail_pos, .. } => Some(tail_pos),
            SourceInfo::Synthetic {
                tail_pos, canonical, ..
            } if canonical || !canonical_only => Some(tail_pos),
            _ => None,
        }
    }

    /// Both bounds as a half-open range, if both exist
    pub fn range(&self, canonical_only: bool) -> Option<Range<Pos>> {
        Some(self.pos(canonical_only)?..self.tail_pos(canonical_only)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_syntax_has_both_bounds() {
        let stx = Syntax::original(SyntaxKind::IDENT, 3..8);
        assert_eq!(stx.pos(true), Some(3));
        assert_eq!(stx.tail_pos(true), Some(8));
        assert_eq!(stx.range(true), Some(3..8));
    }

    #[test]
    fn test_non_canonical_synthetic_hidden_when_canonical_only() {
        let stx = Syntax::synthetic(SyntaxKind::new("term_+_"), 0..4, false);
        assert_eq!(stx.pos(true), None);
        assert_eq!(stx.tail_pos(true), None);
        assert_eq!(stx.pos(false), Some(0));
        assert_eq!(stx.range(false), Some(0..4));
    }

    #[test]
    fn test_canonical_synthetic_is_visible() {
        let stx = Syntax::synthetic(SyntaxKind::NUM_LIT, 10..12, true);
        assert_eq!(stx.range(true), Some(10..12));
    }

    #[test]
    fn test_missing_source_info() {
        let stx = Syntax::missing(SyntaxKind::IDENT);
        assert_eq!(stx.pos(false), None);
        assert_eq!(stx.range(false), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SyntaxKind::FIELD_IDX.to_string(), "fieldIdx");
        assert_eq!(SyntaxKind::new("Lean.Parser.Term.app").as_str(), "Lean.Parser.Term.app");
        assert_eq!(SyntaxKind::new("ident"), SyntaxKind::IDENT);
    }
}
