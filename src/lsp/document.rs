//! Per-version document snapshots
//!
//! Converts between LSP positions and the char offsets the info tree is keyed
//! by, and answers hover and goal requests against one elaborated version.

use std::sync::Arc;

use ropey::Rope;
use tower_lsp::lsp_types::{
    Hover, HoverContents, MarkupContent, MarkupKind, Position, Range, Url,
};
use tracing::debug;

use crate::error::RenderError;
use crate::ir::info_tree::InfoTree;
use crate::ir::syntax::Pos;
use crate::lsp::features::goals::goals_at;
use crate::lsp::features::hover::HoverRenderer;

/// Goals at a position, individually and as one markdown block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainGoal {
    pub goals: Vec<String>,
    pub rendered: String,
}

impl PlainGoal {
    pub fn new(goals: Vec<String>) -> Self {
        let rendered = if goals.is_empty() {
            "no goals".to_string()
        } else {
            goals
                .iter()
                .map(|goal| format!("```lean\n{}\n```", goal))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        Self { goals, rendered }
    }
}

/// One elaborated version of a document: its text and info tree
///
/// Snapshots are immutable; a new version gets a new snapshot.
#[derive(Debug, Clone)]
pub struct InfoDocument {
    pub uri: Url,
    pub version: i32,
    pub text: Rope,
    pub tree: Arc<InfoTree>,
}

impl InfoDocument {
    pub fn new(uri: Url, version: i32, text: &str, tree: InfoTree) -> Self {
        Self {
            uri,
            version,
            text: Rope::from_str(text),
            tree: Arc::new(tree),
        }
    }

    /// Converts an LSP position to a char offset
    ///
    /// A column past the end of its line clamps to the end of that line, before
    /// the line break. A line past the end of the text clamps to the end of
    /// the text.
    pub fn offset_at(&self, position: Position) -> Pos {
        let line = position.line as usize;
        if line >= self.text.len_lines() {
            return self.text.len_chars();
        }
        let character = (position.character as usize).min(self.line_len(line));
        self.text.line_to_char(line) + character
    }

    /// Length of `line` in chars, excluding its line break
    fn line_len(&self, line: usize) -> usize {
        let slice = self.text.line(line);
        let len = slice.len_chars();
        let Some(last) = len.checked_sub(1).map(|i| slice.char(i)) else {
            return 0;
        };
        match last {
            '\n' if len >= 2 && slice.char(len - 2) == '\r' => len - 2,
            '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                len - 1
            }
            _ => len,
        }
    }

    /// Converts a char offset back to an LSP position
    pub fn lsp_position(&self, offset: Pos) -> Position {
        let offset = offset.min(self.text.len_chars());
        let line = self.text.char_to_line(offset);
        let character = offset - self.text.line_to_char(line);
        Position {
            line: line as u32,
            character: character as u32,
        }
    }

    /// Hover for the identifier or literal at `position`
    pub async fn hover(
        &self,
        renderer: &HoverRenderer,
        position: Position,
    ) -> Result<Option<Hover>, RenderError> {
        let offset = self.offset_at(position);
        debug!("hover at {:?} (offset {}) in {} v{}", position, offset, self.uri, self.version);

        let Some(result) = renderer.hover_at(&self.tree, offset).await? else {
            return Ok(None);
        };

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: result.markdown,
            }),
            range: Some(Range {
                start: self.lsp_position(result.range.start),
                end: self.lsp_position(result.range.end),
            }),
        }))
    }

    /// Goals active at `position`, or `None` outside any tactic block
    pub async fn plain_goal(
        &self,
        renderer: &HoverRenderer,
        position: Position,
    ) -> Result<Option<PlainGoal>, RenderError> {
        let offset = self.offset_at(position);
        let Some(state) = goals_at(&self.tree, offset) else {
            debug!("no tactic at offset {} in {}", offset, self.uri);
            return Ok(None);
        };

        let goals = renderer.render_goals(&state).await?;
        Ok(Some(PlainGoal::new(goals)))
    }
}
