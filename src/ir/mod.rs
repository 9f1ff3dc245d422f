pub mod expr;
pub mod info;
pub mod info_tree;
pub mod persistent_seq;
pub mod syntax;

pub use expr::{Expr, Literal, LocalContext, LocalDecl, MVarId, Name};
pub use info::{
    CommandInfo, ContextInfo, FieldInfo, GoalDecl, Info, MacroExpansionInfo, MetavarContext,
    TacticInfo, TermInfo,
};
pub use info_tree::InfoTree;
pub use persistent_seq::PersistentSequence;
pub use syntax::{Pos, SourceInfo, Syntax, SyntaxKind};
