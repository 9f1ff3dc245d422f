//! Position queries and hover rendering over info trees
//!
//! # Layers
//!
//! ## 1. Searches (`node_finder.rs`)
//! Deepest-match traversals: `smallest_node`, `smallest_nodes`, `smallest_infos`.
//!
//! ## 2. Selection (`span_ranking.rs`, `hoverable.rs`, `goals.rs`)
//! - `locate_info` - widest of the deepest matches
//! - `hoverable_info_at` - identifiers, literals and field projections
//! - `goals_at` - tactic whose interval covers an offset
//!
//! ## 3. Rendering (`traits.rs`, `hover.rs`)
//! `HoverRenderer` turns a located info into markdown through the host's
//! `MetaService` and a `DocStringStore`.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use infotree_lsp::lsp::features::*;
//!
//! let renderer = HoverRenderer::new(meta, docs);
//! if let Some(hover) = renderer.hover_at(&tree, offset).await? {
//!     println!("{}", hover.markdown);
//! }
//! ```

pub mod goals;
pub mod hover;
pub mod hoverable;
pub mod node_finder;
pub mod span_ranking;
pub mod traits;

// Re-export main types for convenience
pub use goals::{TacticState, goals_at, tactic_states};
pub use hover::{HoverRenderer, HoverResult};
pub use hoverable::{HOVERABLE_KINDS, hoverable_info_at, is_hoverable};
pub use node_finder::{LocatedInfo, smallest_infos, smallest_node, smallest_nodes};
pub use span_ranking::{locate_info, try_locate_info};
pub use traits::{DocStringStore, HashMapDocStore, MetaService, MetaSession};
