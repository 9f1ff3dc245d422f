//! Random well-formed span trees for property-based testing.
//!
//! A `GenTree` is a plain description of an info tree's shape: each node has a
//! kind, a half-open span and ordered children. The generator guarantees the
//! structural invariants real elaborator output has:
//!
//! - a child's span lies inside its parent's span;
//! - siblings appear in document order and never overlap (they may touch).
//!
//! A small fraction of nodes are generated without position data, and some
//! are wrapped in a context, so consumers exercise those paths as well.
//!
//! Generation uses a depth parameter bounded by `MAX_DEPTH` to keep trees
//! small enough for fast property runs.

use quickcheck::{Arbitrary, Gen};

/// Maximum recursion depth for generation.
const MAX_DEPTH: usize = 6;

/// Maximum number of children per node.
const MAX_CHILDREN: usize = 4;

/// Kind of elaboration event a generated node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenKind {
    Term,
    Tactic,
    Field,
    Command,
}

/// A generated tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenTree {
    /// Pre-order index, unique within one generated tree.
    pub id: usize,
    pub kind: GenKind,
    pub start: usize,
    pub end: usize,
    /// When false the node carries no position data at all.
    pub positioned: bool,
    /// Wrap this node in its own context.
    pub wrap_context: bool,
    /// Append a placeholder leaf after the children.
    pub trailing_leaf: bool,
    pub children: Vec<GenTree>,
}

impl GenTree {
    /// All nodes in pre-order.
    pub fn nodes(&self) -> Vec<&GenTree> {
        let mut out = Vec::new();
        self.collect_nodes(&mut out);
        out
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a GenTree>) {
        out.push(self);
        for child in &self.children {
            child.collect_nodes(out);
        }
    }

    /// Span as a range, if positioned.
    pub fn span(&self) -> Option<std::ops::Range<usize>> {
        self.positioned.then_some(self.start..self.end)
    }

    fn renumber(&mut self, next: &mut usize) {
        self.id = *next;
        *next += 1;
        for child in &mut self.children {
            child.renumber(next);
        }
    }
}

/// Generates a random number in the range [min, max] inclusive.
fn gen_range(g: &mut Gen, min: usize, max: usize) -> usize {
    min + (usize::arbitrary(g) % (max - min + 1))
}

fn gen_kind(g: &mut Gen) -> GenKind {
    const CHOICES: [GenKind; 4] = [GenKind::Term, GenKind::Tactic, GenKind::Field, GenKind::Command];
    CHOICES[gen_range(g, 0, CHOICES.len() - 1)]
}

/// Generates a node spanning `[start, end)` with children nested inside it.
fn gen_node(g: &mut Gen, start: usize, end: usize, depth: usize) -> GenTree {
    let mut children = Vec::new();
    if depth > 0 && end > start {
        let mut cursor = start;
        for _ in 0..gen_range(g, 0, MAX_CHILDREN) {
            if cursor >= end {
                break;
            }
            let child_start = gen_range(g, cursor, end - 1);
            let child_end = gen_range(g, child_start + 1, end);
            children.push(gen_node(g, child_start, child_end, depth - 1));
            cursor = child_end;
        }
    }

    GenTree {
        id: 0,
        kind: gen_kind(g),
        start,
        end,
        positioned: gen_range(g, 0, 9) != 0,
        wrap_context: gen_range(g, 0, 3) == 0,
        trailing_leaf: gen_range(g, 0, 4) == 0,
        children,
    }
}

impl Arbitrary for GenKind {
    fn arbitrary(g: &mut Gen) -> Self {
        gen_kind(g)
    }
}

impl Arbitrary for GenTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let start = gen_range(g, 0, 20);
        let width = gen_range(g, 1, 200);
        let mut tree = gen_node(g, start, start + width, g.size().min(MAX_DEPTH));
        tree.renumber(&mut 0);
        tree
    }

    /// Shrinks by dropping a child or replacing the tree with one of its
    /// children; both keep the nesting invariants intact.
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let mut candidates = Vec::new();
        for i in 0..self.children.len() {
            let mut smaller = self.clone();
            smaller.children.remove(i);
            candidates.push(smaller);
            candidates.push(self.children[i].clone());
        }
        for candidate in &mut candidates {
            candidate.renumber(&mut 0);
        }
        Box::new(candidates.into_iter())
    }
}
