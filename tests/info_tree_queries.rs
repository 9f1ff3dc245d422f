use std::sync::Arc;

use infotree_lsp::ir::{
    CommandInfo, ContextInfo, Expr, FieldInfo, Info, InfoTree, LocalContext, MVarId, Name,
    Syntax, SyntaxKind, TacticInfo, TermInfo,
};
use infotree_lsp::lsp::features::{
    goals_at, is_hoverable, locate_info, smallest_infos, smallest_node, smallest_nodes,
    tactic_states,
};
use quickcheck::{QuickCheck, TestResult};
use test_utils::ir::generator::{GenKind, GenTree};

fn label(id: usize) -> String {
    format!("n{}", id)
}

fn ctx(module: &str) -> ContextInfo {
    ContextInfo {
        module: Name::new(module),
        ..ContextInfo::default()
    }
}

fn stx(node: &GenTree, kind: SyntaxKind) -> Syntax {
    if node.positioned {
        Syntax::original(kind, node.start..node.end)
    } else {
        Syntax::missing(kind)
    }
}

fn to_info(node: &GenTree) -> Info {
    match node.kind {
        GenKind::Term => Info::term(TermInfo {
            lctx: LocalContext::new(),
            expected_type: None,
            expr: Expr::constant(label(node.id)),
            stx: stx(node, SyntaxKind::IDENT),
        }),
        GenKind::Tactic => Info::tactic(TacticInfo {
            goals_before: vec![MVarId(Name::new(label(node.id)))],
            goals_after: vec![],
            stx: stx(node, SyntaxKind::new("tactic")),
        }),
        GenKind::Field => Info::field(FieldInfo {
            field_name: Name::new(label(node.id)),
            lctx: LocalContext::new(),
            val: Expr::constant("s"),
            stx: stx(node, SyntaxKind::FIELD_IDX),
        }),
        GenKind::Command => Info::command(CommandInfo {
            stx: stx(node, SyntaxKind::new(label(node.id))),
        }),
    }
}

fn to_tree(node: &GenTree) -> InfoTree {
    let mut children: Vec<InfoTree> = node.children.iter().map(to_tree).collect();
    if node.trailing_leaf {
        children.push(InfoTree::leaf());
    }
    let tree = InfoTree::node(to_info(node), children);
    if node.wrap_context {
        InfoTree::context(ctx(&label(node.id)), tree)
    } else {
        tree
    }
}

fn to_root(node: &GenTree) -> InfoTree {
    InfoTree::context(ctx("root"), to_tree(node))
}

/// Recovers the generator id a converted info was labelled with
fn id_of(info: &Info) -> usize {
    let name = match info {
        Info::Term(t) => t.expr.to_string(),
        Info::Tactic(t) => t.goals_before[0].0.to_string(),
        Info::Field(f) => f.field_name.to_string(),
        Info::Command(c) => c.stx.kind.to_string(),
        Info::MacroExpansion(_) => unreachable!("generator never emits macro expansions"),
    };
    name[1..].parse().unwrap()
}

/// Reference deepest-match search directly over the generated description
fn model_smallest(node: &GenTree, pred: &dyn Fn(&GenTree) -> bool, out: &mut Vec<usize>) {
    let before = out.len();
    for child in &node.children {
        model_smallest(child, pred, out);
    }
    if out.len() == before && pred(node) {
        out.push(node.id);
    }
}

fn covers(node: &GenTree, offset: usize) -> bool {
    node.span().is_some_and(|span| span.contains(&offset))
}

fn offset_in(tree: &GenTree, raw: u8) -> usize {
    raw as usize % (tree.end + 5)
}

#[test]
fn test_property_smallest_node_is_first_deepest_match() {
    fn prop(gen_tree: GenTree, raw: u8) -> TestResult {
        let offset = offset_in(&gen_tree, raw);
        let tree = to_root(&gen_tree);
        let pred = |info: &Info| info.contains(offset);

        let mut expected = Vec::new();
        model_smallest(&gen_tree, &|n| covers(n, offset), &mut expected);

        let found = smallest_node(&tree, pred);
        if found.as_ref().and_then(InfoTree::info).map(id_of) != expected.first().copied() {
            return TestResult::failed();
        }

        if let Some(found) = found {
            let Some(info) = found.info() else {
                return TestResult::failed();
            };
            if !pred(info) {
                return TestResult::failed();
            }
            // Deepest: nothing below the match satisfies the predicate
            let children_match = found.children().is_some_and(|children| {
                children
                    .iter()
                    .any(|child| child.fold_info(false, |hit, _, i| hit || pred(i)))
            });
            if children_match {
                return TestResult::failed();
            }
            // The root context wrapper survives
            if !matches!(found, InfoTree::Context(..)) {
                return TestResult::failed();
            }
        }

        TestResult::passed()
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(GenTree, u8) -> TestResult);
}

#[test]
fn test_property_smallest_nodes_matches_model() {
    fn prop(gen_tree: GenTree, raw: u8) -> TestResult {
        let offset = offset_in(&gen_tree, raw);
        let tree = to_root(&gen_tree);

        let mut expected = Vec::new();
        model_smallest(&gen_tree, &|n| covers(n, offset), &mut expected);

        let found: Vec<usize> = smallest_nodes(&tree, |i| i.contains(offset))
            .iter()
            .filter_map(InfoTree::info)
            .map(id_of)
            .collect();

        TestResult::from_bool(found == expected)
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(GenTree, u8) -> TestResult);
}

#[test]
fn test_property_smallest_nodes_ignores_root_level_non_matches() {
    fn prop(gen_tree: GenTree, kind: GenKind) -> TestResult {
        let pred_gen = |n: &GenTree| n.kind == kind && n.positioned;
        let pred = |i: &Info| {
            i.has_range()
                && match kind {
                    GenKind::Term => matches!(i, Info::Term(_)),
                    GenKind::Tactic => matches!(i, Info::Tactic(_)),
                    GenKind::Field => matches!(i, Info::Field(_)),
                    GenKind::Command => matches!(i, Info::Command(_)),
                }
        };

        let mut pruned = gen_tree.clone();
        pruned.children.retain(|child| {
            let mut hits = Vec::new();
            model_smallest(child, &pred_gen, &mut hits);
            !hits.is_empty()
        });
        if pruned.children.len() == gen_tree.children.len() {
            return TestResult::discard();
        }

        let ids = |t: &GenTree| -> Vec<usize> {
            smallest_nodes(&to_root(t), pred)
                .iter()
                .filter_map(InfoTree::info)
                .map(id_of)
                .collect()
        };

        TestResult::from_bool(ids(&gen_tree) == ids(&pruned))
    }

    QuickCheck::new()
        .tests(300)
        .max_tests(5000)
        .quickcheck(prop as fn(GenTree, GenKind) -> TestResult);
}

#[test]
fn test_property_goals_at_monotone_over_boundaries() {
    fn prop(gen_tree: GenTree) -> TestResult {
        let tree = to_root(&gen_tree);
        let states = tactic_states(&tree);
        if states.is_empty() {
            return TestResult::discard();
        }

        let starts: Vec<usize> = states.iter().filter_map(|s| s.pos()).collect();
        if starts.windows(2).any(|w| w[0] > w[1]) {
            return TestResult::failed();
        }
        let last = &states[states.len() - 1];
        let Some(last_end) = last.tail_pos() else {
            return TestResult::failed();
        };

        let mut previous_start = None;
        for offset in 0..=last_end + 3 {
            // Linear scan reference: last tactic starting at or before the offset
            let expected = (0..states.len()).rev().find(|&i| starts[i] <= offset).filter(|&i| {
                let end = starts.get(i + 1).copied().unwrap_or(last_end);
                offset < end
            });

            let found = goals_at(&tree, offset);
            let found_id = found.as_ref().map(|s| id_of(&s.info()));
            let expected_id = expected.map(|i| id_of(&states[i].info()));
            if found_id != expected_id {
                return TestResult::failed();
            }

            if let Some(state) = found {
                let start = state.pos();
                if previous_start > start {
                    return TestResult::failed();
                }
                previous_start = start;
            }

            if offset >= last_end && goals_at(&tree, offset).is_some() {
                return TestResult::failed();
            }
        }

        TestResult::passed()
    }

    QuickCheck::new()
        .tests(300)
        .max_tests(5000)
        .quickcheck(prop as fn(GenTree) -> TestResult);
}

#[test]
fn test_property_not_hoverable_outside_span() {
    fn prop(gen_tree: GenTree) -> TestResult {
        for node in gen_tree.nodes() {
            let info = to_info(node);
            let mut outside = vec![node.end, node.end + 1, node.end + 17];
            if let Some(before) = node.start.checked_sub(1) {
                outside.push(before);
            }
            if outside.iter().any(|&offset| is_hoverable(offset, &info)) {
                return TestResult::failed();
            }
            if !node.positioned && is_hoverable(node.start, &info) {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(GenTree) -> TestResult);
}

#[test]
fn test_property_locate_info_picks_first_widest() {
    fn prop(gen_tree: GenTree) -> TestResult {
        let tree = to_root(&gen_tree);
        let ranked: Vec<(usize, usize)> = smallest_infos(&tree, |_| true)
            .iter()
            .filter_map(|l| Some((l.width().ok()?, id_of(&l.info))))
            .collect();

        let expected = ranked
            .iter()
            .fold(None::<(usize, usize)>, |best, &(width, id)| match best {
                Some((best_width, _)) if best_width >= width => best,
                _ => Some((width, id)),
            })
            .map(|(_, id)| id);

        let found = locate_info(&tree, |_| true).map(|l| id_of(&l.info));
        TestResult::from_bool(found == expected)
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(GenTree) -> TestResult);
}

fn term_at(name: &str, range: std::ops::Range<usize>) -> Info {
    Info::term(TermInfo {
        lctx: LocalContext::new(),
        expected_type: None,
        expr: Expr::constant(name),
        stx: Syntax::original(SyntaxKind::IDENT, range),
    })
}

fn tactic_at(goal: &str, range: std::ops::Range<usize>) -> Info {
    Info::tactic(TacticInfo {
        goals_before: vec![MVarId(Name::new(goal))],
        goals_after: vec![],
        stx: Syntax::original(SyntaxKind::new("Lean.Parser.Tactic.exact"), range),
    })
}

#[test]
fn test_locate_info_single_node_with_leaf_child() {
    let info = term_at("x", 5..10);
    let tree = InfoTree::node(info.clone(), [InfoTree::leaf()]);

    let found = locate_info(&tree, |i| i.contains(7)).expect("node covers offset 7");
    assert_eq!(found.info, info);
    assert!(locate_info(&tree, |i| i.contains(10)).is_none());
}

#[test]
fn test_goals_at_two_siblings() {
    let first = tactic_at("a", 0..5);
    let second = tactic_at("b", 5..10);
    let tree = InfoTree::node(
        Info::command(CommandInfo {
            stx: Syntax::original(SyntaxKind::new("theorem"), 0..10),
        }),
        [InfoTree::node(first, []), InfoTree::node(second.clone(), [])],
    );

    let found = goals_at(&tree, 7).expect("second tactic covers 7");
    assert_eq!(found.info(), second);
    assert!(goals_at(&tree, 12).is_none());
}

#[test]
fn test_find_first_preserves_context_wrapper() {
    let info = term_at("x", 0..3);
    let ctx1 = Arc::new(ctx("Ctx1"));
    let tree = InfoTree::with_context(Arc::clone(&ctx1), InfoTree::node(info.clone(), []));

    let found = smallest_node(&tree, |i| *i == info).expect("info matches itself");
    assert_eq!(found, tree);
    match found {
        InfoTree::Context(found_ctx, _) => assert!(Arc::ptr_eq(&found_ctx, &ctx1)),
        other => panic!("wrapper lost: {:?}", other),
    }
}
