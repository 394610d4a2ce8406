//! Property-based tests for the rewrite engine.

use jsreshape::{rewrite, search};
use proptest::prelude::*;

// Identifiers that can never be keywords or wildcards
fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,6}".prop_map(|s| format!("id_{s}"))
}

fn arb_args(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_ident(), len)
}

// Call statements separated by arbitrary blank space and comments
fn arb_program() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (arb_ident(), arb_args(0..4), prop::sample::select(vec![" ", "\n", "\n\n  ", " /* c */ "])),
        0..6,
    )
    .prop_map(|calls| {
        calls
            .into_iter()
            .map(|(callee, args, gap)| format!("{callee}( {} );{gap}", args.join(" ,")))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_no_match_is_verbatim(source in arb_program()) {
        let out = rewrite(&source, "absentCall(a, ...b) -> elsewhere(a, ...b)").unwrap();
        prop_assert_eq!(out, source);
    }

    #[test]
    fn prop_rest_forwards_every_argument(args in arb_args(0..8)) {
        let source = format!("f({});", args.join(", "));
        let out = rewrite(&source, "f(...a) -> g(...a)").unwrap();
        prop_assert_eq!(out, format!("g({});", args.join(", ")));
    }

    #[test]
    fn prop_rest_drops_the_tail(args in arb_args(2..8)) {
        let source = format!("f({});", args.join(", "));
        let out = rewrite(&source, "f(a, b, ...c) -> g(a, b)").unwrap();
        prop_assert_eq!(out, format!("g({}, {});", args[0], args[1]));
    }

    #[test]
    fn prop_repeated_wildcards_need_equal_bindings(x in arb_ident(), y in arb_ident()) {
        let found = search(&format!("{x} + {y};"), "a + a").unwrap();
        prop_assert_eq!(found.len(), usize::from(x == y));
    }

    #[test]
    fn prop_search_finds_each_call(args in arb_args(0..6), count in 1usize..5) {
        let call = format!("target({});", args.join(", "));
        let source = vec![call; count].join("\n");
        let found = search(&source, "target(...a)").unwrap();
        prop_assert_eq!(found.len(), count);
        for m in &found {
            prop_assert_eq!(m.bindings.get("a").unwrap().nodes().len(), args.len());
        }
    }
}
