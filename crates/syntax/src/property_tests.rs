//! Property-based tests for the scanner, parser and printer.
//!
//! 1. **Parser never panics** on arbitrary input
//! 2. **Error offsets stay within the input**
//! 3. **Generated expressions parse** and span the whole input
//! 4. **Printing round-trips**: `parse(print(t)) == t`
//! 5. **Lone primaries are never wrapped** in operator nodes

use proptest::prelude::*;

use crate::ast::Expr;
use crate::parser::parse;
use crate::token::Span;

// ============================================================================
// Expression generators
// ============================================================================

const NAMES: &[&str] = &["a", "item", "order-no", "line.total", "_x", "ns:node", "*", "ns:*"];
const FUNCTIONS: &[&str] = &["concat", "count", "sum", "upper"];
const CONSTANTS: &[&str] = &["0", "42", "3.5", ".5", "-7", "'text'", "\"it's\"", "System"];
const VARIABLES: &[&str] = &["$v", "$total", "$x1"];
const RELATIONAL: &[&str] = &["<", ">", "<=", ">=", "=", "!="];
const BINARY: &[&str] = &["+", "-", "*", "div", "mod", "=", "!=", "<", "and", "or"];

fn step() -> BoxedStrategy<String> {
    prop_oneof![
        prop::sample::select(NAMES).prop_map(str::to_string),
        prop::sample::select(NAMES).prop_map(|n| format!("@{n}")),
        Just("..".to_string()),
        Just(".".to_string()),
        (prop::sample::select(NAMES), 1..5i64).prop_map(|(n, i)| format!("{n}[{i}]")),
        prop::sample::select(NAMES).prop_map(|n| format!("{n}[]")),
    ]
    .boxed()
}

fn selector() -> BoxedStrategy<String> {
    let path = (any::<bool>(), prop::collection::vec(step(), 1..4))
        .prop_map(|(abs, steps)| {
            let joined = steps.join("/");
            if abs { format!("/{joined}") } else { joined }
        })
        .boxed();
    prop_oneof![
        4 => path.clone(),
        1 => path.prop_map(|p| format!("$({p})")),
    ]
    .boxed()
}

fn leaf() -> BoxedStrategy<String> {
    prop_oneof![
        prop::sample::select(CONSTANTS).prop_map(str::to_string),
        prop::sample::select(VARIABLES).prop_map(str::to_string),
        selector(),
    ]
    .boxed()
}

/// `first (op operand)?`
fn chain(operand: BoxedStrategy<String>, ops: &'static [&'static str]) -> BoxedStrategy<String> {
    (
        operand.clone(),
        prop::option::of((prop::sample::select(ops), operand)),
    )
        .prop_map(|(first, rest)| match rest {
            Some((op, operand)) => format!("{first} {op} {operand}"),
            None => first,
        })
        .boxed()
}

/// Operator expression over `operand`, one optional operator per precedence level.
fn operator_expression(operand: BoxedStrategy<String>) -> BoxedStrategy<String> {
    let additive = chain(chain(operand, &["*", "div", "mod"]), &["+", "-"]);
    chain(chain(chain(additive, RELATIONAL), &["and"]), &["or"])
}

/// A single binary operation, or the bare operand, for use inside nested forms.
fn small_expression(operand: BoxedStrategy<String>) -> BoxedStrategy<String> {
    prop_oneof![
        operand.clone(),
        (operand.clone(), prop::sample::select(BINARY), operand)
            .prop_map(|(left, op, right)| format!("{left} {op} {right}")),
    ]
    .boxed()
}

fn operand() -> BoxedStrategy<String> {
    leaf()
        .prop_recursive(2, 16, 2, |inner| {
            let body = small_expression(inner);
            prop_oneof![
                (
                    prop::sample::select(FUNCTIONS),
                    any::<bool>(),
                    prop::collection::vec(body.clone(), 0..3),
                )
                    .prop_map(|(name, dollar, args)| {
                        let sigil = if dollar { "$" } else { "" };
                        format!("{sigil}{name}({})", args.join(", "))
                    }),
                body.clone().prop_map(|e| format!("({e})")),
                (prop::sample::select(NAMES), body).prop_map(|(n, e)| format!("{n}[{e}]")),
            ]
        })
        .boxed()
}

fn expression() -> BoxedStrategy<String> {
    prop_oneof![
        4 => operator_expression(operand()),
        1 => prop::collection::vec(selector(), 2..4).prop_map(|s| s.join(" | ")),
    ]
    .boxed()
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn parser_never_panics(input in "\\PC{0,200}") {
        let _ = parse(&input);
    }

    #[test]
    fn error_offsets_within_input(input in "[a-z0-9$/@.*()\\[\\]|<>=!:,'\" +-]{0,60}") {
        if let Err(e) = parse(&input) {
            prop_assert!(
                e.offset() <= input.len(),
                "offset {} exceeds input length {} for {:?}: {}",
                e.offset(),
                input.len(),
                input,
                e,
            );
        }
    }

    #[test]
    fn generated_expressions_parse_over_whole_input(input in expression()) {
        let ast = parse(&input);
        prop_assert!(ast.is_ok(), "failed to parse {:?}: {:?}", input, ast);
        if let Ok(ast) = ast {
            prop_assert_eq!(ast.span, Span::new(0, input.len()));
        }
    }

    #[test]
    fn printing_round_trips(input in expression()) {
        let first = parse(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let printed = first.to_string();
        let second = parse(&printed).map_err(|e| TestCaseError::fail(format!("{printed:?}: {e}")))?;
        prop_assert_eq!(&first.root, &second.root, "printed as {:?}", printed);
        prop_assert_eq!(second.to_string(), printed);
    }

    #[test]
    fn lone_primaries_are_not_wrapped(input in operand()) {
        let ast = parse(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(!ast.root.is_operator(), "{:?} parsed as {:?}", input, ast.root);
        prop_assert!(!matches!(ast.root, Expr::Or(_) | Expr::And(_)));
    }
}
