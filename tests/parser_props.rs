use std::rc::Rc;

use proptest::prelude::*;
use transpiler::{
    ast::{
        expressions::{BlockExpr, Expr},
        statements::Stmt,
    },
    lexer::lexer::tokenize,
    lexer::tokens::TokenKind,
    parser::parser::parse,
    Span,
};

fn assert_contains(parent: &Span, child: &Span) {
    assert!(
        child.start.0 >= parent.start.0 && child.end.0 <= parent.end.0,
        "child span ({}, {}) escapes parent span ({}, {})",
        child.start.0,
        child.end.0,
        parent.start.0,
        parent.end.0
    );
}

fn check_block(block: &BlockExpr) {
    for stmt in &block.stmts {
        assert_contains(&block.span, stmt.span());
        check_stmt(stmt);
    }
}

// Walks an expression asserting that every direct child's span sits inside
// its parent's, recursively.
fn check_expr(expr: &Expr) {
    let span = expr.span();
    match expr {
        Expr::Boolean(_) | Expr::Number(_) | Expr::String(_) | Expr::Ident(_) => {}
        Expr::Call(e) => {
            assert_contains(span, e.func.span());
            check_expr(&e.func);
            for arg in &e.args {
                assert_contains(span, arg.span());
                check_expr(arg);
            }
        }
        Expr::CallStruct(e) => {
            for (_, value) in &e.fields {
                assert_contains(span, value.span());
                check_expr(value);
            }
        }
        Expr::Object(e) => {
            for (_, value) in &e.properties {
                assert_contains(span, value.span());
                check_expr(value);
            }
        }
        Expr::GetField(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
        }
        Expr::GetIndex(e) => {
            assert_contains(span, e.expr.span());
            assert_contains(span, e.index.span());
            check_expr(&e.expr);
            check_expr(&e.index);
        }
        Expr::Lambda(e) => {
            assert_contains(span, &e.block.span);
            check_block(&e.block);
        }
        Expr::Unary(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
        }
        Expr::Binary(e) => {
            assert_contains(span, e.left.span());
            assert_contains(span, e.right.span());
            check_expr(&e.left);
            check_expr(&e.right);
        }
        Expr::TypeCast(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
        }
        Expr::Group(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
        }
        Expr::Match(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
            for arm in &e.arms {
                assert_contains(span, &arm.span);
                assert_contains(&arm.span, arm.expr.span());
                assert_contains(&arm.span, arm.body.span());
                check_expr(&arm.expr);
                check_expr(&arm.body);
            }
        }
        Expr::Switch(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
            for arm in &e.arms {
                assert_contains(span, &arm.span);
                assert_contains(&arm.span, arm.expr.span());
                assert_contains(&arm.span, arm.body.span());
                check_expr(&arm.expr);
                check_stmt(&arm.body);
            }
        }
        Expr::Block(e) => check_block(e),
        Expr::If(e) => {
            assert_contains(span, e.condition.span());
            assert_contains(span, &e.then_block.span);
            check_expr(&e.condition);
            check_block(&e.then_block);
            if let Some(else_branch) = &e.else_branch {
                assert_contains(span, else_branch.span());
                check_expr(else_branch);
            }
        }
        Expr::Macro(e) => {
            assert_contains(span, e.expr.span());
            check_expr(&e.expr);
        }
    }
}

fn check_stmt(stmt: &Stmt) {
    let span = stmt.span();
    match stmt {
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Expr(s) => {
            assert_contains(span, s.expr.span());
            check_expr(&s.expr);
        }
        Stmt::Return(s) => {
            if let Some(expr) = &s.expr {
                assert_contains(span, expr.span());
                check_expr(expr);
            }
        }
        Stmt::While(s) => {
            assert_contains(span, s.condition.span());
            assert_contains(span, &s.block.span);
            check_expr(&s.condition);
            check_block(&s.block);
        }
        Stmt::For(s) => {
            assert_contains(span, s.iter.span());
            assert_contains(span, &s.block.span);
            check_expr(&s.iter);
            check_block(&s.block);
        }
        Stmt::Let(s) => {
            assert_contains(span, s.init.span());
            check_expr(&s.init);
        }
        Stmt::Const(s) => {
            assert_contains(span, s.init.span());
            check_expr(&s.init);
        }
        Stmt::Fn(s) => {
            assert_contains(span, &s.ty.span);
            assert_contains(span, &s.block.span);
            check_block(&s.block);
        }
        Stmt::Enum(_) | Stmt::Struct(_) => {}
        Stmt::Impl(s) => {
            for method in &s.methods {
                assert_contains(span, &method.span);
                assert_contains(&method.span, &method.block.span);
                check_block(&method.block);
            }
        }
        Stmt::Trait(s) => {
            for method in &s.methods {
                assert_contains(span, &method.ty.span);
                if let Some(block) = &method.block {
                    assert_contains(span, &block.span);
                    check_block(block);
                }
            }
        }
        Stmt::Assign(s) => {
            assert_contains(span, s.expr.span());
            assert_contains(span, s.value.span());
            check_expr(&s.expr);
            check_expr(&s.value);
        }
    }
}

// Representative expression fragments covering every level of the ladder,
// composed into well-formed programs so the containment walk exercises
// deep trees.
fn expr_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1 + 2 * 3"),
        Just("a.b.c(1)[2]"),
        Just("f(x, g(y))"),
        Just("(1 + 2) * -3"),
        Just("foo::bar::baz"),
        Just("{ x: 1, y: 2 }"),
        Just("switch v { 1 => \"one\", 2 => { h(); } }"),
        Just("if ok { t(); } else { u(); }"),
        Just("!flag && count < 10"),
        Just("0..=limit"),
    ]
    .prop_map(str::to_string)
}

fn program() -> impl Strategy<Value = String> {
    (expr_fragment(), expr_fragment()).prop_map(|(a, b)| {
        format!(
            "struct P {{ x: num }} fn run(n: num): num {{ let a = {a}; \
             while going {{ a = {b}; total += 1; }} for i in 0..n {{ break; }} \
             return a; }}"
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // The lexer must consume arbitrary input without panicking, keep token
    // spans in-bounds and monotonic, and always finish on the EOF sentinel.
    #[test]
    fn lexer_never_panics_and_spans_are_monotonic(s in ".*") {
        let (tokens, _) = tokenize(s.clone(), None);

        prop_assert!(!tokens.is_empty());
        prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::EOF);

        let mut last_end = 0u32;
        for token in &tokens {
            let start = token.span.start.0;
            let end = token.span.end.0;

            prop_assert!(start <= end, "start>end: ({start},{end}) input={s:?}");
            prop_assert!(
                (end as usize) <= s.len(),
                "end out of bounds: ({start},{end}) len={} input={s:?}",
                s.len()
            );
            prop_assert!(
                start >= last_end,
                "token moved backwards: start={start} < last_end={last_end} input={s:?}"
            );
            last_end = end;
        }
    }

    // The parser must terminate on arbitrary token streams: error recovery
    // always advances the cursor, so garbage input yields a (possibly
    // empty) tree plus diagnostics instead of a hang or a panic.
    #[test]
    fn parser_never_panics_on_arbitrary_input(s in ".*") {
        let (tokens, _) = tokenize(s.clone(), None);
        let (_, _) = parse(tokens, Rc::new(String::from("prop")));
    }

    // Same tokens in, same tree and diagnostics out.
    #[test]
    fn parsing_is_deterministic(s in ".*") {
        let (tokens, _) = tokenize(s, None);

        let first = parse(tokens.clone(), Rc::new(String::from("prop")));
        let second = parse(tokens, Rc::new(String::from("prop")));

        prop_assert_eq!(first.0, second.0);
        prop_assert_eq!(first.1, second.1);
    }

    // Every node's span must contain the span of every direct child, all
    // the way down; best-effort trees from malformed input included.
    #[test]
    fn statement_spans_stay_in_bounds(s in ".*") {
        let (tokens, _) = tokenize(s.clone(), None);
        let (ast, _) = parse(tokens, Rc::new(String::from("prop")));

        for stmt in ast.iter() {
            let span = stmt.span();
            prop_assert!(span.start.0 <= span.end.0, "inverted span in input {s:?}");
            prop_assert!((span.end.0 as usize) <= s.len(), "span out of bounds in input {s:?}");
            check_stmt(stmt);
        }
    }

    // The full containment walk over generated well-formed programs.
    #[test]
    fn node_spans_contain_their_children(src in program()) {
        let (tokens, lex_errors) = tokenize(src.clone(), None);
        prop_assert!(lex_errors.is_empty(), "lexer errors: {lex_errors:?} input={src:?}");

        let (ast, errors) = parse(tokens, Rc::new(String::from("prop")));
        prop_assert!(errors.is_empty(), "parser errors: {errors:?} input={src:?}");

        for stmt in ast.iter() {
            check_stmt(stmt);
        }
    }
}
