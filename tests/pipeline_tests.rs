//! End-to-end tests across front ends and back ends.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rapcode::ast::{BinaryOp, Expr, ExprKind, Program, Span, UnaryOp, Value};
use rapcode::cfg::{self, Branch, NodeKind};
use rapcode::codegen::{CodeGenerator, JsonBackend, RapcodeBackend};
use rapcode::flowchart;
use rapcode::interpreter::{ErrorCategory, Interpreter, ScriptedConsole};
use rapcode::parser::{parse_expression_text, parse_program};

const COUNTING_LOOP: &str = "SET x := 0
LOOP
  x := x + 1
  IF x >= 3 THEN
    BREAK
  ENDIF
ENDLOOP
OUTPUT x
";

fn run(program: &Program, input: &[&str]) -> Vec<String> {
    let mut interpreter = Interpreter::with_console(ScriptedConsole::new(input.iter().copied()));
    interpreter.run(program).unwrap();
    interpreter.into_console().output().to_vec()
}

fn project(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Subchart xmlns:i="http://www.w3.org/2001/XMLSchema-instance" xmlns:a="http://schemas.datacontract.org/2004/07/raptor">
  <a:Start>
    <a:_text_str>Start</a:_text_str>
    {}
  </a:Start>
</Subchart>"#,
        body
    )
}

fn rectangle(text: &str, successor: &str) -> String {
    format!(
        r#"<a:_Successor i:type="a:Rectangle"><a:_text_str>{}</a:_text_str>{}</a:_Successor>"#,
        text, successor
    )
}

/// A flowchart loop with the given exit condition and before/after bodies.
fn flowchart_loop(condition: &str, before: Option<&str>, after: Option<&str>, successor: &str) -> String {
    let child = |name: &str, text: Option<&str>| match text {
        Some(text) => format!(
            r#"<a:{0} i:type="a:Rectangle"><a:_text_str>{1}</a:_text_str></a:{0}>"#,
            name, text
        ),
        None => format!(r#"<a:{} i:nil="true"/>"#, name),
    };
    format!(
        r#"<a:_Successor i:type="a:Loop">
             <a:_text_str>{}</a:_text_str>
             {}
             {}
             {}
           </a:_Successor>"#,
        condition,
        child("_before_Child", before),
        child("_after_Child", after),
        successor
    )
}

#[test]
fn counting_loop_outputs_three() {
    let program = parse_program(COUNTING_LOOP).unwrap();
    assert_eq!(run(&program, &[]), ["3"]);
}

#[test]
fn counting_loop_from_flowchart() {
    let xml = project(&rectangle(
        "x := 0",
        &flowchart_loop(
            "x &gt;= 3",
            Some("x := x + 1"),
            None,
            r#"<a:_Successor i:type="a:Parallelogram">
                 <a:_text_str>x</a:_text_str>
                 <a:_is_input>false</a:_is_input>
               </a:_Successor>"#,
        ),
    ));

    let lowered = flowchart::load(&xml).unwrap();
    assert!(lowered.warnings.is_empty());
    assert!(lowered.program.same_structure(&parse_program(COUNTING_LOOP).unwrap()));
    assert_eq!(run(&lowered.program, &[]), ["3"]);
}

#[test]
fn flowchart_loop_lowering_shapes() {
    let cases = [
        (None, None, "LOOP IF done THEN BREAK ENDIF ENDLOOP"),
        (Some("a := 1"), None, "LOOP a := 1 IF done THEN BREAK ENDIF ENDLOOP"),
        (None, Some("b := 2"), "LOOP IF done THEN BREAK ENDIF b := 2 ENDLOOP"),
        (
            Some("a := 1"),
            Some("b := 2"),
            "LOOP a := 1 IF done THEN BREAK ENDIF b := 2 ENDLOOP",
        ),
    ];

    for (before, after, expected) in cases {
        let xml = project(&flowchart_loop("done", before, after, ""));
        let lowered = flowchart::load(&xml).unwrap();
        let expected = parse_program(expected).unwrap();
        assert_eq!(lowered.program.without_spans(), expected.without_spans());
    }
}

#[test]
fn rapcode_round_trip() {
    let source = "n := INPUT(\"How many?\")
i := 1
WHILE i <= n DO
  IF i % 15 == 0 THEN
    OUTPUT \"FizzBuzz\"
  ELSE
    IF i % 3 == 0 THEN OUTPUT \"Fizz\" ELSE OUTPUT i ENDIF
  ENDIF
  i := i + 1
ENDLOOP
OUTPUT \"total: \" + (n - 1) * 2";

    let first = parse_program(source).unwrap();
    let emitted = RapcodeBackend::new().generate(&first).unwrap().code;
    let second = parse_program(&emitted).unwrap();
    assert_eq!(first.without_spans(), second.without_spans());

    // Emitting again is a fixed point
    let again = RapcodeBackend::new().generate(&second).unwrap().code;
    assert_eq!(emitted, again);
}

#[test]
fn json_round_trip_runs_the_same() {
    let program = parse_program(COUNTING_LOOP).unwrap();
    let json = JsonBackend::new().generate(&program).unwrap().code;
    let back = Program::from_json(&json).unwrap();
    assert_eq!(back, program);
    assert_eq!(run(&back, &[]), ["3"]);
}

#[test]
fn empty_json_alternate_survives_emit_and_reparse() {
    let json = r#"{ "type": "Program", "body": [
        { "type": "If",
          "test": { "type": "Identifier", "name": "t" },
          "consequent": [ { "type": "Output", "value": { "type": "Literal", "value": 1 } } ],
          "alternate": [] }
    ] }"#;
    let program = Program::from_json(json).unwrap();
    let emitted = RapcodeBackend::new().generate(&program).unwrap().code;
    assert!(!emitted.contains("ELSE"));

    let reparsed = parse_program(&emitted).unwrap();
    assert!(reparsed.same_structure(&program));
}

#[test]
fn input_prompt_and_coercion() {
    let program = parse_program("n := INPUT(\"n?\") OUTPUT n * n OUTPUT INPUT(\"name?\") + \"!\"").unwrap();
    let mut interpreter = Interpreter::with_console(ScriptedConsole::new(["7", "Ada"]));
    interpreter.run(&program).unwrap();

    assert_eq!(interpreter.console().prompts(), ["n?", "name?"]);
    assert_eq!(interpreter.console().output(), ["49", "Ada!"]);
}

#[test]
fn cfg_if_without_else() {
    let program = parse_program("IF t THEN a := 1 ENDIF").unwrap();
    let graph = cfg::build(&program).unwrap();

    let decisions: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Decision)
        .collect();
    assert_eq!(decisions.len(), 1);

    let a = graph.nodes.iter().find(|n| n.label == "a := 1").unwrap();
    let merge = graph
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::Junction)
        .unwrap();

    let branches: Vec<_> = graph
        .edges_from(decisions[0].id)
        .map(|e| (e.label, e.to))
        .collect();
    assert_eq!(
        branches,
        [(Some(Branch::True), a.id), (Some(Branch::False), merge.id)]
    );

    let from_a: Vec<_> = graph.edges_from(a.id).map(|e| e.to).collect();
    assert_eq!(from_a, [merge.id]);
}

#[test]
fn division_by_zero_is_a_value_error() {
    let program = parse_program("x := 5\nOUTPUT x / (x - 5)").unwrap();
    let mut interpreter =
        Interpreter::with_console(ScriptedConsole::default()).with_source("x := 5\nOUTPUT x / (x - 5)");
    let err = interpreter.run(&program).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Value);
    assert_eq!(err.position.map(|p| p.line), Some(2));
    assert!(err.to_string().contains("x - 5"));
}

#[test]
fn inner_break_leaves_only_inner_loop() {
    let program = parse_program(
        "i := 0
         WHILE i < 2 DO
           LOOP
             OUTPUT \"inner \" + i
             BREAK
           ENDLOOP
           i := i + 1
         ENDLOOP
         OUTPUT \"done\"",
    )
    .unwrap();
    assert_eq!(run(&program, &[]), ["inner 0", "inner 1", "done"]);
}

fn arithmetic() -> impl Strategy<Value = Expr> {
    let leaf = (0u32..100).prop_map(|n| Expr::literal(f64::from(n), Span::default()));
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![
                    Just(BinaryOp::Add),
                    Just(BinaryOp::Subtract),
                    Just(BinaryOp::Multiply),
                    Just(BinaryOp::Divide),
                    Just(BinaryOp::Modulo),
                ],
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(operator, left, right)| Expr::new(
                    ExprKind::Binary {
                        operator,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    Span::default()
                )),
            inner.prop_map(|operand| Expr::new(
                ExprKind::Unary {
                    operator: UnaryOp::Negate,
                    operand: Box::new(operand),
                },
                Span::default()
            )),
        ]
    })
}

fn evaluate(expr: &Expr) -> Option<Value> {
    Interpreter::with_console(ScriptedConsole::default())
        .evaluate(expr)
        .ok()
}

proptest! {
    #[test]
    fn emitted_expressions_reparse_to_the_same_tree(expr in arithmetic()) {
        let text = expr.to_string();
        let reparsed = parse_expression_text(&text, 0).unwrap();
        prop_assert_eq!(reparsed.without_spans(), expr.without_spans());
    }

    #[test]
    fn emitted_expressions_evaluate_the_same(expr in arithmetic()) {
        let reparsed = parse_expression_text(&expr.to_string(), 0).unwrap();
        prop_assert_eq!(evaluate(&reparsed), evaluate(&expr));
    }
}

#[test]
fn demo_programs_run() {
    let counting = parse_program(include_str!("../demos/counting.rapcode")).unwrap();
    assert_eq!(run(&counting, &[]), ["3"]);

    let fizzbuzz = parse_program(include_str!("../demos/fizzbuzz.rapcode")).unwrap();
    assert_eq!(
        run(&fizzbuzz, &["5"]),
        ["1", "2", "Fizz", "4", "Buzz"]
    );

    let countdown = flowchart::load(include_str!("../demos/countdown.rap")).unwrap();
    assert!(countdown.warnings.is_empty());
    assert_eq!(
        run(&countdown.program, &["3"]),
        ["n = 3", "n = 2", "n = 1", "n = 0", "Liftoff!"]
    );
}
