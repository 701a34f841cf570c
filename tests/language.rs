use std::fs::{self};

use simulang::{
    compile,
    error::{ParseError, RuntimeError},
    get_result,
    interpreter::{
        generator::OfflineGenerator,
        runtime::{BufferSink, Limits, RunContext, Warning},
        value::{
            core::Value,
            infinity::{InfinityOp, SymbolicInfinity},
        },
    },
    run, RunReport,
};
use walkdir::WalkDir;

#[test]
fn sample_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "sim"))
    {
        let path = entry.path();
        let code =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = get_result(&code) {
            panic!("Script {path:?} failed:\n{code}\nError: {e:?}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn output(src: &str) -> Vec<String> {
    get_result(src).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn report(src: &str) -> RunReport {
    let mut sink = BufferSink::new();
    run(src, RunContext::new(&mut sink, &OfflineGenerator)).unwrap_or_else(|e| {
                                                                panic!("Script failed: {e}")
                                                            })
}

fn runtime_error(src: &str) -> RuntimeError {
    let mut sink = BufferSink::new();
    let err = run(src, RunContext::new(&mut sink, &OfflineGenerator))
        .expect_err("Script succeeded but was expected to fail");
    err.downcast_ref::<RuntimeError>()
       .cloned()
       .unwrap_or_else(|| panic!("Expected a runtime error, got: {err}"))
}

#[test]
fn declarations_and_printing() {
    assert_eq!(output("octyl x := 1 + 2; print(x);"), ["3"]);
    assert_eq!(output("coeternal greeting := \"hello\"; print(greeting);"), ["hello"]);
    assert_eq!(output("print(4.0);"), ["4"]);
    assert_eq!(output("print(2.5);"), ["2.5"]);
    assert_eq!(output("print(10 / 4);"), ["2.5"]);
}

#[test]
fn binary_operators_share_one_precedence_level() {
    assert_eq!(output("print(1 + 2 * 3);"), ["9"]);
    assert_eq!(output("print(2 * 3 + 1);"), ["7"]);
    assert_eq!(output("print(2 * (3 + 1));"), ["8"]);
    assert_eq!(output("print(7 % 3);"), ["1"]);
    assert_eq!(output("print(0 - 7 % 3);"), ["2"]);
}

#[test]
fn const_rebinding() {
    assert_success("coeternal light := ∞;\ncoeternal light := ∞;");
    assert_success("coeternal time := 42;\ntime := 42;");
    assert_failure("coeternal time := 42;\ntime := 43;");
    assert_failure("coeternal time := 42;\noctyl time := 43;");

    assert_success("octyl time := 42;\ntime := 42;\ntime := 43;");

    let err = runtime_error("coeternal time := 42;\n\ntime := 43;");
    assert_eq!(err,
               RuntimeError::ConstViolation { name: "time".to_string(),
                                              line: 3, });
}

#[test]
fn reassignment_without_declaration() {
    assert_eq!(output("fresh := 5; print(fresh);"), ["5"]);
}

#[test]
fn light_is_plain_infinity() {
    let report = report("coeternal light := ∞;");
    let light = report.environment.lookup("light").cloned();

    assert_eq!(light, Some(Value::Infinity(SymbolicInfinity::new(1))));
    assert!(report.environment.is_const("light"));
    if let Some(Value::Infinity(light)) = light {
        assert_eq!(light.coefficient, 1);
        assert_eq!(light.operation, None);
    }
}

#[test]
fn infinity_arithmetic() {
    assert_eq!(output("print(∞);"), ["∞"]);
    assert_eq!(output("print(2∞);"), ["2∞"]);
    assert_eq!(output("print(∞3);"), ["3∞"]);
    assert_eq!(output("print(∞ + 5);"), ["5+∞"]);
    assert_eq!(output("print(5 + ∞);"), ["5+∞"]);
    assert_eq!(output("print(∞ - 5);"), ["5-∞"]);
    assert_eq!(output("print(2∞ + 3∞);"), ["5∞"]);
    assert_eq!(output("print(3∞ - ∞);"), ["2∞"]);
    assert_eq!(output("octyl i := ∞ + 2; octyl t := ∞ + 3; print(i + t);"), ["5+∞"]);

    assert_failure("print(∞ / 2);");
    assert_failure("print(∞ * ∞);");
    assert_failure("print(\"a\" + 1);");
}

#[test]
fn symbolic_accumulation_stays_flat() {
    let src = r#"
        octyl x := ∞;
        intertillage [1..50] -> a: {
            intertillage [1..50] -> b: {
                intertillage [1..20] -> c: { x := x + 1; }
            }
        }
        print(x);
        equiangular x == ∞ + 50000: { print("projected"); }
    "#;

    assert_eq!(output(src), ["50000+∞", "projected"]);

    let mut x = SymbolicInfinity::new(1);
    for _ in 0..100_000 {
        x = x.shifted(InfinityOp::Add, 1.0);
    }
    assert_eq!(x, SymbolicInfinity::offset(SymbolicInfinity::new(1), InfinityOp::Add, 100_000.0));
}

#[test]
fn mixed_shifts_combine() {
    assert_eq!(output("octyl x := ∞ + 2; x := x - 3; print(x);"), ["1-∞"]);
    assert_eq!(output("octyl x := ∞ - 4; x := x + 4; print(x);"), ["0+∞"]);
    assert_eq!(output("octyl x := 2∞ + 1; x := x + 1; print(x);"), ["2+2∞"]);
}

#[test]
fn infinity_projects_to_large_integers() {
    for c in [1, 2, 3, 7, 40] {
        assert_eq!(SymbolicInfinity::new(c).to_integer(1).unwrap(), 1_000_000_000 * c);
    }

    assert_eq!(output("equiangular 3∞ == 3000000000: { print(\"same\"); }"), ["same"]);
    assert_eq!(output("equiangular ∞ + 1 > ∞: { print(\"beyond\"); }"), ["beyond"]);
    assert_eq!(output("equiangular 2∞ < 5000000000: { print(\"below\"); }"), ["below"]);
}

#[test]
fn conditionals() {
    assert_eq!(output("equiangular 2 < 3: { print(1); }"), ["1"]);
    assert!(output("equiangular 2 > 3: { print(1); }").is_empty());
    assert_eq!(output("equiangular 3 >= 3: { print(1); }"), ["1"]);
    assert_eq!(output("equiangular 3 <= 2: { print(1); } print(2);"), ["2"]);
    assert_eq!(output("equiangular \"a\" < \"b\": { print(1); }"), ["1"]);
    assert_eq!(output("equiangular \"a\" != 1: { print(1); }"), ["1"]);
    assert!(output("equiangular \"a\" == 1: { print(1); }").is_empty());

    assert_failure("equiangular \"a\" < 1: { print(1); }");
}

#[test]
fn function_without_recur_runs_one_pass() {
    let src = r"
        octyl n := 0;
        posit varnothing nabla infty ds2(): {
            n := n + 1;
        }
    ";

    let report = report(src);
    assert_eq!(report.environment.lookup("n"), Some(&Value::Number(1.0)));
    assert!(report.warnings.is_empty());
}

#[test]
fn recur_is_bounded_to_one_hundred_passes() {
    let src = r"
        octyl n := 0;
        posit varnothing nabla infty ds2(): {
            n := n + 1;
            recur ds2();
            print(n);
        }
    ";

    let report = report(src);
    assert_eq!(report.environment.lookup("n"), Some(&Value::Number(100.0)));
    assert_eq!(report.warnings, [Warning::LoopBounded { ceiling: 100 }]);

    let lines = output(src);
    assert_eq!(lines, ["⚠️ Loop bounded to 100 steps."]);
}

#[test]
fn recur_bound_replaces_the_ceiling() {
    let src = r"
        octyl n := 0;
        posit varnothing nabla infty ds2(): {
            n := n + 1;
            recur ds2(5∞);
        }
    ";

    let report = report(src);
    assert_eq!(report.environment.lookup("n"), Some(&Value::Number(5.0)));
    assert_eq!(report.warnings, [Warning::LoopBounded { ceiling: 5 }]);
}

#[test]
fn recur_inside_nested_block_restarts_the_function() {
    let src = r"
        octyl n := 0;
        posit varnothing nabla infty ds2(): {
            n := n + 1;
            equiangular n < 3: {
                recur ds2();
            }
        }
    ";

    let report = report(src);
    assert_eq!(report.environment.lookup("n"), Some(&Value::Number(3.0)));
    assert!(report.warnings.is_empty());
}

#[test]
fn called_functions_keep_their_own_passes() {
    let src = r"
        octyl n := 0;
        posit tick(): {
            n := n + 1;
            recur ds2(2);
        }
        posit varnothing nabla infty ds2(): {
            tick();
            print(n);
        }
    ";

    assert_eq!(output(src), ["⚠️ Loop bounded to 2 steps.", "2"]);
}

#[test]
fn functions_may_be_called_before_their_declaration() {
    let src = r#"
        posit varnothing nabla infty ds2(): {
            greet();
        }
        posit greet(): {
            print("hi");
        }
    "#;

    assert_eq!(output(src), ["hi"]);
}

#[test]
fn recursion_is_limited() {
    let err = runtime_error("posit spiral(): { spiral(); }\nspiral();");
    assert!(matches!(err, RuntimeError::CallDepthExceeded { limit: 64, .. }));
}

#[test]
fn intertillage_counts_offsets() {
    assert_eq!(output("intertillage [1..4] -> i: { print(i); }"), ["1", "2", "3", "4"]);

    let report = report("octyl sum := 0;\nintertillage [1..4] -> i: { sum := sum + i; }");
    assert_eq!(report.environment.lookup("sum"), Some(&Value::Number(10.0)));
}

#[test]
fn reversed_intertillage_runs_the_same_offsets() {
    let ascending = output("intertillage [2..5] -> i: { print(i); }");
    let descending = output("intertillage [5..2] -> i: { print(i); }");

    assert_eq!(descending[0], "⚠️ Reversing intertillage bounds: start=5, end=2");
    assert_eq!(descending[1..], ascending[..]);

    let report = report("intertillage [5..2] -> i: { }");
    assert_eq!(report.warnings, [Warning::BoundsReversed { start: 5, end: 2 }]);
}

#[test]
fn long_intertillage_is_truncated() {
    let report = report("octyl count := 0;\nintertillage [1..20000] -> i: { count := count + 1; }");

    assert_eq!(report.environment.lookup("count"), Some(&Value::Number(10_000.0)));
    assert_eq!(report.environment.lookup("i"), Some(&Value::Number(10_000.0)));
    assert_eq!(report.warnings, [Warning::RangeTruncated { limit: 10_000 }]);
}

#[test]
fn long_intertillage_output_is_elided() {
    let lines = output("intertillage [1..200] -> i: { print(i); }");

    assert_eq!(lines.len(), 102);
    assert_eq!(lines[0], "1");
    assert_eq!(lines[99], "100");
    assert_eq!(lines[100], "...");
    assert_eq!(lines[101], "200");
}

#[test]
fn elided_iterations_still_run() {
    let report = report("octyl count := 0;\nintertillage [1..500] -> i: { count := count + 1; }");
    assert_eq!(report.environment.lookup("count"), Some(&Value::Number(500.0)));
}

#[test]
fn symbolic_intertillage() {
    assert_eq!(output("intertillage [∞..∞ + 3] -> i: { print(i); }"),
               ["∞", "∞+1", "∞+2", "3+∞"]);
}

#[test]
fn truncated_symbolic_range_ends_on_its_bound() {
    let report = report("intertillage [0..∞] -> i: { }");

    assert_eq!(report.environment.lookup("i"),
               Some(&Value::Infinity(SymbolicInfinity::new(1))));
    assert_eq!(report.warnings, [Warning::RangeTruncated { limit: 10_000 }]);

    let lines = output("intertillage [0..∞] -> i: { print(i); }");
    assert_eq!(lines.len(), 103);
    assert_eq!(lines[0], "⚠️ Loop bounded to 10000 steps.");
    assert_eq!(lines[100], "99");
    assert_eq!(lines[101], "...");
    assert_eq!(lines[102], "∞");
}

#[test]
fn custom_limits_apply() {
    let limits = Limits { max_passes: 3,
                          max_range: 5,
                          ..Limits::default() };

    let mut sink = BufferSink::new();
    let context = RunContext::new(&mut sink, &OfflineGenerator).with_limits(limits);
    let report = run("intertillage [1..9] -> i: { }\nposit varnothing nabla infty ds2(): { recur ds2(); }",
                     context).unwrap();

    assert_eq!(report.warnings,
               [Warning::RangeTruncated { limit: 5 }, Warning::LoopBounded { ceiling: 3 }]);
    assert_eq!(report.environment.lookup("i"), Some(&Value::Number(5.0)));
}

#[test]
fn delineator_frames_its_output() {
    assert_eq!(output("delineator \"scene\": { print(1); }"),
               ["⎯⎯ delineator: scene ⎯⎯", "1", "⎯⎯ end delineator: scene ⎯⎯"]);
}

#[test]
fn bifurcator_binds_origin_and_branches() {
    let src = "bifurcator 10[2, 3] -> a(x, y): { print(x); print(y); }";

    assert_eq!(output(src),
               ["🔀 Bifurcator 'a': Left → 2, Right → 3 (Origin: 10)", "2", "3"]);

    let report = report(src);
    assert_eq!(report.environment.lookup("a"), Some(&Value::Number(10.0)));
    assert_eq!(report.environment.lookup("x"), Some(&Value::Number(2.0)));
    assert_eq!(report.environment.lookup("y"), Some(&Value::Number(3.0)));
}

#[test]
fn bifurcator_origin_defaults_to_one() {
    assert_eq!(output("bifurcator [\"left\", ∞] -> a(x, y): { print(a); }"),
               ["🔀 Bifurcator 'a': Left → left, Right → ∞ (Origin: 1)", "1"]);
}

#[test]
fn boundary_frames() {
    assert_eq!(output("boundary [2..5] -> frame: { print(frame.top); }"),
               ["[1, 2, 3, 4, 5, 6]"]);
    assert_eq!(output("boundary [2..5] -> frame: { print(frame.left); print(frame.right); }"),
               ["[1, 2, 3]", "[6, 7, 8]"]);
    assert_eq!(output("boundary 3 -> frame: { print(frame.bottom); }"), ["[2, 3, 4]"]);
}

#[test]
fn boundary_with_symbolic_end() {
    let src = "boundary [1..∞] -> f: { print(f.top); print(f.left); print(f.right); }";

    assert_eq!(output(src),
               ["[1, 2, 3, 4, 5, ..., 1+∞]", "[0, 1, 2]", "[0+∞, 1+∞, 2+∞]"]);
}

#[test]
fn boundary_with_shifted_symbolic_end() {
    let src = "boundary [1..∞ + 3] -> f: { print(f.right); }";

    assert_eq!(output(src), ["[3+∞, 4+∞, 5+∞]"]);
}

#[test]
fn boundary_unwraps_frames() {
    let src = "boundary [2..5] -> f: { boundary f -> g: { print(g.top); } }";
    assert_eq!(output(src), ["[0, 1, 2, 3, 4, 5, 6, 7]"]);

    let src = "boundary [2..5] -> f: { boundary f.left -> g: { print(g.top); } }";
    assert_eq!(output(src), ["[0, 1, 2, 3, 4]"]);
}

#[test]
fn boundary_between_strings_uses_the_fallback() {
    let lines = output("boundary [\"light\"..\"dark\"] -> f: { print(f.left); print(f.top); }");
    let text = "Around 'light' and 'dark', symbolic tension forms a transitional envelope.";

    assert_eq!(lines,
               ["⚠️ Concept generator fallback for boundary: no concept generator is configured",
                text,
                text]);
}

#[test]
fn boundary_errors() {
    assert_failure("boundary [0..20000] -> f: { }");
    assert_failure("boundary \"alone\" -> f: { }");
    assert_failure("boundary [2..5] -> f: { print(f.middle); }");
}

#[test]
fn paired_contradiction_fallback() {
    let src = r#"
        contradiction ("Light is a wave.", "Light is a particle.") -> [fp, t]: {
            print(fp);
            print(t);
            print(c);
            print(c_);
        }
    "#;

    assert_eq!(output(src),
               ["⚠️ Concept generator fallback for classification: no concept generator is \
                 configured",
                "Light is a",
                "Between 'Light is a wave.' and 'Light is a particle.', Light is a remains.",
                "Light is a wave.",
                "Light is a particle."]);
}

#[test]
fn paired_contradiction_without_shared_words() {
    let src = r#"contradiction ("up high", "down low") -> [fp, t]: { print(t); }"#;

    assert_eq!(output(src)[1], "Between 'up high' and 'down low', ... ... remains.");
}

#[test]
fn single_contradiction_fallback() {
    let report = report("contradiction \"time flows\" -> c: { }");

    assert_eq!(report.environment.lookup("c"), Some(&Value::from("Not(time flows)")));
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn sol_block_prints_its_declaration() {
    assert_eq!(output("sol day intensity 0.75 { print(\"bright\"); }"),
               ["🌞 sol day intensity = 0.75", "bright"]);
    assert_eq!(output("sol night depth 3 { }"), ["🌞 sol night depth = 3"]);
}

#[test]
fn comments_are_ignored() {
    assert_eq!(output("// nothing here\nprint(1); // trailing"), ["1"]);
}

#[test]
fn runtime_errors() {
    assert!(matches!(runtime_error("print(nope);"),
                     RuntimeError::UndefinedVariable { line: 1, .. }));
    assert!(matches!(runtime_error("\nnothing();"),
                     RuntimeError::UndefinedFunction { line: 2, .. }));
    assert!(matches!(runtime_error("octyl x := 1; print(x.top);"),
                     RuntimeError::UnknownAttribute { .. }));
    assert!(matches!(runtime_error("print(1 / 0);"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("print(1 % 0);"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("intertillage [\"a\"..2] -> i: { }"),
                     RuntimeError::UnsupportedBoundaryRange { .. }));
}

#[test]
fn errors_are_written_to_the_sink() {
    let mut sink = BufferSink::new();
    let result = run("print(1);\nprint(missing);", RunContext::new(&mut sink, &OfflineGenerator));

    assert!(result.is_err());
    assert_eq!(sink.lines(), ["1", "Error on line 2: Undefined variable 'missing'."]);
}

#[test]
fn syntax_errors() {
    assert!(matches!(compile("print(infty);"), Err(ParseError::InftyInExpression { line: 1 })));
    assert!(matches!(compile("octyl x := 1 @ 2;"),
                     Err(ParseError::UnexpectedCharacter { character: '@', .. })));
    assert!(matches!(compile("delineator \"x\": { print(1);"),
                     Err(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(compile("print(1)"), Err(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(compile("octyl := 1;"), Err(ParseError::UnexpectedToken { line: 1, .. })));

    assert_failure("posit varnothing nabla ds2(): { }");
    assert_failure("equiangular 1 = 1: { }");
}

#[test]
fn any_statement_is_accepted_at_top_level() {
    assert_success("recur ds2();");
    assert_success("equiangular 1 == 1: { delineator \"inner\": { print(1); } }");
}
