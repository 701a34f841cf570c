use std::{
    cell::RefCell,
    thread,
    time::{Duration, Instant},
};

use simulang::{
    interpreter::{
        generator::{
            CommandGenerator, ConceptGenerator, GeneratorError, OfflineGenerator, PromptKind,
            TimeoutGenerator,
        },
        runtime::{BufferSink, CancelToken, OutputSink, RunContext, Warning},
        value::core::Value,
    },
    run,
};

/// Answers every request with a fixed text and records what it was asked.
#[derive(Default)]
struct ScriptedGenerator {
    requests: RefCell<Vec<(PromptKind, Vec<String>)>>,
    failing:  Option<PromptKind>,
}

impl ConceptGenerator for ScriptedGenerator {
    fn generate(&self, kind: PromptKind, inputs: &[String]) -> Result<String, GeneratorError> {
        self.requests.borrow_mut().push((kind, inputs.to_vec()));

        if self.failing == Some(kind) {
            return Err(GeneratorError::Failed("scripted failure".to_string()));
        }

        Ok(match kind {
            PromptKind::Boundary => format!("between {} and {}", inputs[0], inputs[1]),
            PromptKind::Contradiction => format!("never {}", inputs[0]),
            PromptKind::Classification => "concave".to_string(),
            PromptKind::FocalPoint => "dusk".to_string(),
            PromptKind::Truth => "dusk holds".to_string(),
        })
    }
}

struct SlowGenerator;

impl ConceptGenerator for SlowGenerator {
    fn generate(&self, _kind: PromptKind, _inputs: &[String]) -> Result<String, GeneratorError> {
        thread::sleep(Duration::from_millis(500));
        Ok("late".to_string())
    }
}

/// Cancels the run once it has received `limit` lines.
struct CancellingSink {
    lines:  Vec<String>,
    limit:  usize,
    cancel: CancelToken,
}

impl OutputSink for CancellingSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
        if self.lines.len() >= self.limit {
            self.cancel.cancel();
        }
    }
}

const PAIR: &str = r#"
    contradiction ("day", "night") -> [fp, t]: {
        print(fp);
        print(t);
    }
"#;

#[test]
fn generator_answers_replace_the_fallbacks() {
    let generator = ScriptedGenerator::default();
    let mut sink = BufferSink::new();
    let src = format!("{PAIR}\ncontradiction \"time flows\" -> n: {{ print(n); }}\nboundary \
                       [\"light\"..\"dark\"] -> f: {{ print(f.top); }}");

    let report = run(&src, RunContext::new(&mut sink, &generator)).unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(sink.lines(),
               ["dusk", "dusk holds", "never time flows", "between light and dark"]);
}

#[test]
fn contradiction_requests_build_on_each_other() {
    let generator = ScriptedGenerator::default();
    let mut sink = BufferSink::new();

    run(PAIR, RunContext::new(&mut sink, &generator)).unwrap();

    let requests = generator.requests.borrow();
    let kinds = requests.iter().map(|(kind, _)| *kind).collect::<Vec<_>>();

    assert_eq!(kinds, [PromptKind::Classification, PromptKind::FocalPoint, PromptKind::Truth]);
    assert_eq!(requests[1].1, ["concave", "day", "night"]);
    assert_eq!(requests[2].1, ["concave", "day", "night", "dusk"]);
}

#[test]
fn any_failed_request_falls_back_for_the_pair() {
    let generator = ScriptedGenerator { failing: Some(PromptKind::Truth),
                                        ..ScriptedGenerator::default() };
    let mut sink = BufferSink::new();

    let report = run(PAIR, RunContext::new(&mut sink, &generator)).unwrap();

    assert_eq!(report.warnings,
               [Warning::GeneratorFallback { kind:   PromptKind::Truth,
                                             reason: "scripted failure".to_string(), }]);
    assert_eq!(report.environment.lookup("fp"), Some(&Value::from("...")));
    assert_eq!(sink.lines()[0],
               "⚠️ Concept generator fallback for truth statement: scripted failure");
}

#[test]
fn cancelled_runs_skip_loops() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut sink = BufferSink::new();
    let context = RunContext::new(&mut sink, &OfflineGenerator).with_cancel(cancel);
    let src = r#"
        print("before");
        intertillage [1..5] -> i: { print(i); }
        posit varnothing nabla infty ds2(): { print("never"); }
    "#;

    let report = run(src, context).unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(sink.lines(), ["before"]);
}

#[test]
fn cancellation_stops_a_running_loop() {
    let cancel = CancelToken::new();
    let mut sink = CancellingSink { lines:  Vec::new(),
                                    limit:  3,
                                    cancel: cancel.clone(), };
    let src = r"
        octyl n := 0;
        posit varnothing nabla infty ds2(): {
            print(n);
            n := n + 1;
            recur ds2();
        }
    ";

    let report = run(src, RunContext::new(&mut sink, &OfflineGenerator).with_cancel(cancel))
        .unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.environment.lookup("n"), Some(&Value::Number(3.0)));
    assert_eq!(sink.lines, ["0", "1", "2"]);
}

#[test]
fn slow_generators_time_out() {
    let generator = TimeoutGenerator::new(SlowGenerator, Duration::from_millis(20));

    assert_eq!(generator.generate(PromptKind::FocalPoint, &[]),
               Err(GeneratorError::TimedOut(Duration::from_millis(20))));
}

#[test]
fn timed_out_boundary_falls_back() {
    let generator = TimeoutGenerator::new(SlowGenerator, Duration::from_millis(20));
    let mut sink = BufferSink::new();

    let report = run("boundary [\"up\"..\"down\"] -> f: { print(f.right); }",
                     RunContext::new(&mut sink, &generator)).unwrap();

    assert!(matches!(report.warnings[..],
                     [Warning::GeneratorFallback { kind: PromptKind::Boundary, .. }]));
    assert_eq!(sink.lines()[1],
               "Around 'up' and 'down', symbolic tension forms a transitional envelope.");
}

#[cfg(unix)]
#[test]
fn command_generator_reads_stdout() {
    let generator = CommandGenerator::new("cat > /dev/null; echo \"  $SIMULANG_PROMPT_KIND  \"");

    assert_eq!(generator.generate(PromptKind::FocalPoint, &["a".into(), "b".into(), "c".into()]),
               Ok("focal point".to_string()));
}

#[cfg(unix)]
#[test]
fn command_generator_failures() {
    let exits = CommandGenerator::new("cat > /dev/null; exit 1");
    let silent = CommandGenerator::new("cat > /dev/null");

    assert!(matches!(exits.generate(PromptKind::Contradiction, &["x".into()]),
                     Err(GeneratorError::Failed(_))));
    assert!(matches!(silent.generate(PromptKind::Contradiction, &["x".into()]),
                     Err(GeneratorError::Failed(_))));
}

#[cfg(unix)]
#[test]
fn command_generator_may_ignore_its_input() {
    let generator = CommandGenerator::new("echo dusk");
    let long_input = "light ".repeat(40_000);

    for _ in 0..20 {
        assert_eq!(generator.generate(PromptKind::Contradiction, &["time flows".into()]),
                   Ok("dusk".to_string()));
    }
    assert_eq!(generator.generate(PromptKind::Contradiction, &[long_input]),
               Ok("dusk".to_string()));
}

#[cfg(unix)]
#[test]
fn command_generator_kills_slow_commands() {
    let timeout = Duration::from_millis(100);
    let generator = CommandGenerator::new("cat > /dev/null; exec sleep 5").with_timeout(timeout);

    let started = Instant::now();
    let result = generator.generate(PromptKind::Contradiction, &["x".into()]);

    assert_eq!(result, Err(GeneratorError::TimedOut(timeout)));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[cfg(unix)]
#[test]
fn command_generator_answers_within_its_deadline() {
    let generator =
        CommandGenerator::new("cat > /dev/null; echo dawn").with_timeout(Duration::from_secs(5));

    assert_eq!(generator.generate(PromptKind::Contradiction, &["x".into()]),
               Ok("dawn".to_string()));
}
