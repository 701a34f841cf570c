use std::{fs, process::ExitCode, time::Duration};

use clap::Parser;
use simulang::{
    compile,
    interpreter::{
        generator::{CommandGenerator, ConceptGenerator, OfflineGenerator},
        runtime::{
            DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_PASSES, DEFAULT_MAX_RANGE, Limits, RunContext,
            StdoutSink,
        },
    },
    run,
};

/// simulang runs SimuLang programs: bounded, symbolic-infinity aware scripts
/// of constants, ranges, boundaries and contradictions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells simulang to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Only compile the program and print its syntax tree.
    #[arg(short, long)]
    check: bool,

    /// Passes a function body may run before it is stopped.
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    max_passes: usize,

    /// Offsets an intertillage range may span before it is truncated.
    #[arg(long, default_value_t = DEFAULT_MAX_RANGE)]
    max_range: usize,

    /// Nested function calls allowed before the run is aborted.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Shell command used as concept generator. It reads the prompt on
    /// standard input and answers on standard output. Without it every
    /// contradiction and string boundary uses its local fallback.
    #[arg(long)]
    generator_cmd: Option<String>,

    /// Milliseconds the concept generator may take per request before it
    /// is killed.
    #[arg(long, default_value_t = 10_000)]
    generator_timeout_ms: u64,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if args.check {
        return match compile(&script) {
            Ok(program) => {
                println!("Compilation successful.");
                println!("{program:#?}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    let generator: Box<dyn ConceptGenerator> = match &args.generator_cmd {
        Some(command) => {
            let timeout = Duration::from_millis(args.generator_timeout_ms);
            Box::new(CommandGenerator::new(command.as_str()).with_timeout(timeout))
        },
        None => Box::new(OfflineGenerator),
    };

    let limits = Limits { max_passes: args.max_passes,
                          max_range: args.max_range,
                          max_depth: args.max_depth,
                          ..Limits::default() };

    let mut sink = StdoutSink;
    let context = RunContext::new(&mut sink, generator.as_ref()).with_limits(limits);

    // The error message already went to standard output.
    if run(&script, context).is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
