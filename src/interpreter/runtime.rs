use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::interpreter::generator::{ConceptGenerator, PromptKind};

/// Default number of passes a function body may run.
pub const DEFAULT_MAX_PASSES: usize = 100;
/// Default number of offsets an `intertillage` range may span.
pub const DEFAULT_MAX_RANGE: usize = 10_000;
/// Default number of nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;
/// Default number of leading `intertillage` iterations whose output is shown.
pub const DEFAULT_DISPLAY_HEAD: usize = 100;
/// Default number of trailing `intertillage` iterations whose output is shown.
pub const DEFAULT_DISPLAY_TAIL: usize = 1;

/// Tunable ceilings applied during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Passes a function body may run before it is stopped.
    pub max_passes:   usize,
    /// Offsets an `intertillage` range may span before it is truncated.
    pub max_range:    usize,
    /// Nested function calls allowed before a run is aborted.
    pub max_depth:    usize,
    /// Leading iterations whose output is shown for long ranges.
    pub display_head: usize,
    /// Trailing iterations whose output is shown for long ranges.
    pub display_tail: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_passes:   DEFAULT_MAX_PASSES,
               max_range:    DEFAULT_MAX_RANGE,
               max_depth:    DEFAULT_MAX_CALL_DEPTH,
               display_head: DEFAULT_DISPLAY_HEAD,
               display_tail: DEFAULT_DISPLAY_TAIL, }
    }
}

/// A cooperative cancellation flag shared between a run and its caller.
///
/// Clones share the same flag. The interpreter only samples it at the top of
/// loop iterations, so a statement that already started always completes.
///
/// # Example
/// ```
/// use simulang::interpreter::runtime::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
///
/// assert!(token.should_continue());
/// handle.cancel();
/// assert!(!token.should_continue());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the run stops before its next loop iteration.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `false` once [`Self::cancel`] has been called.
    #[must_use]
    pub fn should_continue(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }
}

/// An append-only destination for printed output and warnings.
pub trait OutputSink {
    /// Appends one line of output.
    fn write_line(&mut self, line: &str);
}

/// Writes every line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Collects output lines in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the buffer, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// A recoverable condition reported during a run.
///
/// Warnings never abort execution. They are written to the output sink and
/// collected in the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A function body hit its pass ceiling.
    LoopBounded {
        /// The ceiling in effect.
        ceiling: usize,
    },
    /// An `intertillage` range was given in descending order.
    BoundsReversed {
        /// The start offset as written.
        start: i64,
        /// The end offset as written.
        end:   i64,
    },
    /// An `intertillage` range was longer than allowed.
    RangeTruncated {
        /// Number of offsets kept.
        limit: usize,
    },
    /// The concept generator failed and the local fallback was used.
    GeneratorFallback {
        /// The request that failed.
        kind:   PromptKind,
        /// Why it failed.
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoopBounded { ceiling } => write!(f, "Loop bounded to {ceiling} steps."),
            Self::BoundsReversed { start, end } => {
                write!(f, "Reversing intertillage bounds: start={start}, end={end}")
            },
            Self::RangeTruncated { limit } => write!(f, "Loop bounded to {limit} steps."),
            Self::GeneratorFallback { kind, reason } => {
                write!(f, "Concept generator fallback for {kind}: {reason}")
            },
        }
    }
}

/// Everything a single run needs from its caller.
///
/// A context is created per run and handed to the interpreter, which owns
/// all remaining state (environment and function table) itself.
pub struct RunContext<'a> {
    /// Receives printed output, markers and warnings.
    pub sink:      &'a mut dyn OutputSink,
    /// Source of contradiction and boundary texts.
    pub generator: &'a dyn ConceptGenerator,
    /// Cancellation flag polled between loop iterations.
    pub cancel:    CancelToken,
    /// Loop and range ceilings.
    pub limits:    Limits,
}

impl<'a> RunContext<'a> {
    /// Creates a context with a fresh cancellation token and default limits.
    pub fn new(sink: &'a mut dyn OutputSink, generator: &'a dyn ConceptGenerator) -> Self {
        Self { sink,
               generator,
               cancel: CancelToken::new(),
               limits: Limits::default() }
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Replaces the limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
