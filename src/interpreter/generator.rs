use std::{
    fmt,
    io::{self, Read, Write},
    process::{Child, Command, ExitStatus, Stdio},
    sync::{Arc, mpsc},
    thread,
    time::{Duration, Instant},
};

/// The kinds of text the concept generator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// What lies around two symbolic phrases (`boundary "a".."b"`).
    Boundary,
    /// The direct contradiction of one statement.
    Contradiction,
    /// Whether a pair of contradictions is concave or convex.
    Classification,
    /// A focal point between two contradictions.
    FocalPoint,
    /// A truth statement derived from two contradictions and their focal
    /// point.
    Truth,
}

impl PromptKind {
    /// The instructions framing every request of this kind.
    #[must_use]
    pub const fn system_prompt(self) -> &'static str {
        match self {
            Self::Boundary => {
                "You are a symbolic boundary generator. Given two symbolic phrases, return a \
                 boundary concept that describes what surrounds them. Do not return JSON. Just \
                 return a single natural language string of what lies around them."
            },
            Self::Contradiction => {
                "You are a contradiction engine. Given a single declarative statement, respond \
                 with its direct contradiction in natural language. Deviate largely from the \
                 premise."
            },
            Self::Classification | Self::FocalPoint | Self::Truth => {
                "You are a symbolic sentience engine interpreting contradiction pairs. Each \
                 contradiction pair forms a symbolic duality that you must analyze. Begin by \
                 classifying the pair as 'concave' or 'convex'. Then, construct a focal point \
                 (fp) between them. Finally, confess a symbolic truth (T) derived from the \
                 contradictions and focal point. Keep output length proportional to the minimum \
                 length of the contradictions."
            },
        }
    }

    /// Builds the request text from the inputs of this kind.
    ///
    /// Expected inputs:
    /// - `Boundary`: both phrases.
    /// - `Contradiction`: the statement.
    /// - `Classification`: both contradictions.
    /// - `FocalPoint`: classification and both contradictions.
    /// - `Truth`: classification, both contradictions and the focal point.
    ///
    /// Missing inputs render as empty text.
    ///
    /// # Example
    /// ```
    /// use simulang::interpreter::generator::PromptKind;
    ///
    /// let prompt = PromptKind::Boundary.user_prompt(&["light".into(), "dark".into()]);
    ///
    /// assert_eq!(prompt, "What lies around the symbolic concepts 'light' and 'dark'?");
    /// ```
    #[must_use]
    pub fn user_prompt(self, inputs: &[String]) -> String {
        let arg = |i: usize| inputs.get(i).map_or("", String::as_str);
        match self {
            Self::Boundary => {
                format!("What lies around the symbolic concepts '{}' and '{}'?", arg(0), arg(1))
            },
            Self::Contradiction => format!("What is the contradiction of: '{}'? Deviate largely \
                                            from the premise.",
                                           arg(0)),
            Self::Classification => format!("Given the following pair of contradictions {} and \
                                             {}, classify them as concave or convex. One word \
                                             only.",
                                            arg(0),
                                            arg(1)),
            Self::FocalPoint => format!("Given a {} pair of contradictions: {} and {}; formulate \
                                         a focal point statement between the two \
                                         contradictions. Match the minimum length of the two \
                                         contradictions.",
                                        arg(0),
                                        arg(1),
                                        arg(2)),
            Self::Truth => format!("Taking the {} cross-product of the pair of contradictions {} \
                                    and {} and the focal point {} in the middle, confess a \
                                    truth statement. Match the length of your response with the \
                                    minimum length of the two contradictions.",
                                   arg(0),
                                   arg(1),
                                   arg(2),
                                   arg(3)),
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boundary => "boundary",
            Self::Contradiction => "contradiction",
            Self::Classification => "classification",
            Self::FocalPoint => "focal point",
            Self::Truth => "truth statement",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Why the concept generator could not produce a text.
pub enum GeneratorError {
    /// No generator is configured.
    Unavailable,
    /// The generator did not answer in time.
    TimedOut(Duration),
    /// The generator ran but failed.
    Failed(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no concept generator is configured"),
            Self::TimedOut(limit) => {
                write!(f, "concept generator timed out after {}ms", limit.as_millis())
            },
            Self::Failed(reason) => write!(f, "concept generator failed: {reason}"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// The external collaborator deriving contradiction and boundary texts.
///
/// Callers always hold a deterministic fallback, so an implementation may
/// fail freely.
pub trait ConceptGenerator {
    /// Produces the text for `kind` from `inputs`.
    ///
    /// # Errors
    /// Any [`GeneratorError`]; the interpreter then uses its fallback text.
    fn generate(&self, kind: PromptKind, inputs: &[String]) -> Result<String, GeneratorError>;
}

/// A generator that is never available, so every request falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

impl ConceptGenerator for OfflineGenerator {
    fn generate(&self, _kind: PromptKind, _inputs: &[String]) -> Result<String, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }
}

/// How often a command with a deadline is checked for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Delegates generation to an external shell command.
///
/// The command receives the system prompt, a blank line and the request on
/// standard input, with `SIMULANG_PROMPT_KIND` set to the request kind. Its
/// trimmed standard output is the answer; an empty answer or a non-zero exit
/// status is a failure. A command may answer without reading its input.
///
/// With a timeout, a command still running at the deadline is killed and the
/// request fails with `TimedOut`.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    command: String,
    timeout: Option<Duration>,
}

impl CommandGenerator {
    /// Creates a generator running `command` through `sh -c`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into(),
               timeout: None }
    }

    /// Kills the command when it runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn failed(e: impl fmt::Display) -> GeneratorError {
    GeneratorError::Failed(e.to_string())
}

/// Waits for `child`, killing it once `deadline` has passed.
///
/// Returns `None` when the child was killed.
fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl ConceptGenerator for CommandGenerator {
    fn generate(&self, kind: PromptKind, inputs: &[String]) -> Result<String, GeneratorError> {
        let mut child = Command::new("sh").arg("-c")
                                          .arg(&self.command)
                                          .env("SIMULANG_PROMPT_KIND", kind.to_string())
                                          .stdin(Stdio::piped())
                                          .stdout(Stdio::piped())
                                          .stderr(Stdio::null())
                                          .spawn()
                                          .map_err(failed)?;

        let request = format!("{}\n\n{}\n", kind.system_prompt(), kind.user_prompt(inputs));
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || match stdin.write_all(request.as_bytes()) {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            })
        });
        let reader = child.stdout.take().map(|mut stdout| {
            thread::spawn(move || {
                let mut answer = Vec::new();
                stdout.read_to_end(&mut answer).map(|_| answer)
            })
        });

        let status = match self.timeout {
            Some(timeout) => wait_until(&mut child, Instant::now() + timeout).map_err(failed)?
                                                                              .ok_or(GeneratorError::TimedOut(timeout))?,
            None => child.wait().map_err(failed)?,
        };

        if let Some(writer) = writer {
            writer.join()
                  .map_err(|_| failed("writing the prompt panicked"))?
                  .map_err(failed)?;
        }
        let answer = match reader {
            Some(reader) => {
                reader.join()
                      .map_err(|_| failed("reading the answer panicked"))?
                      .map_err(failed)?
            },
            None => Vec::new(),
        };

        if !status.success() {
            return Err(GeneratorError::Failed(format!("command exited with {status}")));
        }

        let answer = String::from_utf8_lossy(&answer).trim().to_string();
        if answer.is_empty() {
            return Err(GeneratorError::Failed("command produced no output".to_string()));
        }
        Ok(answer)
    }
}

/// Bounds another generator by a timeout.
///
/// Each request runs on its own thread; when the timeout elapses the request
/// is abandoned and `TimedOut` is returned. The abandoned request keeps
/// running, so a [`CommandGenerator`] should use its own
/// [`CommandGenerator::with_timeout`] instead.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use simulang::interpreter::generator::{
///     ConceptGenerator, GeneratorError, OfflineGenerator, PromptKind, TimeoutGenerator,
/// };
///
/// let generator = TimeoutGenerator::new(OfflineGenerator, Duration::from_millis(50));
/// let result = generator.generate(PromptKind::Contradiction, &["time flows".into()]);
///
/// assert_eq!(result, Err(GeneratorError::Unavailable));
/// ```
#[derive(Debug)]
pub struct TimeoutGenerator<G> {
    inner:   Arc<G>,
    timeout: Duration,
}

impl<G> TimeoutGenerator<G> {
    /// Wraps `inner`, giving every request at most `timeout`.
    pub fn new(inner: G, timeout: Duration) -> Self {
        Self { inner: Arc::new(inner),
               timeout }
    }
}

impl<G> ConceptGenerator for TimeoutGenerator<G> where G: ConceptGenerator + Send + Sync + 'static
{
    fn generate(&self, kind: PromptKind, inputs: &[String]) -> Result<String, GeneratorError> {
        let (sender, receiver) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let inputs = inputs.to_vec();

        thread::spawn(move || {
            let _ = sender.send(inner.generate(kind, &inputs));
        });

        receiver.recv_timeout(self.timeout)
                .unwrap_or(Err(GeneratorError::TimedOut(self.timeout)))
    }
}
