//! External command execution
//!
//! Every command the prompt runs (`git status`, `python --version`) goes
//! through [`Cmd`], which logs the invocation and its outcome:
//!
//! ```text
//! $ git status [/home/user/project]
//! [pl-trace] context=/home/user/project cmd="git status" dur_us=4210 ok=true
//! ```
//!
//! Callers depend on the [`CommandRunner`] capability rather than on
//! `std::process` directly, so parsing and rendering can be exercised on
//! canned output.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

// ============================================================================
// Builder-style command execution
// ============================================================================

/// Builder for executing commands with logging and an optional timeout.
///
/// ```ignore
/// let output = Cmd::new("git")
///     .arg("status")
///     .current_dir(&cwd)
///     .env("LC_ALL", "C")
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    context: Option<String>,
    timeout: Option<Duration>,
    envs: Vec<(String, String)>,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set the logging context (typically the directory being inspected).
    pub fn context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }

    /// Kill the command if it runs longer than `duration`.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.envs.push((key.into(), val.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The command line as it appears in logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Execute the command and return its output.
    ///
    /// Stdin is closed. Stdout and stderr are both captured.
    pub fn run(&self) -> io::Result<Output> {
        let cmd_str = self.display();

        match &self.context {
            Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
            None => log::debug!("$ {}", cmd_str),
        }

        let t0 = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, val) in &self.envs {
            cmd.env(key, val);
        }

        let result = match self.timeout {
            Some(timeout) => run_with_timeout(&mut cmd, timeout),
            None => cmd.stdin(Stdio::null()).output(),
        };

        let dur_us = t0.elapsed().as_micros() as u64;
        let ctx = self.context.as_deref().unwrap_or("-");
        match &result {
            Ok(output) => log::debug!(
                "[pl-trace] context={} cmd=\"{}\" dur_us={} ok={}",
                ctx,
                cmd_str,
                dur_us,
                output.status.success()
            ),
            Err(e) => log::debug!(
                "[pl-trace] context={} cmd=\"{}\" dur_us={} err=\"{}\"",
                ctx,
                cmd_str,
                dur_us,
                e
            ),
        }

        result
    }
}

/// Spawn with piped output, read both pipes on helper threads, and kill the
/// child once `timeout` elapses.
fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> io::Result<Output> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain both pipes concurrently so a full buffer can't stall the child
    let mut stdout_handle = child.stdout.take();
    let mut stderr_handle = child.stderr.take();
    let stdout_thread = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(ref mut handle) = stdout_handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_thread = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(ref mut handle) = stderr_handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    });

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        waited => {
            reap(&mut child, [stdout_thread, stderr_thread]);
            return Err(waited.err().unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::TimedOut, "command timed out")
            }));
        }
    };

    Ok(Output {
        status,
        stdout: stdout_thread.join().unwrap_or_default(),
        stderr: stderr_thread.join().unwrap_or_default(),
    })
}

/// Kill the child, collect its exit status and wait for the pipe readers.
fn reap(child: &mut Child, readers: [JoinHandle<Vec<u8>>; 2]) {
    let _ = child.kill();
    let _ = child.wait();
    for reader in readers {
        let _ = reader.join();
    }
}

// ============================================================================
// Runner capability
// ============================================================================

/// Output of a finished command, with stderr appended after stdout.
///
/// Mirrors running the command with `2>&1`: error lines such as
/// `fatal: not a git repository` are visible to parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub text: String,
    pub success: bool,
}

impl From<Output> for CapturedOutput {
    fn from(output: Output) -> Self {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() && !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Self {
            text,
            success: output.status.success(),
        }
    }
}

/// Runs a [`Cmd`] and returns its captured output.
pub trait CommandRunner {
    fn run(&self, cmd: &Cmd) -> io::Result<CapturedOutput>;
}

/// Runs commands as real child processes, inheriting the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &Cmd) -> io::Result<CapturedOutput> {
        cmd.run().map(CapturedOutput::from)
    }
}
