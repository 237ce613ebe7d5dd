use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, BufRead, Write},
    rc::Rc,
};

use tracing::warn;

use crate::error::Report;

/// The capability the interpreter uses to talk to its host.
///
/// The core never writes to the terminal itself: `print` builtins, `input`
/// and every error reported by [`Context::run`] go through this trait.
///
/// [`Context::run`]: crate::interpreter::evaluator::core::Context::run
pub trait Io {
    /// Writes `text` as is; no newline is appended.
    fn print(&mut self, text: &str);
    /// Reads one line, without its line terminator. Returns an empty string
    /// at end of input.
    fn request_input(&mut self) -> String;
    /// Presents a diagnostic.
    fn report_error(&mut self, report: &Report);
}

/// Standard output, standard input and standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleIo;

impl Io for ConsoleIo {
    fn print(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
            warn!("failed to write to stdout: {e}");
        }
    }

    fn request_input(&mut self) -> String {
        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            warn!("failed to read from stdin: {e}");
        }
        line.trim_end_matches(['\n', '\r']).to_string()
    }

    fn report_error(&mut self, report: &Report) {
        eprintln!("{report}");
    }
}

#[derive(Debug, Default)]
struct Buffer {
    output:  String,
    input:   VecDeque<String>,
    reports: Vec<Report>,
}

/// An in-memory sink.
///
/// Clones share the same buffer, so a host can hand one clone to a
/// [`Context`] and inspect the output and reports through another.
///
/// # Example
/// ```
/// use pierogi::interpreter::{evaluator::core::Context, io::BufferIo};
///
/// let io = BufferIo::with_input(["world"]);
/// let mut ctx = Context::with_io(io.clone());
///
/// ctx.run(r#"print("hello " .. input())"#);
///
/// assert_eq!(io.output(), "hello world");
/// ```
///
/// [`Context`]: crate::interpreter::evaluator::core::Context
#[derive(Debug, Default, Clone)]
pub struct BufferIo {
    inner: Rc<RefCell<Buffer>>,
}

impl BufferIo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink whose `request_input` answers with `lines`, in order.
    #[must_use]
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let io = Self::new();
        for line in lines {
            io.push_input(line);
        }
        io
    }

    /// Queues one more line of input.
    pub fn push_input(&self, line: impl Into<String>) {
        self.inner.borrow_mut().input.push_back(line.into());
    }

    /// Everything printed so far.
    #[must_use]
    pub fn output(&self) -> String {
        self.inner.borrow().output.clone()
    }

    /// Returns everything printed so far and clears it.
    #[must_use]
    pub fn take_output(&self) -> String {
        std::mem::take(&mut self.inner.borrow_mut().output)
    }

    /// Every diagnostic reported so far.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.inner.borrow().reports.clone()
    }
}

impl Io for BufferIo {
    fn print(&mut self, text: &str) {
        self.inner.borrow_mut().output.push_str(text);
    }

    fn request_input(&mut self) -> String {
        self.inner.borrow_mut().input.pop_front().unwrap_or_default()
    }

    fn report_error(&mut self, report: &Report) {
        self.inner.borrow_mut().reports.push(report.clone());
    }
}
