use std::{collections::HashMap, fmt, rc::Rc};

use crate::interpreter::value::core::Value;

/// One lexical scope: a mapping from symbol to value.
pub type Frame = HashMap<String, Value>;

/// A chain of lexical scopes, innermost last.
///
/// Frames are shared copy-on-write: [`Environment::snapshot`] only copies
/// pointers, and [`Environment::bind`] clones a frame the first time it is
/// written while shared. Observably a snapshot is a deep copy: writes through
/// the live environment never show through a snapshot, and vice versa.
///
/// Below the root frame sits the builtins frame, which is never written and
/// is consulted last, so user bindings shadow builtins.
///
/// # Example
/// ```
/// use pierogi::interpreter::{environment::Environment, value::core::Value};
///
/// let mut env = Environment::new();
/// env.bind("n", Value::Number(1.0));
///
/// let frozen = env.snapshot();
/// env.bind("n", Value::Number(2.0));
///
/// assert_eq!(frozen.lookup("n"), Some(&Value::Number(1.0)));
/// assert_eq!(env.lookup("n"), Some(&Value::Number(2.0)));
/// ```
#[derive(Clone)]
pub struct Environment {
    frames:   Vec<Rc<Frame>>,
    builtins: Rc<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment with a single empty root frame and no builtins.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builtins(Frame::new())
    }

    /// Creates an environment with an empty root frame on top of `builtins`.
    #[must_use]
    pub fn with_builtins(builtins: Frame) -> Self {
        Self { frames:   vec![Rc::new(Frame::new())],
               builtins: Rc::new(builtins), }
    }

    /// Enters a new, empty innermost scope.
    pub fn push_frame(&mut self) {
        self.frames.push(Rc::new(Frame::new()));
    }

    /// Leaves the innermost scope. The root frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Binds `symbol` in the innermost frame, overwriting any previous
    /// binding of the same symbol in that frame.
    pub fn bind(&mut self, symbol: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            Rc::make_mut(frame).insert(symbol.into(), value);
        }
    }

    /// Looks `symbol` up from the innermost frame outwards, then in the
    /// builtins. The first match wins.
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<&Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(symbol))
            .or_else(|| self.builtins.get(symbol))
    }

    /// Returns `true` if any frame, or the builtins, binds `symbol`.
    #[must_use]
    pub fn has(&self, symbol: &str) -> bool {
        self.lookup(symbol).is_some()
    }

    /// Returns an independent copy of the whole frame chain.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Number of frames above the builtins, the root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<&String> = self.frames.iter().flat_map(|frame| frame.keys()).collect();
        symbols.sort();
        symbols.dedup();

        f.debug_struct("Environment")
         .field("depth", &self.frames.len())
         .field("symbols", &symbols)
         .finish_non_exhaustive()
    }
}
