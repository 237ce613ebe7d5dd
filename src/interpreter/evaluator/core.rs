use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, trace, warn};

use crate::{
    ast::Expr,
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::builtin::builtins_frame,
        io::{ConsoleIo, Io},
        lexer::lex,
        parser::core::parse,
        stack::ensure_sufficient_stack,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested user-defined function calls.
pub const MAX_CALL_DEPTH: usize = 10_000;

/// Settings of one interpreter session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Nested user-defined calls allowed before `StackOverflow` is raised.
    pub max_call_depth: usize,
    /// Seed for the `random` builtin. `None` seeds from the operating
    /// system.
    pub seed:           Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: MAX_CALL_DEPTH,
               seed:           None, }
    }
}

/// Stores the runtime evaluation context.
///
/// A `Context` is one interpretation session. It owns the environment that
/// persists across top-level expressions (so later input sees earlier
/// definitions, as in a REPL), the I/O sink, and the random number generator
/// behind the `random` builtin.
///
/// ## Usage
///
/// Create one `Context` and feed it source text with [`Context::interpret`]
/// (errors are returned) or [`Context::run`] (errors are reported to the
/// sink). Sessions share nothing; hosts that need several interpreters
/// create several contexts.
///
/// # Example
/// ```
/// use pierogi::interpreter::{evaluator::core::Context, io::BufferIo, value::core::Value};
///
/// let mut ctx = Context::with_io(BufferIo::new());
///
/// ctx.interpret("square = \\x { x * x }").unwrap();
/// let values = ctx.interpret("square(7)").unwrap();
///
/// assert_eq!(values, vec![Value::Number(49.0)]);
/// ```
pub struct Context {
    /// The live environment: the root frame holds top-level bindings.
    pub env:          Environment,
    io:               Box<dyn Io>,
    config:           Config,
    /// Nested user-defined calls currently in progress.
    pub(crate) depth: usize,
    rng:              StdRng,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a session on the console with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_io(ConsoleIo)
    }

    /// Creates a session that talks to `io`, with the default configuration.
    #[must_use]
    pub fn with_io(io: impl Io + 'static) -> Self {
        Self::with_config(Config::default(), io)
    }

    /// Creates a session with explicit settings.
    #[must_use]
    pub fn with_config(config: Config, io: impl Io + 'static) -> Self {
        let rng = config.seed
                        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self { env: Environment::with_builtins(builtins_frame()),
               io: Box::new(io),
               config,
               depth: 0,
               rng }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The session's I/O sink.
    pub fn io(&mut self) -> &mut dyn Io {
        self.io.as_mut()
    }

    /// The session's random number generator.
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Evaluates an expression against the live environment and returns the
    /// resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, lists, identifiers,
    /// definitions, groups, unary and binary operations, conditionals,
    /// function literals and calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.dispatch(expr))
    }

    fn dispatch(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::List { items, .. } => {
                let values = items.iter()
                                  .map(|item| self.eval(item))
                                  .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::Identifier { symbol, line } => {
                self.env
                    .lookup(symbol)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedSymbol { name: symbol.clone(),
                                                                   line: *line, })
            },
            Expr::Definition { symbol, value, .. } => self.eval_definition(symbol, value),
            Expr::Group { inner, .. } => self.eval(inner),
            Expr::Unary { op, operand, line } => self.eval_unary(expr, *op, operand, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary(expr, left, *op, right, *line),
            Expr::If { condition,
                       consequent,
                       alternative,
                       line, } => self.eval_if(condition, consequent, alternative, *line),
            Expr::Function { parameters, body, .. } => {
                Ok(self.make_function(parameters, body, None))
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(expr, callee, arguments, *line),
        }
    }

    /// Lexes, parses and evaluates a source unit.
    ///
    /// Top-level expressions are evaluated in order against the persistent
    /// environment. Each one is atomic: if it fails, the bindings it made are
    /// rolled back and the rest of the unit is abandoned, while bindings made
    /// by earlier expressions stay.
    ///
    /// # Returns
    /// The value of every top-level expression, in order.
    ///
    /// # Errors
    /// The first static or runtime error.
    pub fn interpret(&mut self, source: &str) -> Result<Vec<Value>, Error> {
        let tokens = lex(source)?;
        let program = parse(&tokens)?;

        let mut values = Vec::with_capacity(program.len());
        for expr in &program {
            trace!(line = expr.line_number(), "evaluating top-level expression");

            let checkpoint = self.env.snapshot();
            match self.eval(expr) {
                Ok(value) => values.push(value),
                Err(e) => {
                    self.env = checkpoint;
                    self.depth = 0;
                    return Err(e.into());
                },
            }
        }

        debug!(values = values.len(), "interpreted source unit");
        Ok(values)
    }

    /// Like [`Context::interpret`], but reports an error to the I/O sink
    /// instead of returning it.
    ///
    /// # Returns
    /// `Some(values)` on success, `None` if an error was reported.
    pub fn run(&mut self, source: &str) -> Option<Vec<Value>> {
        match self.interpret(source) {
            Ok(values) => Some(values),
            Err(e) => {
                let report = e.report();
                warn!(kind = ?report.kind, line = report.line, "{e}");
                self.io.report_error(&report);
                None
            },
        }
    }
}
