use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, function::Function},
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first and must be a function. The number of
    /// arguments is checked against its arity before any argument is
    /// evaluated; arguments are then evaluated left to right in the caller's
    /// environment.
    ///
    /// # Errors
    /// - `UncallableValue` if the callee is not a function.
    /// - `IncorrectNumberOfArguments` if the argument count differs from the
    ///   arity.
    /// - Any error raised by the arguments or the function body.
    pub(crate) fn eval_call(&mut self,
                            expr: &Expr,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let Value::Function(function) = self.eval(callee)? else {
            return Err(RuntimeError::UncallableValue { expr: callee.to_string(),
                                                       line });
        };

        if function.arity() != arguments.len() {
            return Err(RuntimeError::IncorrectNumberOfArguments { expr: expr.to_string(),
                                                                  expected: function.arity(),
                                                                  found: arguments.len(),
                                                                  line });
        }

        let arguments = arguments.iter()
                                 .map(|argument| self.eval(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;

        self.call_function(&function, arguments, line)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// Natives run directly. A user-defined function runs in a fresh frame
    /// pushed onto a copy of its closure, with its own name (if it was
    /// defined under one) and then its parameters bound in that frame. The
    /// caller's environment is restored afterwards, on success and on error.
    ///
    /// # Parameters
    /// - `function`: The function to call.
    /// - `arguments`: Argument values, one per parameter.
    /// - `line`: Line of the call, for error reporting.
    ///
    /// # Errors
    /// - `IncorrectNumberOfArguments` if `arguments` does not match the arity.
    /// - `StackOverflow` if the configured call depth is exceeded.
    /// - Any error raised by the function body.
    ///
    /// # Example
    /// ```
    /// use pierogi::interpreter::{evaluator::core::Context, io::BufferIo, value::core::Value};
    ///
    /// let mut ctx = Context::with_io(BufferIo::new());
    /// let values = ctx.interpret("\\a, b { a .. b }").unwrap();
    /// let Value::Function(concat) = &values[0] else { unreachable!() };
    ///
    /// let joined = ctx.call_function(concat, vec!["pie".into(), "rogi".into()], 1);
    /// assert_eq!(joined, Ok(Value::from("pierogi")));
    /// ```
    pub fn call_function(&mut self,
                         function: &Rc<Function>,
                         arguments: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        if function.arity() != arguments.len() {
            return Err(RuntimeError::IncorrectNumberOfArguments { expr: function.to_string(),
                                                                  expected: function.arity(),
                                                                  found: arguments.len(),
                                                                  line });
        }

        let user = match function.as_ref() {
            Function::Native(native) => {
                trace!(name = native.name, "calling builtin");
                return (native.func)(self, &arguments, line);
            },
            Function::UserDefined(user) => user,
        };

        if self.depth >= self.config().max_call_depth {
            return Err(RuntimeError::StackOverflow { depth: self.config().max_call_depth,
                                                     line });
        }

        let mut env = user.closure.snapshot();
        env.push_frame();
        if let Some(name) = &user.name {
            env.bind(name.as_str(), Value::Function(Rc::clone(function)));
        }
        for (parameter, argument) in user.parameters.iter().zip(arguments) {
            env.bind(parameter.as_str(), argument);
        }

        trace!(depth = self.depth, "calling {function}");

        let caller = std::mem::replace(&mut self.env, env);
        self.depth += 1;
        let result = self.eval_sequence(&user.body);
        self.depth -= 1;
        self.env = caller;

        result
    }
}
