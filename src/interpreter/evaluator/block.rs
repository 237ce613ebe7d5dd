use std::rc::Rc;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::{
            binary::incompatible,
            core::{Context, EvalResult},
        },
        value::{
            core::Value,
            function::{Function, UserFunction},
        },
    },
};

impl Context {
    /// Evaluates expressions in order and returns the value of the last one,
    /// or `nil` for an empty sequence.
    pub(crate) fn eval_sequence(&mut self, exprs: &[Expr]) -> EvalResult<Value> {
        let mut last = Value::Nil;
        for expr in exprs {
            last = self.eval(expr)?;
        }
        Ok(last)
    }

    /// Evaluates an `if` expression.
    ///
    /// The chosen branch runs in a fresh frame, which is popped again whether
    /// the branch succeeds or fails, so its bindings never leak.
    ///
    /// # Errors
    /// `IncompatibleTypes` if the condition is not a boolean.
    pub(crate) fn eval_if(&mut self,
                          condition: &Expr,
                          consequent: &[Expr],
                          alternative: &[Expr],
                          line: usize)
                          -> EvalResult<Value> {
        let Value::Bool(holds) = self.eval(condition)? else {
            return Err(incompatible(condition, line));
        };

        let branch = if holds { consequent } else { alternative };

        self.env.push_frame();
        let result = self.eval_sequence(branch);
        self.env.pop_frame();

        result
    }

    /// Evaluates a definition and binds the result in the innermost frame.
    ///
    /// A function literal bound directly by a definition remembers the name
    /// it was defined under, so that it can call itself.
    ///
    /// # Returns
    /// The bound value.
    pub(crate) fn eval_definition(&mut self, symbol: &str, value: &Expr) -> EvalResult<Value> {
        let value = match value {
            Expr::Function { parameters, body, .. } => {
                self.make_function(parameters, body, Some(symbol))
            },
            other => self.eval(other)?,
        };

        self.env.bind(symbol, value.clone());
        Ok(value)
    }

    /// Builds a closure over a snapshot of the live environment.
    pub(crate) fn make_function(&self,
                                parameters: &Rc<[String]>,
                                body: &Rc<[Expr]>,
                                name: Option<&str>)
                                -> Value {
        let function = UserFunction { parameters: Rc::clone(parameters),
                                      body:       Rc::clone(body),
                                      closure:    self.env.snapshot(),
                                      name:       name.map(str::to_string), };

        Value::Function(Rc::new(Function::UserDefined(function)))
    }
}
