use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        evaluator::{
            binary::incompatible,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation.
    ///
    /// Negation requires a number and `not` requires a boolean.
    ///
    /// # Parameters
    /// - `expr`: The whole unary expression, used in error messages.
    /// - `op`: The operator.
    /// - `operand`: The operand expression.
    /// - `line`: Line number of the operator.
    ///
    /// # Errors
    /// `IncompatibleTypes` if the operand has the wrong variant.
    pub(crate) fn eval_unary(&mut self,
                             expr: &Expr,
                             op: UnaryOperator,
                             operand: &Expr,
                             line: usize)
                             -> EvalResult<Value> {
        match (op, self.eval(operand)?) {
            (UnaryOperator::Negation, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            _ => Err(incompatible(expr, line)),
        }
    }
}
