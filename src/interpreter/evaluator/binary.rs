use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// `and` and `or` short-circuit; every other operator evaluates both
    /// operands, left first.
    ///
    /// # Parameters
    /// - `expr`: The whole binary expression, used in error messages.
    /// - `left`: Left-hand side expression.
    /// - `op`: The operator.
    /// - `right`: Right-hand side expression.
    /// - `line`: Line number of the operator.
    ///
    /// # Errors
    /// - `IncompatibleTypes` if an operand has the wrong variant.
    /// - `DivisionByZero` if a division yields infinity or NaN.
    pub(crate) fn eval_binary(&mut self,
                              expr: &Expr,
                              left: &Expr,
                              op: BinaryOperator,
                              right: &Expr,
                              line: usize)
                              -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(expr, left, op, right, line);
        }

        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;
        apply_binary(op, lhs, rhs, expr, line)
    }

    /// Evaluates `and` / `or`.
    ///
    /// The left operand must be a boolean. If it decides the result (`false`
    /// for `and`, `true` for `or`) the right operand is never evaluated;
    /// otherwise the right operand, which must also be a boolean, is the
    /// result.
    fn eval_logic(&mut self,
                  expr: &Expr,
                  left: &Expr,
                  op: BinaryOperator,
                  right: &Expr,
                  line: usize)
                  -> EvalResult<Value> {
        let Value::Bool(lhs) = self.eval(left)? else {
            return Err(incompatible(expr, line));
        };

        match (op, lhs) {
            (BinaryOperator::And, false) => return Ok(Value::Bool(false)),
            (BinaryOperator::Or, true) => return Ok(Value::Bool(true)),
            _ => {},
        }

        match self.eval(right)? {
            rhs @ Value::Bool(_) => Ok(rhs),
            _ => Err(incompatible(expr, line)),
        }
    }
}

/// Applies a non-logical binary operator to two evaluated operands.
///
/// Equality is defined for every pair of values and never fails. Arithmetic
/// and ordering need two numbers, `..` needs two strings and `:` needs a list
/// on the right.
///
/// # Example
/// ```
/// use pierogi::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{evaluator::binary::apply_binary, value::core::Value},
/// };
///
/// let expr = Expr::Identifier { symbol: "x".to_string(),
///                               line:   1, };
///
/// let eq = apply_binary(BinaryOperator::Equals, 2.0.into(), "2".into(), &expr, 1).unwrap();
/// assert_eq!(eq, Value::Bool(false));
///
/// assert!(apply_binary(BinaryOperator::Division, 1.0.into(), 0.0.into(), &expr, 1).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    lhs: Value,
                    rhs: Value,
                    expr: &Expr,
                    line: usize)
                    -> EvalResult<Value> {
    use BinaryOperator::{Concatenation, Cons, Division, Equals, NotEqual};

    match (op, lhs, rhs) {
        (Equals, l, r) => Ok(Value::Bool(l == r)),
        (NotEqual, l, r) => Ok(Value::Bool(l != r)),
        (Concatenation, Value::String(mut l), Value::String(r)) => {
            l.push_str(&r);
            Ok(Value::String(l))
        },
        (Cons, item, Value::List(list)) => Ok(Value::List(list.cons(item))),
        (Division, Value::Number(l), Value::Number(r)) => {
            let quotient = l / r;
            if quotient.is_finite() {
                Ok(Value::Number(quotient))
            } else {
                Err(RuntimeError::DivisionByZero { expr: expr.to_string(),
                                                   line })
            }
        },
        (op, Value::Number(l), Value::Number(r)) => {
            numeric(op, l, r).ok_or_else(|| incompatible(expr, line))
        },
        _ => Err(incompatible(expr, line)),
    }
}

/// Arithmetic and ordering on two numbers; `None` for operators that do not
/// take numbers.
fn numeric(op: BinaryOperator, l: f64, r: f64) -> Option<Value> {
    use BinaryOperator::{
        Addition, Exponent, GreaterEqual, GreaterThan, LessEqual, LessThan, Multiplication,
        Subtraction,
    };

    let value = match op {
        Addition => Value::Number(l + r),
        Subtraction => Value::Number(l - r),
        Multiplication => Value::Number(l * r),
        Exponent => Value::Number(l.powf(r)),
        LessThan => Value::Bool(l < r),
        GreaterThan => Value::Bool(l > r),
        LessEqual => Value::Bool(l <= r),
        GreaterEqual => Value::Bool(l >= r),
        _ => return None,
    };
    Some(value)
}

pub(crate) fn incompatible(expr: &Expr, line: usize) -> RuntimeError {
    RuntimeError::IncompatibleTypes { expr: expr.to_string(),
                                      line }
}
