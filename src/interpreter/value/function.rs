use std::{fmt, rc::Rc};

use crate::{
    ast::Expr,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Type alias for native function handlers.
///
/// A native receives the running context (for I/O, the RNG and calling back
/// into user functions), the evaluated arguments and the line of the call.
pub type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// A callable value.
#[derive(Debug)]
pub enum Function {
    /// A function implemented by the host.
    Native(NativeFunction),
    /// A function literal evaluated in the language.
    UserDefined(UserFunction),
}

/// A function implemented in Rust with a fixed arity.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    pub name:  &'static str,
    pub arity: usize,
    pub func:  BuiltinFn,
}

/// A closure: parameters and body of a function literal together with the
/// environment that was in force when the literal was evaluated.
///
/// The closure is a snapshot, so bindings made in enclosing scopes after the
/// function was created are never visible to it.
pub struct UserFunction {
    /// Parameter names, in order.
    pub parameters: Rc<[String]>,
    /// Body expressions; the last one yields the result of a call.
    pub body:       Rc<[Expr]>,
    /// Snapshot of the defining environment.
    pub closure:    Environment,
    /// The symbol the function was defined under, bound to the function
    /// itself inside every call so it can recurse.
    pub name:       Option<String>,
}

impl Function {
    /// Number of arguments the function must be called with.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Native(native) => native.arity,
            Self::UserDefined(user) => user.parameters.len(),
        }
    }
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
         .field("parameters", &self.parameters)
         .field("name", &self.name)
         .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(f, "<builtin {}/{}>", native.name, native.arity),
            Self::UserDefined(user) => write!(f, "<function/{}>", user.parameters.len()),
        }
    }
}
