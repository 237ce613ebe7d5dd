use std::{
    f64::consts::PI,
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        environment::Frame,
        evaluator::core::{Context, EvalResult},
        value::{
            core::Value,
            function::{BuiltinFn, Function, NativeFunction},
            list::List,
        },
    },
};

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the exact arity,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table the builtins frame is built from),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func as BuiltinFn },
            )*
        ];
        /// Names of every builtin function, in registration order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"        => { arity: 1, func: print },
    "println"      => { arity: 1, func: println },
    "input"        => { arity: 0, func: input },
    "epoch"        => { arity: 0, func: epoch },
    "random"       => { arity: 0, func: random },
    "to_string"    => { arity: 1, func: to_string },
    "parse_number" => { arity: 1, func: parse_number },
    "exp"          => { arity: 1, func: exp },
    "sin"          => { arity: 1, func: sin },
    "cos"          => { arity: 1, func: cos },
    "first"        => { arity: 1, func: first },
    "rest"         => { arity: 1, func: rest },
    "length"       => { arity: 1, func: length },
    "iota"         => { arity: 1, func: iota },
    "map"          => { arity: 2, func: map },
    "filter"       => { arity: 2, func: filter },
}

/// Builds the frame every session starts with: one native function value per
/// entry of the builtin table, plus the constant `pi`.
#[must_use]
pub fn builtins_frame() -> Frame {
    let mut frame: Frame =
        BUILTIN_TABLE.iter()
                     .map(|native| {
                         (native.name.to_string(), Value::Function(Rc::new(Function::Native(*native))))
                     })
                     .collect();
    frame.insert("pi".to_string(), Value::Number(PI));
    frame
}

fn violation(name: &str, details: impl Into<String>, line: usize) -> RuntimeError {
    RuntimeError::BuiltinContractViolation { name: name.to_string(),
                                             details: details.into(),
                                             line }
}

fn expected(name: &str, what: &str, found: &Value, line: usize) -> RuntimeError {
    violation(name, format!("expected {what}, found {}", found.type_name()), line)
}

/// Writes a value to the I/O sink. Strings are written without quotes.
///
/// # Example
/// ```
/// use pierogi::interpreter::{
///     evaluator::{builtin::print, core::Context},
///     io::BufferIo,
///     value::core::Value,
/// };
///
/// let io = BufferIo::new();
/// let mut ctx = Context::with_io(io.clone());
///
/// let result = print(&mut ctx, &[Value::from("hi")], 1).unwrap();
///
/// assert_eq!(result, Value::Nil);
/// assert_eq!(io.output(), "hi");
/// ```
pub fn print(ctx: &mut Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    for value in args {
        ctx.io().print(&value.to_plain_string());
    }
    Ok(Value::Nil)
}

/// Like [`print`], followed by a newline.
pub fn println(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    print(ctx, args, line)?;
    ctx.io().print("\n");
    Ok(Value::Nil)
}

/// Reads one line from the I/O sink.
pub fn input(ctx: &mut Context, _args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::String(ctx.io().request_input()))
}

/// Seconds since the Unix epoch, with millisecond precision.
pub fn epoch(_ctx: &mut Context, _args: &[Value], line: usize) -> EvalResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_err(|e| violation("epoch", e.to_string(), line))?;
    #[allow(clippy::cast_precision_loss)]
    let millis = elapsed.as_millis() as f64;
    Ok(Value::Number(millis / 1000.0))
}

/// A uniformly distributed number in `[0, 1)` from the session's generator.
pub fn random(ctx: &mut Context, _args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Number(ctx.rng().r#gen::<f64>()))
}

/// The print representation of a value as a string; strings are returned
/// unchanged.
pub fn to_string(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args {
        [value] => Ok(Value::String(value.to_plain_string())),
        _ => Err(violation("to_string", "expected one argument", line)),
    }
}

/// Parses a string as a number, or returns `nil` if it is not one.
///
/// # Example
/// ```
/// use pierogi::interpreter::{
///     evaluator::{builtin::parse_number, core::Context},
///     io::BufferIo,
///     value::core::Value,
/// };
///
/// let mut ctx = Context::with_io(BufferIo::new());
///
/// assert_eq!(parse_number(&mut ctx, &[" 2.5 ".into()], 1), Ok(Value::Number(2.5)));
/// assert_eq!(parse_number(&mut ctx, &["pierogi".into()], 1), Ok(Value::Nil));
/// ```
pub fn parse_number(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args {
        [Value::String(s)] => Ok(s.trim().parse().map_or(Value::Nil, Value::Number)),
        [other] => Err(expected("parse_number", "a string", other, line)),
        _ => Err(violation("parse_number", "expected one argument", line)),
    }
}

/// Applies a floating-point function to a single number argument.
macro_rules! real_builtin {
    ($fname:ident, $real_fn:ident) => {
        #[doc = concat!("`", stringify!($real_fn), "` of a number.")]
        pub fn $fname(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
            match args {
                [Value::Number(n)] => Ok(Value::Number(n.$real_fn())),
                [other] => Err(expected(stringify!($fname), "a number", other, line)),
                _ => Err(violation(stringify!($fname), "expected one argument", line)),
            }
        }
    };
}

real_builtin!(exp, exp);
real_builtin!(sin, sin);
real_builtin!(cos, cos);

fn non_empty_list<'a>(name: &str, args: &'a [Value], line: usize) -> EvalResult<&'a List> {
    match args {
        [Value::List(list)] if !list.is_empty() => Ok(list),
        [Value::List(_)] => Err(violation(name, "the list is empty", line)),
        [other] => Err(expected(name, "a list", other, line)),
        _ => Err(violation(name, "expected one argument", line)),
    }
}

/// The first item of a non-empty list.
pub fn first(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let list = non_empty_list("first", args, line)?;
    list.first()
        .cloned()
        .ok_or_else(|| violation("first", "the list is empty", line))
}

/// A non-empty list without its first item.
pub fn rest(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let list = non_empty_list("rest", args, line)?;
    list.rest()
        .map(Value::List)
        .ok_or_else(|| violation("rest", "the list is empty", line))
}

/// The number of items in a list.
pub fn length(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args {
        #[allow(clippy::cast_precision_loss)]
        [Value::List(list)] => Ok(Value::Number(list.len() as f64)),
        [other] => Err(expected("length", "a list", other, line)),
        _ => Err(violation("length", "expected one argument", line)),
    }
}

/// The list `[0, 1, ..., n - 1]`, where `n` is the argument truncated to an
/// integer. Empty for `n <= 0`.
///
/// # Example
/// ```
/// use pierogi::interpreter::{
///     evaluator::{builtin::iota, core::Context},
///     io::BufferIo,
/// };
///
/// let mut ctx = Context::with_io(BufferIo::new());
///
/// assert_eq!(iota(&mut ctx, &[3.0.into()], 1).unwrap().to_string(), "[0, 1, 2]");
/// ```
pub fn iota(_ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    match args {
        [Value::Number(n)] => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let upper = if n.is_finite() && *n > 0.0 { n.trunc() as u64 } else { 0 };
            #[allow(clippy::cast_precision_loss)]
            let items: List = (0..upper).map(|i| Value::Number(i as f64)).collect();
            Ok(Value::List(items))
        },
        [other] => Err(expected("iota", "a number", other, line)),
        _ => Err(violation("iota", "expected one argument", line)),
    }
}

/// Splits `(function, list)` arguments, requiring a one-parameter function.
fn function_and_list<'a>(name: &str,
                         args: &'a [Value],
                         line: usize)
                         -> EvalResult<(&'a Rc<Function>, &'a List)> {
    match args {
        [Value::Function(function), Value::List(list)] => {
            if function.arity() == 1 {
                Ok((function, list))
            } else {
                Err(violation(name,
                              format!("expected a function of one argument, found {function}"),
                              line))
            }
        },
        [Value::Function(_), other] => Err(expected(name, "a list", other, line)),
        [other, _] => Err(expected(name, "a function", other, line)),
        _ => Err(violation(name, "expected two arguments", line)),
    }
}

/// Applies a one-parameter function to every item of a list.
pub fn map(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let (function, list) = function_and_list("map", args, line)?;

    let mut mapped = Vec::with_capacity(list.len());
    for item in list {
        mapped.push(ctx.call_function(function, vec![item.clone()], line)?);
    }
    Ok(Value::from(mapped))
}

/// Keeps the items of a list for which a one-parameter predicate returns
/// `true`. The predicate must return a boolean.
pub fn filter(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let (predicate, list) = function_and_list("filter", args, line)?;

    let mut kept = Vec::new();
    for item in list {
        match ctx.call_function(predicate, vec![item.clone()], line)? {
            Value::Bool(true) => kept.push(item.clone()),
            Value::Bool(false) => {},
            other => return Err(expected("filter", "a boolean from the predicate", &other, line)),
        }
    }
    Ok(Value::from(kept))
}
