use std::fs::{self};

use pierogi::{
    error::{ErrorKind, Severity},
    interpreter::{
        evaluator::{
            builtin::BUILTIN_FUNCTIONS,
            core::{Config, Context},
        },
        io::BufferIo,
        value::{core::Value, list::List},
    },
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = session().interpret(&code) {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

#[test]
fn example_script_works() {
    let script =
        fs::read_to_string("tests/example.pierogi").expect("Failed to read example script");
    let io = BufferIo::new();

    let values = Context::with_io(io.clone()).interpret(&script)
                                             .unwrap_or_else(|e| panic!("Script failed: {e}"));

    assert_eq!(values.last(), Some(&Value::Bool(true)));
    assert_eq!(io.output(), "fizz buzz fizzbuzz\n[1, 4, 9, 16, 25]\n");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```pierogi") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn session() -> Context {
    Context::with_io(BufferIo::new())
}

/// Runs `src` in a fresh session and renders the value of its last
/// top-level expression.
fn eval_last(src: &str) -> String {
    let values = session().interpret(src)
                          .unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"));
    values.last()
          .map(ToString::to_string)
          .unwrap_or_else(|| panic!("Script produced no value:\n{src}"))
}

fn assert_evaluates(src: &str, expected: &str) {
    assert_eq!(eval_last(src), expected, "{src}");
}

fn assert_success(src: &str) {
    if let Err(e) = session().interpret(src) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match session().interpret(src) {
        Ok(values) => panic!("Script succeeded with {values:?} but was expected to fail:\n{src}"),
        Err(e) => assert_eq!(e.kind(), kind, "{src}"),
    }
}

#[test]
fn definition_and_basic_arithmetic() {
    assert_evaluates("x = 1 + 2 x", "3");
    assert_evaluates("x = 7 * 9 x", "63");
    assert_evaluates("x = 8 - 5 x", "3");
    assert_evaluates("x = 10 / 4 x", "2.5");
    assert_evaluates("2 ^ 10", "1024");
    assert_evaluates("-(3 - 5)", "2");
}

#[test]
fn definitions_evaluate_to_the_bound_value() {
    assert_evaluates("x = 5", "5");
    assert_evaluates("a = b = 3 a + b", "6");
}

#[test]
fn every_top_level_value_is_returned() {
    let values = session().interpret("x = 2 x * 3 \"done\"").unwrap();

    assert_eq!(values,
               vec![Value::Number(2.0), Value::Number(6.0), Value::from("done")]);
}

#[test]
fn operator_precedence() {
    assert_evaluates("1 + 2 * 3", "7");
    assert_evaluates("(1 + 2) * 3", "9");
    assert_evaluates("2 * 3 ^ 2", "18");
    assert_evaluates("2 ^ 3 ^ 2", "64");
    assert_evaluates("1 + 1 == 2 and 3 > 2", "true");
}

#[test]
fn comparisons() {
    assert_evaluates("1 < 2", "true");
    assert_evaluates("2 <= 2", "true");
    assert_evaluates("1 > 2", "false");
    assert_evaluates("3 >= 4", "false");
    assert_failure("\"a\" < \"b\"", ErrorKind::IncompatibleTypes);
}

#[test]
fn equality_requires_the_same_variant() {
    assert_evaluates("2 == \"2\"", "false");
    assert_evaluates("nil == false", "false");
    assert_evaluates("nil == nil", "true");
    assert_evaluates("\"a\" /= \"b\"", "true");
    assert_evaluates("[1, [2, \"x\"]] == [1, [2, \"x\"]]", "true");
    assert_evaluates("[1, 2] == [1, 2, 3]", "false");
}

#[test]
fn functions_are_equal_only_to_themselves() {
    assert_evaluates("f = \\x { x } f == f", "true");
    assert_evaluates("(\\x { x }) == (\\x { x })", "false");
    assert_evaluates("first == first", "true");
}

#[test]
fn logic_short_circuits() {
    assert_evaluates("false and (1 / 0)", "false");
    assert_evaluates("true or (1 / 0)", "true");
    assert_evaluates("true and false", "false");
    assert_evaluates("false or true", "true");
    assert_evaluates("not false", "true");
    assert_failure("true and (1 / 0)", ErrorKind::DivisionByZero);
}

#[test]
fn logic_requires_booleans() {
    assert_failure("1 and true", ErrorKind::IncompatibleTypes);
    assert_failure("true and 1", ErrorKind::IncompatibleTypes);
    assert_failure("nil or false", ErrorKind::IncompatibleTypes);
    assert_failure("not 0", ErrorKind::IncompatibleTypes);
    assert_failure("-\"a\"", ErrorKind::IncompatibleTypes);
}

#[test]
fn strings_concatenate() {
    assert_evaluates("\"pie\" .. \"rogi\"", "\"pierogi\"");
    assert_evaluates("\"say \\\"hi\\\"\"", r#""say \"hi\"""#);
    assert_failure("\"a\" .. 1", ErrorKind::IncompatibleTypes);
    assert_failure("\"a\" + \"b\"", ErrorKind::IncompatibleTypes);
}

#[test]
fn cons_builds_lists() {
    assert_evaluates("1 : [2, 3] == [1, 2, 3]", "true");
    assert_evaluates("1 : 2 : []", "[1, 2]");
    assert_evaluates("rest(1 : [2, 3])", "[2, 3]");
    assert_evaluates("first(rest([1, 2, 3]))", "2");
    assert_failure("1 : 2", ErrorKind::IncompatibleTypes);
}

#[test]
fn lists_are_immutable_values() {
    assert_evaluates("xs = [2, 3] ys = 1 : xs xs", "[2, 3]");
    assert_evaluates("xs = [2, 3] ys = 1 : xs length(ys)", "3");
}

#[test]
fn division_by_zero() {
    assert_failure("1 / 0", ErrorKind::DivisionByZero);
    assert_failure("0 / 0", ErrorKind::DivisionByZero);
    assert_evaluates("0 / 5", "0");
}

#[test]
fn undefined_symbol() {
    assert_failure("y + 1", ErrorKind::UndefinedSymbol);
    assert_failure("f(1)", ErrorKind::UndefinedSymbol);
}

#[test]
fn if_expressions() {
    assert_evaluates("if 1 < 2 { \"yes\" } else { \"no\" }", "\"yes\"");
    assert_evaluates("if false { 1 } else { 2 3 }", "3");
    assert_failure("if 1 { 2 } else { 3 }", ErrorKind::IncompatibleTypes);
    assert_failure("if nil { 2 } else { 3 }", ErrorKind::IncompatibleTypes);
}

#[test]
fn if_branches_have_their_own_scope() {
    assert_failure("if true { inner = 1 } else { 0 } inner", ErrorKind::UndefinedSymbol);
    assert_evaluates("x = 1 if true { x = 2 } else { 0 } x", "1");
    assert_evaluates("x = 1 if true { x + 1 } else { 0 }", "2");
}

#[test]
fn function_calls() {
    assert_evaluates("add = \\a, b { a + b } add(2, 3)", "5");
    assert_evaluates("answer = \\ { 42 } answer()", "42");
    assert_evaluates("(\\x { x * x })(7)", "49");
    assert_evaluates("twice = \\f, x { f(f(x)) } twice(\\n { n + 3 }, 1)", "7");
    assert_evaluates("f = \\x { y = x * 2 y + 1 } f(4)", "9");
}

#[test]
fn calls_do_not_leak_bindings() {
    assert_failure("f = \\x { local = x } f(1) local", ErrorKind::UndefinedSymbol);
    assert_failure("f = \\x { x } f(1) x", ErrorKind::UndefinedSymbol);
}

#[test]
fn functions_print_their_arity() {
    assert_evaluates("\\x, y { x }", "<function/2>");
    assert_evaluates("sin", "<builtin sin/1>");
}

#[test]
fn closures_capture_a_snapshot() {
    assert_evaluates("n = 1
                      make_adder = \\n { \\x { x + n } }
                      add5 = make_adder(5)
                      n = 100
                      add5(7)",
                     "12");
    assert_evaluates("k = 1 get = \\ { k } k = 2 get()", "1");
}

#[test]
fn closures_do_not_see_later_definitions() {
    assert_failure("f = \\ { later } later = 1 f()", ErrorKind::UndefinedSymbol);
}

#[test]
fn recursion() {
    assert_evaluates("fact = \\n { if n <= 1 { 1 } else { n * fact(n - 1) } } fact(10)",
                     "3628800");
    assert_evaluates("fib = \\n { if n < 2 { n } else { fib(n - 1) + fib(n - 2) } } fib(15)",
                     "610");
    assert_evaluates("sum = \\xs { if xs == [] { 0 } else { first(xs) + sum(rest(xs)) } }
                      sum(iota(101))",
                     "5050");
}

#[test]
fn deep_recursion_below_the_limit() {
    assert_evaluates("count = \\n { if n == 0 { 0 } else { 1 + count(n - 1) } } count(2000)",
                     "2000");
}

#[test]
fn unbounded_recursion_overflows() {
    assert_failure("loop = \\n { loop(n + 1) } loop(0)", ErrorKind::StackOverflow);
}

#[test]
fn call_depth_is_configurable() {
    let config = Config { max_call_depth: 10,
                          ..Config::default() };
    let mut ctx = Context::with_config(config, BufferIo::new());

    ctx.interpret("count = \\n { if n == 0 { 0 } else { 1 + count(n - 1) } }")
       .unwrap();

    assert_eq!(ctx.interpret("count(9)").unwrap(), vec![Value::Number(9.0)]);
    assert_eq!(ctx.interpret("count(10)").unwrap_err().kind(),
               ErrorKind::StackOverflow);
    assert_eq!(ctx.interpret("count(3)").unwrap(), vec![Value::Number(3.0)]);
}

#[test]
fn wrong_number_of_arguments() {
    assert_failure("f = \\x { x } f(1, 2)", ErrorKind::IncorrectNumberOfArguments);
    assert_failure("f = \\x, y { x } f(1)", ErrorKind::IncorrectNumberOfArguments);
    assert_failure("sin()", ErrorKind::IncorrectNumberOfArguments);
    assert_failure("f = \\x { x } f(1 / 0, 2)", ErrorKind::IncorrectNumberOfArguments);
}

#[test]
fn only_functions_are_callable() {
    assert_failure("5(1)", ErrorKind::UncallableValue);
    assert_failure("\"f\"()", ErrorKind::UncallableValue);
    assert_failure("x = nil x()", ErrorKind::UncallableValue);
}

#[test]
fn builtins_can_be_shadowed() {
    assert_evaluates("first = 1 first", "1");
    assert_evaluates("print = \\x { x * 2 } print(4)", "8");
}

#[test]
fn pi_is_predefined() {
    assert_evaluates("pi > 3.14 and pi < 3.15", "true");
}

#[test]
fn list_builtins() {
    assert_evaluates("first([1, 2, 3])", "1");
    assert_evaluates("rest([1])", "[]");
    assert_evaluates("length([])", "0");
    assert_evaluates("length([1, [2, 3], \"x\"])", "3");
    assert_evaluates("iota(4)", "[0, 1, 2, 3]");
    assert_evaluates("iota(2.9)", "[0, 1]");
    assert_evaluates("iota(-3)", "[]");
    assert_failure("first([])", ErrorKind::BuiltinContractViolation);
    assert_failure("rest([])", ErrorKind::BuiltinContractViolation);
    assert_failure("length(\"abc\")", ErrorKind::BuiltinContractViolation);
    assert_failure("iota(\"3\")", ErrorKind::BuiltinContractViolation);
}

#[test]
fn map_and_filter() {
    assert_evaluates("map(\\x { x * 2 }, iota(4))", "[0, 2, 4, 6]");
    assert_evaluates("filter(\\x { x > 1 }, [1, 2, 3])", "[2, 3]");
    assert_evaluates("map(to_string, [1, true])", "[\"1\", \"true\"]");
    assert_evaluates("map(\\x { x }, [])", "[]");
    assert_failure("map(\\x, y { x }, [1])", ErrorKind::BuiltinContractViolation);
    assert_failure("map([1], \\x { x })", ErrorKind::BuiltinContractViolation);
    assert_failure("filter(\\x { x }, [1])", ErrorKind::BuiltinContractViolation);
    assert_failure("map(\\x { x / 0 }, [1])", ErrorKind::DivisionByZero);
}

#[test]
fn conversion_builtins() {
    assert_evaluates("to_string(1.5)", "\"1.5\"");
    assert_evaluates("to_string([1, \"a\"])", r#""[1, \"a\"]""#);
    assert_evaluates("to_string(\"plain\")", "\"plain\"");
    assert_evaluates("parse_number(\" 42 \") + 1", "43");
    assert_evaluates("parse_number(\"abc\")", "nil");
    assert_failure("parse_number(42)", ErrorKind::BuiltinContractViolation);
}

#[test]
fn math_builtins() {
    assert_evaluates("exp(0)", "1");
    assert_evaluates("sin(0)", "0");
    assert_evaluates("cos(0)", "1");
    assert_failure("sin(\"x\")", ErrorKind::BuiltinContractViolation);
}

#[test]
fn epoch_is_in_seconds() {
    assert_evaluates("now = epoch() now > 1600000000 and now < 100000000000", "true");
}

#[test]
fn random_is_in_the_unit_interval() {
    assert_evaluates("r = random() r >= 0 and r < 1", "true");
}

#[test]
fn seeded_sessions_repeat_their_random_numbers() {
    let seeded = || {
        let config = Config { seed: Some(7),
                              ..Config::default() };
        Context::with_config(config, BufferIo::new())
    };

    let first = seeded().interpret("[random(), random()]").unwrap();
    let second = seeded().interpret("[random(), random()]").unwrap();

    assert_eq!(first, second);
}

#[test]
fn print_writes_to_the_sink() {
    let io = BufferIo::new();
    let mut ctx = Context::with_io(io.clone());

    let values = ctx.interpret("print(\"a\") println(1) print([1, \"b\"])").unwrap();

    assert_eq!(io.output(), "a1\n[1, \"b\"]");
    assert_eq!(values, vec![Value::Nil, Value::Nil, Value::Nil]);
}

#[test]
fn input_reads_from_the_sink() {
    let io = BufferIo::with_input(["41", "pierogi"]);
    let mut ctx = Context::with_io(io.clone());

    let values = ctx.interpret("parse_number(input()) + 1 input() input()").unwrap();

    assert_eq!(values,
               vec![Value::Number(42.0), Value::from("pierogi"), Value::from("")]);
}

#[test]
fn definitions_persist_across_units() {
    let mut ctx = session();

    ctx.interpret("square = \\x { x * x }").unwrap();
    ctx.interpret("nine = square(3)").unwrap();

    assert_eq!(ctx.interpret("nine + square(4)").unwrap(),
               vec![Value::Number(25.0)]);
}

#[test]
fn failed_expression_is_rolled_back() {
    let mut ctx = session();
    ctx.interpret("x = 1").unwrap();

    assert!(ctx.interpret("w = (v = 3) / 0").is_err());

    assert!(!ctx.env.has("v"));
    assert!(!ctx.env.has("w"));
    assert_eq!(ctx.env.lookup("x"), Some(&Value::Number(1.0)));
}

#[test]
fn earlier_expressions_of_a_failed_unit_stay() {
    let mut ctx = session();

    let error = ctx.interpret("a = 1 b = a + 1 c = b / 0 d = 4").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DivisionByZero);
    assert_eq!(ctx.env.lookup("b"), Some(&Value::Number(2.0)));
    assert!(!ctx.env.has("c"));
    assert!(!ctx.env.has("d"));
}

#[test]
fn static_errors_evaluate_nothing() {
    let io = BufferIo::new();
    let mut ctx = Context::with_io(io.clone());

    let error = ctx.interpret("println(\"never\") x = (1").unwrap_err();

    assert_eq!(error.severity(), Severity::Static);
    assert_eq!(io.output(), "");
}

#[test]
fn runtime_errors_report_line_and_expression() {
    let error = session().interpret("x = 1\n\nx / 0").unwrap_err();
    let report = error.report();

    assert_eq!(report.kind, ErrorKind::DivisionByZero);
    assert_eq!(report.severity, Severity::Runtime);
    assert_eq!(report.near, "x / 0");
    assert_eq!(report.line, 3);
    assert_eq!(report.to_string(),
               "Error on line 3: division by zero (runtime error) near \"x / 0\".");
}

#[test]
fn run_reports_errors_to_the_sink() {
    let io = BufferIo::new();
    let mut ctx = Context::with_io(io.clone());

    assert_eq!(ctx.run("\"abc"), None);
    assert_eq!(ctx.run("undefined"), None);
    assert_eq!(ctx.run("1 + 1"), Some(vec![Value::Number(2.0)]));

    let reports = io.reports();
    assert_eq!(reports.len(), 2);

    assert_eq!(reports[0].kind, ErrorKind::UnterminatedString);
    assert_eq!(reports[0].severity, Severity::Static);
    assert_eq!(reports[0].near, "\"abc");

    assert_eq!(reports[1].kind, ErrorKind::UndefinedSymbol);
    assert_eq!(reports[1].near, "undefined");
    assert_eq!(reports[1].to_string(),
               "Error on line 1: undefined symbol (runtime error) near \"undefined\".");
}

#[test]
fn sessions_are_independent() {
    let mut first = session();
    let mut second = session();

    first.interpret("x = 1").unwrap();

    assert_eq!(second.interpret("x").unwrap_err().kind(), ErrorKind::UndefinedSymbol);
}

#[test]
fn comments_and_empty_input() {
    assert!(session().interpret("").unwrap().is_empty());
    assert_success("# just a comment\n");
    assert_evaluates("x = 2 # the base\nx ^ 3 # cubed", "8");
}

#[test]
fn every_builtin_is_bound_in_a_fresh_session() {
    let ctx = session();

    for name in BUILTIN_FUNCTIONS {
        let value = ctx.env
                       .lookup(name)
                       .unwrap_or_else(|| panic!("{name} is not bound"));
        assert!(value.as_function().is_some(), "{name} is not a function");
    }
    assert_eq!(ctx.env.lookup("pi").and_then(Value::as_number),
               Some(std::f64::consts::PI));
}

#[test]
fn value_accessors() {
    let values = session().interpret("2 true \"s\" [1, 2] \\x { x }").unwrap();

    assert_eq!(values[0].as_number(), Some(2.0));
    assert_eq!(values[1].as_bool(), Some(true));
    assert_eq!(values[2].as_str(), Some("s"));
    assert_eq!(values[3].as_list().map(List::len), Some(2));
    assert_eq!(values[4].as_function().map(|f| f.arity()), Some(1));

    assert_eq!(values[0].as_str(), None);
    assert_eq!(values[2].as_number(), None);
    assert!(values[1].as_list().is_none());
}

#[test]
fn scopes_are_popped_after_calls_and_errors() {
    let mut ctx = session();

    ctx.interpret("f = \\x { y = x * 2 if y > 4 { y } else { g(y) } }")
       .unwrap();
    assert_eq!(ctx.env.depth(), 1);

    assert_eq!(ctx.interpret("f(3)").unwrap(), vec![Value::Number(6.0)]);
    assert_eq!(ctx.env.depth(), 1);

    assert_eq!(ctx.interpret("f(1)").unwrap_err().kind(), ErrorKind::UndefinedSymbol);
    assert_eq!(ctx.env.depth(), 1);
    assert!(!ctx.env.has("y"));
}

#[test]
fn output_can_be_drained_between_units() {
    let io = BufferIo::new();
    let mut ctx = Context::with_io(io.clone());

    ctx.interpret("print(\"a\")").unwrap();
    assert_eq!(io.take_output(), "a");

    ctx.interpret("println(1)").unwrap();
    assert_eq!(io.take_output(), "1\n");
    assert_eq!(io.output(), "");
}

#[test]
fn long_operator_chains_evaluate() {
    assert_evaluates(&format!("{}1", "-".repeat(50_000)), "1");
    assert_evaluates(&format!("{}true", "not ".repeat(50_001)), "false");
    assert_evaluates(&format!("{}7 a", "a = ".repeat(50_000)), "7");

    let values = session().interpret(&format!("{}[]", "1:".repeat(50_000)))
                          .unwrap_or_else(|e| panic!("Script failed: {e}"));
    assert_eq!(values[0].as_list().map(List::len), Some(50_000));
}

#[test]
fn deeply_nested_groups_evaluate() {
    let depth = 100_000;
    let src = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let values = session().interpret(&src)
                          .unwrap_or_else(|e| panic!("Script failed: {e}"));

    assert_eq!(values, vec![Value::Number(1.0)]);
}
