/// Benchmark runner for the tree-walking evaluator.
///
/// Workloads lean on closure creation, captured-binding mutation and deep
/// scope chains.

extern crate ix;

use ix::parser::ast::ProgramData;
use ix::parser::IxParser;
use ix::runner::api::Interpreter;
use ix::runner::ds::value::{NumberType, Value};
use ix::runner::sink::BufferSink;
use std::time::{Duration, Instant};

/// Run a benchmark and return the execution time.
fn run_benchmark(name: &str, code: &str, iterations: u32) -> Duration {
    let ast = parse(name, code);

    let start = Instant::now();

    for _ in 0..iterations {
        let interpreter = Interpreter::new();
        let mut sink = BufferSink::new();
        let _ = interpreter.execute(&ast, &mut sink);
    }

    start.elapsed()
}

fn parse(name: &str, code: &str) -> ProgramData {
    IxParser::parse_to_ast_from_str(code)
        .unwrap_or_else(|e| panic!("Failed to parse benchmark {}: {}", name, e))
}

/// Get the program result of running code.
fn run_and_get_result(name: &str, code: &str) -> Option<Value> {
    let ast = parse(name, code);
    let mut sink = BufferSink::new();
    Interpreter::new().execute(&ast, &mut sink).unwrap_or(None)
}

const BENCH_COUNTER: &str = r#"
fn makeCounter() {
    let i = 0;
    fn count() {
        i = i + 1;
        print i;
    }
    return count;
}
let counter = makeCounter();
counter(); counter(); counter(); counter(); counter(); counter(); counter();
counter(); counter(); counter(); counter(); counter(); counter(); counter();
return "True";
"#;

const BENCH_ACCUMULATE: &str = r#"
fn makeAccumulator() {
    let total = 0;
    return fn (n) { total = total + n; return total; };
}
let acc = makeAccumulator();
fn feed(n) {
    if (n == 0) return acc(0);
    acc(n);
    return feed(n - 1);
}
return feed(200);
"#;

const BENCH_FIBONACCI: &str = r#"
fn fib(n) {
    if (n < 2) return n;
    return fib(n - 1) + fib(n - 2);
}
return fib(18);
"#;

const BENCH_DEEP_SCOPES: &str = r#"
let x = 1;
fn nest(depth) {
    if (depth == 0) return x;
    {
        {
            {
                return nest(depth - 1) + x;
            }
        }
    }
}
return nest(100);
"#;

const BENCH_MANY_CLOSURES: &str = r#"
fn adder(n) { return fn (x) { return x + n; }; }
fn build(n, sum) {
    if (n == 0) return sum;
    let add = adder(n);
    return build(n - 1, add(sum));
}
return build(300, 0);
"#;

fn main() {
    println!("=======================================================");
    println!("  ix - Closure and Environment Benchmarks");
    println!("=======================================================\n");

    let benchmarks: Vec<(&str, &str, u32)> = vec![
        ("Counter (14 calls)", BENCH_COUNTER, 2000),
        ("Accumulator (200 calls)", BENCH_ACCUMULATE, 200),
        ("Fibonacci (n=18)", BENCH_FIBONACCI, 20),
        ("Deep scopes (100 frames)", BENCH_DEEP_SCOPES, 500),
        ("Many closures (300)", BENCH_MANY_CLOSURES, 200),
    ];

    println!("{:<30} {:>14} {:>14}", "Benchmark", "Total", "Per run");
    println!("{}", "-".repeat(60));

    let mut total = Duration::ZERO;

    for (name, code, iterations) in &benchmarks {
        let dur = run_benchmark(name, code, *iterations);
        total += dur;
        println!(
            "{:<30} {:>12.2?} {:>12.2?}",
            name,
            dur,
            dur / *iterations
        );
    }

    println!("{}", "-".repeat(60));
    println!("{:<30} {:>12.2?}", "TOTAL", total);

    // Verify correctness
    println!("\n=======================================================");
    println!("  Correctness Verification");
    println!("=======================================================\n");

    let verifications: Vec<(&str, &str, Value)> = vec![
        ("Counter", BENCH_COUNTER, Value::from("True")),
        ("Accumulator", BENCH_ACCUMULATE, Value::from(20100)),
        ("Fibonacci", BENCH_FIBONACCI, Value::from(2584)),
        ("Deep scopes", BENCH_DEEP_SCOPES, Value::from(101)),
        ("Many closures", BENCH_MANY_CLOSURES, Value::from(45150)),
    ];

    println!("{:<20} {:>12} {:>4} {:>12}", "Test", "Expected", "", "Actual");
    println!("{}", "-".repeat(52));

    for (name, code, expected) in verifications {
        let actual = run_and_get_result(name, code).unwrap_or(Value::Nil);
        let status = if actual == expected { "✓" } else { "✗" };
        let shown = match &actual {
            Value::Number(NumberType::Integer(n)) => n.to_string(),
            other => other.to_string(),
        };
        println!(
            "{:<20} {:>12} {:>4} {:>12}",
            name,
            expected.to_string(),
            status,
            shown
        );
    }
}
