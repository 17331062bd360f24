//! Benchmark sweep over graph sizes and thread counts.
//!
//! For each size a random graph with a guaranteed Hamiltonian ring is
//! generated, then the sequential runner and the parallel runner (one row
//! per thread count) are timed, averaging the solver-reported wall time
//! over repeated runs with skewed seeds. Results are written as CSV:
//! `vertices,variant,threads,average_ms`.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::process;

use aco_tsp::aco::{AcoConfig, AcoSolver};
use aco_tsp::graph::{generate, Graph};

struct Options {
    sizes: Vec<usize>,
    runs: usize,
    output: String,
    config: AcoConfig,
    max_out_degree: usize,
}

struct Measurement {
    vertices: usize,
    variant: &'static str,
    threads: usize,
    average_ms: f64,
}

fn parse_value<T: std::str::FromStr>(args: &[String], index: usize, flag: &str) -> Result<T, String> {
    args.get(index)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| format!("{flag} requires a value"))
}

impl Options {
    fn from_args() -> Result<Self, String> {
        let mut options = Options {
            sizes: vec![50, 100, 200, 400],
            runs: 5,
            output: "benchmark_results.csv".to_string(),
            config: AcoConfig::default().with_ants(64).with_iterations(50),
            max_out_degree: 15,
        };
        let args: Vec<String> = std::env::args().collect();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--sizes" => {
                    i += 1;
                    let raw: String = parse_value(&args, i, "--sizes")?;
                    let sizes: Vec<usize> = raw
                        .split(',')
                        .filter(|token| !token.is_empty())
                        .map(|token| {
                            token
                                .parse()
                                .map_err(|_| format!("invalid size in --sizes: {token}"))
                        })
                        .collect::<Result<_, _>>()?;
                    if !sizes.is_empty() {
                        options.sizes = sizes;
                    }
                }
                "--runs" => {
                    i += 1;
                    options.runs = parse_value::<usize>(&args, i, "--runs")?.max(1);
                }
                "--output" | "-o" => {
                    i += 1;
                    options.output = parse_value(&args, i, "--output")?;
                }
                "--ants" => {
                    i += 1;
                    options.config.ants = parse_value(&args, i, "--ants")?;
                }
                "--iterations" => {
                    i += 1;
                    options.config.iterations = parse_value(&args, i, "--iterations")?;
                }
                "--alpha" => {
                    i += 1;
                    options.config.alpha = parse_value(&args, i, "--alpha")?;
                }
                "--beta" => {
                    i += 1;
                    options.config.beta = parse_value(&args, i, "--beta")?;
                }
                "--evaporation" => {
                    i += 1;
                    options.config.evaporation = parse_value(&args, i, "--evaporation")?;
                }
                "--q" => {
                    i += 1;
                    options.config.q = parse_value(&args, i, "--q")?;
                }
                "--seed" => {
                    i += 1;
                    options.config.seed = parse_value(&args, i, "--seed")?;
                }
                "--max-out-degree" => {
                    i += 1;
                    options.max_out_degree = parse_value::<usize>(&args, i, "--max-out-degree")?.max(1);
                }
                "--help" | "-h" => {
                    print_usage();
                    process::exit(0);
                }
                other => return Err(format!("unknown option: {other}. Use --help.")),
            }
            i += 1;
        }
        options.config.validate()?;
        Ok(options)
    }
}

fn print_usage() {
    eprintln!("Usage: aco-bench [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("      --sizes <N,N,...>     Graph sizes to sweep      [default: 50,100,200,400]");
    eprintln!("      --runs <N>            Runs to average per cell  [default: 5]");
    eprintln!("  -o, --output <file>       CSV output path           [default: benchmark_results.csv]");
    eprintln!("      --ants <N>            Ants per iteration        [default: 64]");
    eprintln!("      --iterations <N>      Iterations per run        [default: 50]");
    eprintln!("      --alpha <F>           Pheromone exponent        [default: 1.0]");
    eprintln!("      --beta <F>            Heuristic exponent        [default: 3.0]");
    eprintln!("      --evaporation <F>     Evaporation rate          [default: 0.5]");
    eprintln!("      --q <F>               Deposit factor            [default: 100.0]");
    eprintln!("      --seed <N>            Base random seed          [default: 42]");
    eprintln!("      --max-out-degree <N>  Max random out-degree     [default: 15]");
    eprintln!("  -h, --help                Show this help");
}

fn thread_counts() -> Vec<usize> {
    let hardware = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let mut counts = vec![1, 2, 4, hardware];
    counts.sort_unstable();
    counts.dedup();
    counts
}

fn average_sequential(solver: &AcoSolver, base: &AcoConfig, runs: usize) -> f64 {
    let mut total = 0.0;
    for run in 0..runs {
        let config = base.clone().with_seed(base.seed + run as u64);
        total += solver.run_sequential(&config).elapsed_ms;
    }
    total / runs as f64
}

fn average_parallel(solver: &AcoSolver, base: &AcoConfig, runs: usize, threads: usize) -> f64 {
    let mut total = 0.0;
    for run in 0..runs {
        let config = base.clone().with_seed(base.seed + run as u64);
        total += solver.run_parallel(&config, threads).elapsed_ms;
    }
    total / runs as f64
}

fn run() -> Result<(), String> {
    let options = Options::from_args()?;
    let thread_counts = thread_counts();

    println!(
        "thread counts: {}",
        thread_counts
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut results = Vec::with_capacity(options.sizes.len() * (thread_counts.len() + 1));
    for (index, &vertices) in options.sizes.iter().enumerate() {
        let graph_seed = options.config.seed + index as u64 * 9973;
        println!("preparing graph with {vertices} vertices...");
        let dot = generate::random_dot(vertices, graph_seed, options.max_out_degree)
            .map_err(|err| err.to_string())?;
        let graph = Graph::from_dot(&dot).map_err(|err| err.to_string())?;
        let solver = AcoSolver::new(&graph);

        let sequential_avg = average_sequential(&solver, &options.config, options.runs);
        println!("  sequential: {sequential_avg:.4} ms");
        results.push(Measurement {
            vertices,
            variant: "sequential",
            threads: 1,
            average_ms: sequential_avg,
        });

        for &threads in &thread_counts {
            let parallel_avg = average_parallel(&solver, &options.config, options.runs, threads);
            println!("  parallel ({threads} threads): {parallel_avg:.4} ms");
            results.push(Measurement {
                vertices,
                variant: "parallel",
                threads,
                average_ms: parallel_avg,
            });
        }
    }

    let file = File::create(&options.output)
        .map_err(|err| format!("unable to create {}: {err}", options.output))?;
    let mut csv = BufWriter::new(file);
    writeln!(csv, "vertices,variant,threads,average_ms").map_err(|err| err.to_string())?;
    for measurement in &results {
        writeln!(
            csv,
            "{},{},{},{:.6}",
            measurement.vertices, measurement.variant, measurement.threads, measurement.average_ms
        )
        .map_err(|err| err.to_string())?;
    }
    println!("results written to {}", options.output);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(message) = run() {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
