//! Solves a DOT graph with the sequential and/or parallel runner and
//! prints the best tours found.

use std::process;

use aco_tsp::aco::{AcoConfig, AcoSolver, TourResult};
use aco_tsp::graph::Graph;

struct Options {
    graph_path: String,
    config: AcoConfig,
    threads: usize,
    only_sequential: bool,
    only_parallel: bool,
    print_paths: bool,
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn parse_value<T: std::str::FromStr>(args: &[String], index: usize, flag: &str) -> Result<T, String> {
    args.get(index)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| format!("{flag} requires a value"))
}

impl Options {
    fn from_args() -> Result<Self, String> {
        let mut options = Options {
            graph_path: String::new(),
            config: AcoConfig::default().with_ants(128).with_iterations(150),
            threads: default_threads(),
            only_sequential: false,
            only_parallel: false,
            print_paths: true,
        };
        let args: Vec<String> = std::env::args().collect();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--graph" | "-g" => {
                    i += 1;
                    options.graph_path = parse_value(&args, i, "--graph")?;
                }
                "--ants" => {
                    i += 1;
                    options.config.ants = parse_value(&args, i, "--ants")?;
                }
                "--iterations" => {
                    i += 1;
                    options.config.iterations = parse_value(&args, i, "--iterations")?;
                }
                "--threads" | "-t" => {
                    i += 1;
                    options.threads = parse_value::<usize>(&args, i, "--threads")?.max(1);
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
                "--only-seq" => options.only_sequential = true,
                "--only-par" => options.only_parallel = true,
                "--no-paths" => options.print_paths = false,
                "--help" | "-h" => {
                    print_usage();
                    process::exit(0);
                }
                other => return Err(format!("unknown option: {other}. Use --help.")),
            }
            i += 1;
        }
        if options.graph_path.is_empty() {
            return Err("--graph <file> is required".into());
        }
        options.config.validate()?;
        Ok(options)
    }
}

fn print_usage() {
    eprintln!("Usage: aco-solve --graph <file.dot> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -g, --graph <file>        DOT graph to solve (required)");
    eprintln!("      --ants <N>            Ants per iteration        [default: 128]");
    eprintln!("      --iterations <N>      Iterations                [default: 150]");
    eprintln!("  -t, --threads <N>         Worker threads            [default: cores]");
    eprintln!("      --alpha <F>           Pheromone exponent        [default: 1.0]");
    eprintln!("      --beta <F>            Heuristic exponent        [default: 3.0]");
    eprintln!("      --evaporation <F>     Evaporation rate          [default: 0.5]");
    eprintln!("      --q <F>               Deposit factor            [default: 100.0]");
    eprintln!("      --seed <N>            Random seed               [default: 42]");
    eprintln!("      --only-seq            Run only the sequential solver");
    eprintln!("      --only-par            Run only the parallel solver");
    eprintln!("      --no-paths            Do not print the best routes");
    eprintln!("  -h, --help                Show this help");
}

fn print_result(title: &str, result: &TourResult, print_paths: bool) {
    println!("== {title} ==");
    if !result.has_tour() {
        println!("no feasible cycle found");
        println!();
        return;
    }
    println!("best tour length: {:.3}", result.best_length);
    println!("tours with the best length: {}", result.best_paths.len());
    println!("elapsed: {:.2} ms", result.elapsed_ms);
    if print_paths {
        for (index, label) in result.best_paths_labels.iter().enumerate() {
            println!("route {}: {}", index + 1, label);
        }
    }
    println!();
}

fn run() -> Result<(), String> {
    let options = Options::from_args()?;
    let graph = Graph::from_dot_file(&options.graph_path).map_err(|err| err.to_string())?;
    let solver = AcoSolver::new(&graph);
    println!("graph vertices: {}", graph.vertex_count());
    println!(
        "ants={} iterations={} threads={}",
        options.config.ants, options.config.iterations, options.threads
    );
    println!();
    if !options.only_parallel {
        let result = solver.run_sequential(&options.config);
        print_result("sequential", &result, options.print_paths);
    }
    if !options.only_sequential {
        let result = solver.run_parallel(&options.config, options.threads);
        let title = format!("parallel ({} threads)", options.threads);
        print_result(&title, &result, options.print_paths);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(message) = run() {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
