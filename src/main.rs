//! Scan Radix Sort Demo
//!
//! Sorts the bundled example (or values given on the command line) with the
//! scan-based binary radix sort and prints the input and output vectors.
//! With `--random N` it sorts N random keys instead and reports timings,
//! optionally next to the baseline sorts and the standard library sort.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scan_radix_sort::baseline;
use scan_radix_sort::{
    is_sorted, PassRecorder, RadixSorter, SortConfig, SortError, TracingObserver,
};
use std::fmt::Display;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Input sorted when no values are given.
const EXAMPLE_INPUT: [i32; 10] = [32, 12, 5, 2, 64, 12, 4, 84, 1, 3];

/// Sort integers with a map/scan/scatter binary radix sort.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Values to sort (defaults to a bundled example)
    #[arg(allow_negative_numbers = true)]
    values: Vec<i32>,

    /// Sort N random keys instead of the given values
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long)]
    seed: Option<u64>,

    /// Run the primitives on the rayon thread pool
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Number of rayon worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Print the classification, scans and output of every pass
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Also time the baseline sorts and the standard library sort
    #[arg(long, default_value_t = false)]
    compare: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    if let Some(threads) = args.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!("Could not configure {} threads: {}", threads, e);
        }
    }
    info!(threads = rayon::current_num_threads(), "Default concurrency");

    let config = if args.parallel {
        SortConfig::parallel()
    } else {
        SortConfig::sequential()
    };
    let sorter = RadixSorter::new(config);

    let result = match args.random {
        Some(size) => run_random(&sorter, size, args.seed, args.compare),
        None => run_values(&sorter, &args),
    };

    if let Err(e) = result {
        error!("Sort failed: {}", e);
        std::process::exit(1);
    }
}

/// Sort explicit values and print the vectors.
fn run_values(sorter: &RadixSorter, args: &Args) -> Result<(), SortError> {
    let input: Vec<i32> = if args.values.is_empty() {
        EXAMPLE_INPUT.to_vec()
    } else {
        args.values.clone()
    };

    println!("Input vector: {}", join(&input));

    let output = if args.trace {
        let mut recorder = PassRecorder::new();
        let output = sorter.sort_signed_observed(&input, &mut recorder)?;
        print_passes(&recorder);
        output
    } else {
        sorter.sort_signed_observed(&input, &mut TracingObserver)?
    };

    println!("Output vector: {}", join(&output));

    if args.compare {
        let keys: Vec<u32> = input.iter().map(|&v| v as u32).collect();
        compare(sorter, &keys)?;
    }
    Ok(())
}

/// Sort random keys and report timings.
fn run_random(
    sorter: &RadixSorter,
    size: usize,
    seed: Option<u64>,
    with_baselines: bool,
) -> Result<(), SortError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(size, "Generating random data");
    let data: Vec<u32> = (0..size).map(|_| rng.gen_range(1..=u32::MAX)).collect();

    if with_baselines {
        compare(sorter, &data)
    } else {
        let (sorted, ms) = timed(|| sorter.sort(&data))?;
        report("scan radix", ms, &sorted);
        Ok(())
    }
}

/// Time the scan-based sorter against the baselines on the same keys.
fn compare(sorter: &RadixSorter, keys: &[u32]) -> Result<(), SortError> {
    println!("\n--- Performance Comparison ({} keys) ---", keys.len());

    let (expected, std_ms) = timed(|| {
        let mut data = keys.to_vec();
        data.sort_unstable();
        Ok::<_, SortError>(data)
    })?;
    report("std sort_unstable", std_ms, &expected);

    let (lists, lists_ms) = timed(|| baseline::partition_lists(keys))?;
    report("partition lists", lists_ms, &lists);

    let (buffers, buffers_ms) = timed(|| baseline::partition_buffers(keys))?;
    report("partition buffers", buffers_ms, &buffers);

    let (scan, scan_ms) = timed(|| sorter.sort(keys))?;
    report("scan radix", scan_ms, &scan);

    if scan == expected && lists == expected && buffers == expected {
        println!("Results match std sort: OK");
    } else {
        println!("WARNING: Results differ from std sort!");
    }

    let speedup = std_ms / scan_ms;
    if speedup > 1.0 {
        println!("Scan radix vs std: scan radix is {:.2}x faster", speedup);
    } else {
        println!("Scan radix vs std: std is {:.2}x faster", 1.0 / speedup);
    }
    Ok(())
}

fn timed<T>(f: impl FnOnce() -> Result<T, SortError>) -> Result<(T, f64), SortError> {
    let start = Instant::now();
    let value = f()?;
    Ok((value, start.elapsed().as_secs_f64() * 1000.0))
}

fn report(name: &str, ms: f64, sorted: &[u32]) {
    let status = if is_sorted(sorted) { "OK" } else { "FAILED" };
    println!("{:>18}: {:>10.3} ms  (verified: {})", name, ms, status);
}

fn print_passes(recorder: &PassRecorder) {
    for pass in recorder.passes() {
        println!("Bit {}:", pass.bit);
        println!("  Map:    {:?}", pass.flags);
        println!("  Scan 1: {:?}", pass.false_count);
        println!("  Scan 2: {:?}", pass.true_count);
        println!("  Output: {:?}", pass.output);
    }
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
