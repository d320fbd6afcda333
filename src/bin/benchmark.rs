//! Performance benchmark comparing serial and parallel generation passes

use std::time::Instant;
use life3d::{Algorithm, Automaton};

const SEED: u64 = 0x5EED;
const ALIVE_PERCENT: f64 = 20.0;

fn benchmark(size: usize, algorithm: Algorithm, iterations: u32) -> f64 {
    let mut automaton = match Automaton::with_seed(size, size, size, ALIVE_PERCENT, SEED) {
        Ok(automaton) => automaton.with_algorithm(algorithm),
        Err(err) => {
            eprintln!("skipping {size}^3: {err}");
            return 0.0;
        }
    };

    let start = Instant::now();
    for _ in 0..iterations {
        automaton.step();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== 3D Life Performance Benchmark ===\n");

    let sizes = [16, 32, 64, 96, 128, 192];
    let iterations = 10;

    println!("{:>10} {:>12} {:>12} {:>10} {:>14}",
        "Size", "Serial", "Parallel", "Speedup", "Mcells/sec");
    println!("{:-<62}", "");

    for size in sizes {
        let serial_ms = benchmark(size, Algorithm::Serial, iterations);
        let parallel_ms = benchmark(size, Algorithm::Parallel, iterations);

        let speedup_str = if parallel_ms > 0.0 {
            format!("{:>9.1}x", serial_ms / parallel_ms)
        } else {
            format!("{:>10}", "-")
        };
        let cells = (size * size * size) as f64;
        let throughput = if parallel_ms > 0.0 {
            cells / (parallel_ms / 1000.0) / 1_000_000.0
        } else {
            0.0
        };

        println!(
            "{:>10} {:>12.2} {:>12.2} {} {:>14.1}",
            format!("{0}x{0}x{0}", size),
            serial_ms,
            parallel_ms,
            speedup_str,
            throughput
        );
    }

    println!("\n=== Memory Usage (128^3) ===\n");

    let size = 128;
    let cell_bytes = std::mem::size_of::<life3d::Cell>();
    let grid_bytes = size * size * size * cell_bytes;
    println!("Cell:            {:>10} bytes", cell_bytes);
    println!("Live + snapshot: {:>10} bytes ({:.1} MB)", grid_bytes * 2, (grid_bytes * 2) as f64 / 1_000_000.0);
}
