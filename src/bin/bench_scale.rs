#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use torus_life::torus::{Grid, ScanKernel, Stepper, StepperConfig};

const LIVE_DENSITY: f64 = 0.42;
const SEED: u64 = 0x5EED_1234_ABCD_EF01;

fn seed_random_grid(size: usize) -> Grid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(SEED);
    let threshold = (u64::MAX as f64 * LIVE_DENSITY) as u64;
    let cells = (0..size * size)
        .map(|_| rng.next_u64() <= threshold)
        .collect();
    Grid::from_cells(size, size, cells).expect("benchmark grid")
}

fn bench(grid: &Grid, threads: usize, kernel: ScanKernel, iterations: u64) -> (f64, u64) {
    let config = StepperConfig::default().thread_count(threads).kernel(kernel);
    let mut stepper = Stepper::new(grid.clone(), iterations, config).expect("stepper init");

    let start = Instant::now();
    let pop = stepper.run().population();
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms, pop)
}

fn main() {
    env_logger::init();

    let scales: &[(usize, u64)] = &[(256, 400), (1024, 100), (2048, 50), (4096, 20)];
    let max_threads = num_cpus::get_physical().max(1);
    let mut thread_counts = vec![1usize];
    let mut threads = 2;
    while threads <= max_threads {
        thread_counts.push(threads);
        threads *= 2;
    }

    println!(
        "{:<10} {:>8} {:>8} {:>8} {:>12} {:>10} {:>10}",
        "Grid", "Kernel", "Threads", "Iters", "Total(ms)", "Avg(ms)", "Pop"
    );
    println!("{}", "-".repeat(72));

    for &(size, iters) in scales {
        let grid = seed_random_grid(size);
        for kernel in [ScanKernel::Table, ScanKernel::Direct] {
            for &threads in &thread_counts {
                let (total_ms, pop) = bench(&grid, threads, kernel, iters);
                let avg_ms = total_ms / iters as f64;
                println!(
                    "{:<10} {:>8} {:>8} {:>8} {:>12.1} {:>10.4} {:>10}",
                    format!("{size}x{size}"),
                    format!("{kernel:?}"),
                    threads,
                    iters,
                    total_ms,
                    avg_ms,
                    pop
                );
            }
        }
    }
}
