use std::sync::OnceLock;

use log::{debug, trace};

use super::buffer::DoubleBuffer;
use super::error::LifeError;
use super::grid::Grid;
use super::kernel::{ScanKernel, scan_partition};
use super::partition::{Partition, partition_rows};
use super::rules::RuleTable;

static PHYSICAL_CORES: OnceLock<usize> = OnceLock::new();

#[inline]
fn physical_core_count() -> usize {
    *PHYSICAL_CORES.get_or_init(|| num_cpus::get_physical().max(1))
}

/// Configuration for a [`Stepper`].
///
/// `StepperConfig::default()` picks one worker per physical core and the
/// table kernel. Thread counts are validated when the stepper is built, not
/// here, so a zero surfaces as a configuration error.
#[derive(Clone, Debug, Default)]
pub struct StepperConfig {
    /// Number of workers per generation.
    /// `None` means one per physical core.
    pub thread_count: Option<usize>,
    /// Hard upper bound applied after auto-detection.
    pub max_threads: Option<usize>,
    pub kernel: ScanKernel,
}

impl StepperConfig {
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n);
        self
    }

    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n);
        self
    }

    pub fn kernel(mut self, kernel: ScanKernel) -> Self {
        self.kernel = kernel;
        self
    }
}

fn resolve_thread_count(config: &StepperConfig) -> Result<usize, LifeError> {
    let mut threads = match config.thread_count {
        Some(0) => return Err(LifeError::ZeroThreads),
        Some(n) => n,
        None => physical_core_count(),
    };
    match config.max_threads {
        Some(0) => return Err(LifeError::ZeroMaxThreads),
        Some(cap) => threads = threads.min(cap),
        None => {}
    }
    Ok(threads)
}

/// Split the next grid into one disjoint row slice per partition.
fn split_partitions<'a>(
    mut cells: &'a mut [u8],
    parts: &[Partition],
    cols: usize,
) -> Vec<&'a mut [u8]> {
    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        let (head, tail) = std::mem::take(&mut cells).split_at_mut(part.len() * cols);
        out.push(head);
        cells = tail;
    }
    debug_assert!(cells.is_empty());
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepperState {
    Running { generation: u64 },
    Done,
}

/// Parallel generation driver over a double-buffered torus.
///
/// Construction is the INIT phase: buffers, rule table, pool and partitions
/// are all set up before the first generation runs.
pub struct Stepper {
    buffers: DoubleBuffer,
    table: RuleTable,
    pool: rayon::ThreadPool,
    partitions: Vec<Partition>,
    kernel: ScanKernel,
    generation: u64,
    gens_max: u64,
}

impl Stepper {
    pub fn new(initial: Grid, gens_max: u64, config: StepperConfig) -> Result<Self, LifeError> {
        let threads = resolve_thread_count(&config)?;
        let rows = initial.rows();
        let cols = initial.cols();
        let buffers = DoubleBuffer::new(initial)?;
        // Partitions past `rows` are empty, so they never need a pool thread.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.min(rows))
            .thread_name(|i| format!("torus-life-{i}"))
            .build()?;
        let partitions = partition_rows(rows, threads);

        debug!(
            "stepper init: {rows}x{cols} grid, {gens_max} generations, {threads} workers, {:?} kernel",
            config.kernel
        );
        trace!("partitions: {partitions:?}");

        Ok(Self {
            buffers,
            table: RuleTable::new(),
            pool,
            partitions,
            kernel: config.kernel,
            generation: 0,
            gens_max,
        })
    }

    pub fn state(&self) -> StepperState {
        if self.generation >= self.gens_max {
            StepperState::Done
        } else {
            StepperState::Running {
                generation: self.generation,
            }
        }
    }

    /// Advance one generation. A finished stepper is left untouched.
    pub fn step(&mut self) -> StepperState {
        if self.state() == StepperState::Done {
            return StepperState::Done;
        }

        let kernel = self.kernel;
        let table = &self.table;
        let partitions = &self.partitions;
        let (current, next) = self.buffers.split();
        let cols = current.cols();
        let slices = split_partitions(next.cells_mut(), partitions, cols);

        // The scope returns only after every worker has written its rows.
        self.pool.scope(|scope| {
            let work = partitions.iter().zip(slices).filter(|(part, _)| !part.is_empty());
            for (&part, out) in work {
                scope.spawn(move |_| scan_partition(kernel, table, current, part, out));
            }
        });

        self.buffers.swap();
        self.generation += 1;
        trace!("generation {} complete", self.generation);
        self.state()
    }

    /// Drive to completion and return the latest grid.
    pub fn run(&mut self) -> &Grid {
        while self.step() != StepperState::Done {}
        self.buffers.current()
    }

    pub fn current(&self) -> &Grid {
        self.buffers.current()
    }

    pub fn into_grid(self) -> Grid {
        self.buffers.into_current()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn gens_max(&self) -> u64 {
        self.gens_max
    }

    /// Configured worker count; one partition per worker.
    pub fn thread_count(&self) -> usize {
        self.partitions.len()
    }

    /// OS threads actually backing the pool.
    pub fn pool_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }
}

/// Evolve `initial` for exactly `gens_max` generations.
pub fn evolve(initial: Grid, gens_max: u64, config: &StepperConfig) -> Result<Grid, LifeError> {
    let mut stepper = Stepper::new(initial, gens_max, config.clone())?;
    stepper.run();
    Ok(stepper.into_grid())
}
