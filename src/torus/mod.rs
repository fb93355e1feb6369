//! Toroidal Game of Life engine: rule table, stencil scan and parallel stepper.

mod buffer;
mod engine;
mod error;
mod grid;
mod kernel;
mod partition;
pub mod rules;

pub use buffer::DoubleBuffer;
pub use engine::{Stepper, StepperConfig, StepperState, evolve};
pub use error::{LifeError, generations_from_i64};
pub use grid::Grid;
pub use kernel::{ScanKernel, scan_partition};
pub use partition::{Partition, assert_exact_cover, partition_rows};
pub use rules::RuleTable;
