//! Conway's Game of Life (B3/S23) on a fixed-size torus, stepped in parallel.

pub mod board;
pub mod torus;
pub use torus::{Grid, LifeError, Stepper, StepperConfig, evolve};
