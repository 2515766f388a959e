//! Batch runner for the decaf compiler test suites.
//!
//! Each `.decaf` case is compiled by the external compiler (and, in
//! two-stage mode, executed by the TAC simulator); the combined output is
//! captured under `output/` and compared with `result/<case>.result` after
//! normalization.

pub use crate::compare::{normalize, Verdict};
pub use crate::config::{Mode, RunnerConfig, Tool};
pub use crate::errors::{Result, RunnerError};
pub use crate::runner::Runner;

pub mod case;
pub mod cli;
pub mod compare;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod runner;
pub mod selection;
