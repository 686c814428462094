// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod schedule;
pub mod outline;
pub mod filters;
pub mod seats;
pub mod specs;
pub mod fetch;
pub mod store;
pub mod progress;
pub mod runner;
pub mod report;

#[cfg(feature = "cli")]
pub mod cli;
