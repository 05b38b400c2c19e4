pub mod analyzer;
pub mod batch;
pub mod config;
pub mod consts;
pub mod error;
pub mod filters;
pub mod grid;
pub mod io;
pub mod progress;
pub mod roi;
pub mod stats;
