#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod rng;

pub use rng::JavaRandom;
