//! # Bondgate Math
//!
//! Numerical utilities for the Bondgate bond screening engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson root finding with an optional lower clamp and a
//!   configurable policy for what happens when the iteration cap is reached
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Same inputs always produce the same iterate sequence
//! - **Numerical Stability**: Non-finite values stop the iteration with an error
//! - **Bounded**: Every solve is capped, so a call never runs unbounded

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{newton_raphson, IterationCap, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
