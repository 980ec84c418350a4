//! Root finding.
//!
//! Yields are solved with [`newton_raphson`]. Its objective hands back the value
//! and the slope together, since a discounted cash-flow sum yields both from the
//! same discount factors.
//!
//! ```rust
//! use bondgate_math::solvers::{newton_raphson, SolverConfig};
//!
//! // Annual-pay 6% bond, 3 years to maturity, priced at 102
//! let cash_flows = [(1, 6.0), (2, 6.0), (3, 106.0)];
//! let objective = |y: f64| {
//!     cash_flows.iter().fold((-102.0, 0.0), |(value, slope), &(t, cf)| {
//!         let df = (1.0 + y).powi(-t);
//!         (value + cf * df, slope - f64::from(t) * cf * df / (1.0 + y))
//!     })
//! };
//!
//! let solved = newton_raphson(objective, 0.06, &SolverConfig::default()).unwrap();
//! assert!(solved.converged);
//! assert!(solved.root < 0.06); // premium bond yields less than its coupon
//! ```

mod newton;

pub use newton::newton_raphson;

/// What a solver does when it reaches the iteration cap without converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterationCap {
    /// Return [`MathError::ConvergenceFailed`](crate::MathError::ConvergenceFailed).
    #[default]
    Fail,
    /// Return the last iterate with `converged = false`.
    ReturnLastIterate,
}

/// Stopping rules and guards for an iterative solve.
///
/// Defaults: |f(x)| below `1e-10`, at most 100 steps, no clamp, fail at the cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence is declared once |f(x)| drops below this.
    pub tolerance: f64,
    /// Hard cap on Newton steps.
    pub max_iterations: u32,
    /// Iterates below this value are clamped to it.
    pub lower_bound: Option<f64>,
    /// Behaviour at the iteration cap.
    pub on_cap: IterationCap,
}

impl SolverConfig {
    /// Residual threshold used by [`SolverConfig::default`].
    pub const DEFAULT_TOLERANCE: f64 = 1e-10;

    /// Step cap used by [`SolverConfig::default`].
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

    /// A config with the given stopping rules and no clamp.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            lower_bound: None,
            on_cap: IterationCap::Fail,
        }
    }

    /// Clamps iterates from below.
    #[must_use]
    pub fn with_lower_bound(self, lower_bound: f64) -> Self {
        Self {
            lower_bound: Some(lower_bound),
            ..self
        }
    }

    /// Sets the behaviour at the iteration cap.
    #[must_use]
    pub fn with_iteration_cap(self, on_cap: IterationCap) -> Self {
        Self { on_cap, ..self }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE, Self::DEFAULT_MAX_ITERATIONS)
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Converged root, or the last iterate when `converged` is false.
    pub root: f64,
    /// Newton steps taken.
    pub iterations: u32,
    /// f(root).
    pub residual: f64,
    /// Whether |residual| fell below the tolerance.
    pub converged: bool,
}
