//! Newton's method with a value-and-slope objective.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{IterationCap, SolverConfig, SolverResult};

/// Solves `f(x) = 0` by stepping `x -= f(x) / f'(x)` from `initial_guess`.
///
/// `objective` returns `(f(x), f'(x))`. The solve stops as soon as
/// `|f(x)| < config.tolerance`; small steps alone never count as convergence.
/// With `config.lower_bound` set, each new iterate is raised to at least that
/// value, which keeps `(1 + y)^-t` style objectives off their pole at `y = -1`.
///
/// # Errors
///
/// * [`MathError::NonFinite`] when `f(x)` is NaN or infinite
/// * [`MathError::DivisionByZero`] when `f'(x)` is zero or not finite
/// * [`MathError::ConvergenceFailed`] at the iteration cap, unless
///   `config.on_cap` is [`IterationCap::ReturnLastIterate`]
///
/// ```rust
/// use bondgate_math::solvers::{newton_raphson, SolverConfig};
///
/// // cube root of 10
/// let cube = |x: f64| (x.powi(3) - 10.0, 3.0 * x * x);
/// let solved = newton_raphson(cube, 2.0, &SolverConfig::default()).unwrap();
/// assert!((solved.root.powi(3) - 10.0).abs() < 1e-10);
/// ```
pub fn newton_raphson<F>(
    objective: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let (fx, dfx) = objective(x);

        if !fx.is_finite() {
            return Err(MathError::non_finite("newton_raphson objective"));
        }

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                converged: true,
            });
        }

        if dfx == 0.0 || !dfx.is_finite() {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        x -= fx / dfx;

        if let Some(floor) = config.lower_bound {
            x = x.max(floor);
        }
    }

    let (residual, _) = objective(x);

    match config.on_cap {
        IterationCap::Fail => Err(MathError::convergence_failed(
            config.max_iterations,
            residual.abs(),
        )),
        IterationCap::ReturnLastIterate => {
            debug!(
                "newton_raphson hit {} iterations without converging (x = {x}, residual = {residual:.2e})",
                config.max_iterations
            );
            Ok(SolverResult {
                root: x,
                iterations: config.max_iterations,
                residual,
                converged: false,
            })
        }
    }
}
