//! Trend calculator
//!
//! Pure functions: a current value, an optional previous value, and a short
//! chronological history go in; deltas, an OLS slope, a clamped projection,
//! and a direction classification come out.

use crate::models::{TrendData, TrendDirection};

/// Slope threshold separating rising/falling from stable. Tunable constant,
/// not derived.
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.05;

/// History points required before a regression is attempted
pub const REGRESSION_WINDOW: usize = 3;

/// Compute a full trend with the default direction threshold
pub fn compute_trend(current: f64, previous: Option<f64>, history: &[f64]) -> TrendData {
    compute_trend_with_threshold(current, previous, history, DEFAULT_TREND_THRESHOLD)
}

/// Compute a full trend with an explicit direction threshold
pub fn compute_trend_with_threshold(
    current: f64,
    previous: Option<f64>,
    history: &[f64],
    threshold: f64,
) -> TrendData {
    let mut trend = TrendData::from_current(current);

    if let Some(previous) = previous {
        trend.previous_value = Some(previous);
        let delta = current - previous;
        trend.delta = Some(delta);
        // Never divide by a zero baseline
        if previous != 0.0 {
            trend.delta_pct = Some(delta / previous * 100.0);
        }
    }

    if history.len() >= REGRESSION_WINDOW {
        let window = &history[history.len() - REGRESSION_WINDOW..];
        trend.three_week_values = window.to_vec();

        let (slope, projected) = linear_regression(window);
        trend.slope = Some(slope);
        trend.projected_next = Some(projected);
        trend.trend_direction = Some(if slope > threshold {
            TrendDirection::Rising
        } else if slope < -threshold {
            TrendDirection::Falling
        } else {
            TrendDirection::Stable
        });
    }

    trend
}

/// Ordinary least squares over x = 0..n against `values`
///
/// Returns `(slope, projected_next)` where the projection evaluates the fit
/// at x = n and is clamped to zero. Degenerate inputs (fewer than two
/// points, zero x variance) yield a zero slope and the last value.
pub fn linear_regression(values: &[f64]) -> (f64, f64) {
    if values.len() < 2 {
        return (0.0, values.last().copied().unwrap_or(0.0));
    }

    let n = values.len() as f64;
    let x_mean = (values.len() - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        return (0.0, values[values.len() - 1]);
    }

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;
    let projected = (slope * n + intercept).max(0.0);

    (slope, projected)
}
