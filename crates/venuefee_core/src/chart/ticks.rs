//! Axis tick generation.
//!
//! Tick *values* feed hover snapping downstream, so they are produced with
//! the same floating-point steps every time: start from a rounded origin and
//! add the interval, never multiply.

/// Volume axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

/// Fewer ticks than this on a linear axis triggers the half-interval retry.
pub const MIN_LINEAR_TICKS: usize = 3;

/// Linear tick interval (millions) for a domain of width `range`.
///
/// | range (M)      | interval (M) |
/// |----------------|--------------|
/// | ≤ 20           | 5            |
/// | ≤ 100          | 10           |
/// | ≤ 500          | 50           |
/// | ≤ 2 000        | 100          |
/// | ≤ 5 000        | 500          |
/// | otherwise      | 1 000        |
pub fn linear_volume_interval(range: f64) -> f64 {
    if range <= 20.0 {
        5.0
    } else if range <= 100.0 {
        10.0
    } else if range <= 500.0 {
        50.0
    } else if range <= 2000.0 {
        100.0
    } else if range <= 5000.0 {
        500.0
    } else {
        1000.0
    }
}

/// Volume-axis ticks for the domain `[min, max]` (millions).
///
/// Non-finite bounds yield no ticks.
pub fn volume_ticks(min: f64, max: f64, scale: AxisScale) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    match scale {
        AxisScale::Linear => linear_volume_ticks(min, max),
        AxisScale::Log => log_volume_ticks(max),
    }
}

fn linear_volume_ticks(min: f64, max: f64) -> Vec<f64> {
    let interval = linear_volume_interval(max - min);
    let start = ((min / interval).floor() * interval).max(0.0);
    let end = (max / interval).ceil() * interval;

    let ticks = stepped_ticks(start, end, interval, min, max);
    if ticks.len() < MIN_LINEAR_TICKS {
        return stepped_ticks(start, end, interval / 2.0, min, max);
    }
    ticks
}

fn stepped_ticks(start: f64, end: f64, step: f64, min: f64, max: f64) -> Vec<f64> {
    let mut ticks = Vec::new();
    let mut tick = start;
    while tick <= end {
        if tick >= min && tick <= max {
            ticks.push(tick);
        }
        tick += step;
    }
    ticks
}

/// Powers of ten and their 5× midpoints, from 1 up to `max`.
fn log_volume_ticks(max: f64) -> Vec<f64> {
    let max_exponent = max.log10().ceil();
    let mut ticks = Vec::new();
    if max_exponent >= 0.0 {
        for exponent in 0..=(max_exponent as i32) {
            let base = 10f64.powi(exponent);
            ticks.push(base);
            if base * 5.0 <= max {
                ticks.push(base * 5.0);
            }
        }
    }
    ticks.retain(|tick| *tick >= 1.0 && *tick <= max);
    ticks
}

/// One tick per whole basis point covering `[floor(min), ceil(max)]`.
pub fn bps_ticks(min: f64, max: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let end = max.ceil();
    let mut ticks = Vec::new();
    let mut tick = min.floor();
    while tick <= end {
        ticks.push(tick);
        tick += 1.0;
    }
    ticks
}

/// Nearest whole million to `volume`; halves round toward positive infinity.
pub fn snap_to_million_tick(volume: f64) -> f64 {
    let floor = volume.floor();
    if volume - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
