//! Chip-rate to host-rate resampler
//!
//! The chip ticks at `clock / 8`, usually far above the host rate. Each host
//! sample is built from 8 oversampled points: a fractional accumulator decides
//! when the chip ticks, a local quadratic through the last four ticks fills in
//! the oversampled points, and a 192-tap low-pass FIR decimates them by 8.
//!
//! ```text
//!   chip ticks ──► Interpolator ──► FirDecimator (÷8) ──► host sample
//!   (step < 1 per oversampled point)
//! ```
//!
//! The kernel alone rejects
//! [`STOPBAND_REJECTION_DB`](crate::fir_kernel::STOPBAND_REJECTION_DB) above
//! [`STOPBAND_EDGE`](crate::fir_kernel::STOPBAND_EDGE). The quadratic
//! interpolator leaves images of the tick spectrum that fold into the
//! passband before the kernel runs, so a square tone above the edge is only
//! suppressed by [`ALIAS_REJECTION_DB`] once it has gone through the whole
//! pipeline. The worst measured cases sit just
//! above the edge (a period of 4 at 2 MHz gives about 56.8 dB).

use crate::fir_kernel::{DECIMATION, FIR_KERNEL, FIR_LEN};

/// Oversampling factor between the chip tick rate and the host rate
/// (8 interpolated points per output, one chip tick per point at most)
pub const OVERSAMPLING: u32 = 8 * DECIMATION as u32;

/// Minimum end-to-end rejection in dB of a square tone whose fundamental
/// lies above the kernel's stop-band edge, relative to an in-band tone of
/// the same level
pub const ALIAS_REJECTION_DB: f64 = 55.0;

/// Fractional chip ticks per oversampled point
///
/// Valid configurations satisfy `0 < step < 1`.
#[inline]
pub fn step_for(clock_hz: u32, sample_rate: u32) -> f64 {
    clock_hz as f64 / (sample_rate as f64 * OVERSAMPLING as f64)
}

/// Local quadratic through a 4-sample sliding window
///
/// The curve is evaluated between the two middle samples, so it lags the
/// newest tick by two samples.
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    y: [f64; 4],
    c: [f64; 3],
}

impl Interpolator {
    /// Create an interpolator with a silent history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw chip sample and refit the curve
    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.y.rotate_left(1);
        self.y[3] = sample;

        let y = &self.y;
        let y1 = y[2] - y[0];
        self.c = [
            0.5 * y[1] + 0.25 * (y[0] + y[2]),
            0.5 * y1,
            0.25 * (y[3] - y[1] - y1),
        ];
    }

    /// Evaluate the curve at `x` in `0.0..1.0`
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        (self.c[2] * x + self.c[1]) * x + self.c[0]
    }

    /// Clear history
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// FIR history ring with decimating convolution
#[derive(Clone)]
pub struct FirDecimator {
    history: Box<[f64; FIR_LEN]>,
    /// Index of the newest sample
    head: usize,
}

impl FirDecimator {
    /// Create a decimator with a silent history
    pub fn new() -> Self {
        Self {
            history: Box::new([0.0; FIR_LEN]),
            head: 0,
        }
    }

    /// Append one oversampled point
    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.head = (self.head + FIR_LEN - 1) % FIR_LEN;
        self.history[self.head] = sample;
    }

    /// Convolve the kernel with the history, newest sample first
    #[inline]
    pub fn output(&self) -> f64 {
        let (older, newer) = self.history.split_at(self.head);
        newer
            .iter()
            .chain(older.iter())
            .zip(FIR_KERNEL.iter())
            .map(|(x, h)| x * h)
            .sum()
    }

    /// Clear history
    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.head = 0;
    }
}

impl Default for FirDecimator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FirDecimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirDecimator")
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

/// Stereo resampler: interpolation, FIR decimation, tick scheduling
#[derive(Debug, Clone)]
pub struct Resampler {
    step: f64,
    /// Fractional position between the last two chip ticks
    x: f64,
    interp_left: Interpolator,
    interp_right: Interpolator,
    fir_left: FirDecimator,
    fir_right: FirDecimator,
}

impl Resampler {
    /// Create a resampler advancing `step` chip ticks per oversampled point
    pub fn new(step: f64) -> Self {
        Self {
            step,
            x: 0.0,
            interp_left: Interpolator::new(),
            interp_right: Interpolator::new(),
            fir_left: FirDecimator::new(),
            fir_right: FirDecimator::new(),
        }
    }

    /// Chip ticks per oversampled point
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Change the step and clear all history
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
        self.reset();
    }

    /// Produce one host-rate stereo sample
    ///
    /// `tick` runs one chip tick and returns its raw stereo output. It is
    /// called between 0 and 8 times per output depending on the step.
    #[inline]
    pub fn process<F>(&mut self, mut tick: F) -> (f64, f64)
    where
        F: FnMut() -> (f64, f64),
    {
        for _ in 0..DECIMATION {
            self.x += self.step;
            if self.x >= 1.0 {
                self.x -= 1.0;
                let (left, right) = tick();
                self.interp_left.push(left);
                self.interp_right.push(right);
            }
            self.fir_left.push(self.interp_left.eval(self.x));
            self.fir_right.push(self.interp_right.eval(self.x));
        }
        (self.fir_left.output(), self.fir_right.output())
    }

    /// Clear interpolation and filter history, keep the step
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.interp_left.reset();
        self.interp_right.reset();
        self.fir_left.reset();
        self.fir_right.reset();
    }
}
