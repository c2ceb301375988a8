//! Sound generators for the PSG
//!
//! This module contains the individual generator components:
//! - Tone generators (3 channels, square or duty-cycle pulse)
//! - Noise generator (shared 17-bit LFSR)
//! - Envelope generator (one shared, or one per channel in expanded mode)
//!
//! All generators advance once per chip tick (master clock / 8). Periods are
//! clamped to at least 1 when they are set, so a zero period behaves exactly
//! like a period of 1.

use crate::chip_model::NoiseTap;
use crate::tables::{DUTY_MASKS, ENVELOPE_MAX, ENVELOPE_SHAPES};

/// Number of tone channels
pub const NUM_CHANNELS: usize = 3;

/// Steps in one duty-cycle pattern
const DUTY_STEPS: u32 = 32;

/// Tone generator for a single channel
#[derive(Clone, Debug)]
pub struct ToneGenerator {
    /// Current counter value
    counter: u32,
    /// Period from the fine/coarse register pair, never 0
    period: u32,
    /// Square-wave output (compatibility mode)
    output: u32,
    /// Position inside the 32-step duty pattern (expanded mode)
    duty_step: u32,
    /// Selected duty pattern
    duty_mask: u32,
}

impl ToneGenerator {
    /// Create a new tone generator
    pub fn new() -> Self {
        Self {
            counter: 0,
            period: 1,
            output: 0,
            duty_step: 0,
            duty_mask: DUTY_MASKS[0],
        }
    }

    /// Set the period from the fine and coarse registers
    ///
    /// The coarse register contributes 4 bits in compatibility mode and 8
    /// bits in expanded mode.
    #[inline]
    pub fn set_period(&mut self, expanded: bool, fine: u8, coarse: u8) {
        let coarse = if expanded { coarse } else { coarse & 0x0F };
        self.period = ((coarse as u32) << 8 | fine as u32).max(1);
    }

    /// Get current period
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Select one of the 9 duty patterns (values above 8 saturate)
    #[inline]
    pub fn set_duty(&mut self, value: u8) {
        let index = ((value & 0x0F) as usize).min(DUTY_MASKS.len() - 1);
        self.duty_mask = DUTY_MASKS[index];
    }

    /// Tick the generator, returns the output level (0 or 1)
    #[inline]
    pub fn update(&mut self, expanded: bool) -> u32 {
        if expanded {
            // 32 sub-ticks per tick against a span of two periods keeps the
            // pulse at the same pitch as the compatibility square wave
            self.counter += DUTY_STEPS;
            let span = self.period << 1;
            while self.counter >= span {
                self.counter -= span;
                self.duty_step = (self.duty_step + 1) & (DUTY_STEPS - 1);
            }
            (self.duty_mask >> (DUTY_STEPS - 1 - self.duty_step)) & 1
        } else {
            self.counter += 1;
            if self.counter >= self.period {
                self.counter = 0;
                self.output ^= 1;
            }
            self.output
        }
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Noise generator using a 17-bit LFSR
///
/// In compatibility mode the shift register advances on every other period
/// expiry. In expanded mode it runs at double density, gated by a free-running
/// 8-bit counter that has to reach `(lfsr & and_mask) | or_mask` first.
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    /// Current counter value
    counter: u32,
    /// Period from the noise register, never 0
    period: u32,
    /// Half-rate prescaler
    prescale: bool,
    /// 17-bit LFSR state
    lfsr: u32,
    /// Expanded-mode density counter
    density: u8,
    /// Expanded-mode AND mask
    and_mask: u8,
    /// Expanded-mode OR mask
    or_mask: u8,
}

impl NoiseGenerator {
    /// Create a new noise generator
    pub fn new() -> Self {
        Self {
            counter: 0,
            period: 1,
            prescale: false,
            lfsr: 1, // Must be non-zero
            density: 0,
            and_mask: 0,
            or_mask: 0,
        }
    }

    /// Set the period (5 bits in compatibility mode, 8 bits in expanded mode)
    #[inline]
    pub fn set_period(&mut self, expanded: bool, period: u8) {
        let period = if expanded { period } else { period & 0x1F };
        self.period = (period as u32).max(1);
    }

    /// Get current period
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Set the expanded-mode AND mask
    #[inline]
    pub fn set_and_mask(&mut self, mask: u8) {
        self.and_mask = mask;
    }

    /// Set the expanded-mode OR mask
    #[inline]
    pub fn set_or_mask(&mut self, mask: u8) {
        self.or_mask = mask;
    }

    /// Tick the generator, returns the current noise bit (0 or 1)
    #[inline]
    pub fn update(&mut self, expanded: bool, tap: NoiseTap) -> u32 {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            self.prescale = !self.prescale;
            if expanded {
                self.density = self.density.wrapping_add(1);
                let threshold = (self.lfsr as u8 & self.and_mask) | self.or_mask;
                if self.density >= threshold {
                    self.density = 0;
                    self.shift(tap);
                }
            } else if !self.prescale {
                self.shift(tap);
            }
        }
        self.lfsr & 1
    }

    #[inline]
    fn shift(&mut self, tap: NoiseTap) {
        let feedback = (self.lfsr ^ (self.lfsr >> tap.shift())) & 1;
        self.lfsr = (self.lfsr >> 1) | (feedback << 16);
    }

    /// Raw shift register contents
    #[inline]
    pub fn lfsr(&self) -> u32 {
        self.lfsr
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Envelope generator with 16 hardware shapes
///
/// Each shape is two segments from [`ENVELOPE_SHAPES`]. One update rule
/// covers all of them: add the active slope to the level and, when the level
/// leaves 0..=31, switch segment and reload.
#[derive(Clone, Debug)]
pub struct EnvelopeGenerator {
    /// Current counter value
    counter: u32,
    /// Period from the fine/coarse registers, never 0
    period: u32,
    /// Shape index (0-15)
    shape: usize,
    /// Active segment (0 or 1)
    segment: usize,
    /// Current level (0-31)
    level: i32,
}

impl EnvelopeGenerator {
    /// Create a new envelope generator
    pub fn new() -> Self {
        let mut envelope = Self {
            counter: 0,
            period: 1,
            shape: 0,
            segment: 0,
            level: 0,
        };
        envelope.set_shape(0);
        envelope
    }

    /// Set the period from the fine and coarse registers
    #[inline]
    pub fn set_period(&mut self, fine: u8, coarse: u8) {
        self.period = ((coarse as u32) << 8 | fine as u32).max(1);
    }

    /// Get current period
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Set the shape and restart from its first segment
    #[inline]
    pub fn set_shape(&mut self, shape: u8) {
        self.shape = (shape & 0x0F) as usize;
        self.segment = 0;
        self.level = ENVELOPE_SHAPES[self.shape][0].reload;
        self.counter = 0;
    }

    /// Tick the generator
    #[inline]
    pub fn update(&mut self) {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            self.level += ENVELOPE_SHAPES[self.shape][self.segment].slope.delta();
            if !(0..=ENVELOPE_MAX).contains(&self.level) {
                self.segment ^= 1;
                self.level = ENVELOPE_SHAPES[self.shape][self.segment].reload;
            }
        }
    }

    /// Get the current envelope level (0-31)
    #[inline]
    pub fn level(&self) -> u32 {
        self.level as u32
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for EnvelopeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
