//! AY-3-8910 / AY-3-8914 / YM2149 / AY8930 PSG emulation core
//!
//! Turns a stream of chip register writes into band-limited stereo PCM.
//! One [`Psg`] instance emulates one chip; dual-chip setups simply run two
//! independent instances.
//!
//! # Features
//! - Tone, noise and envelope generators with the hardware's zero-period clamp
//! - Per-model DAC curves, noise feedback taps and register layouts
//! - AY8930 expanded mode: 16-bit tone periods, duty cycles, per-channel
//!   envelopes, noise AND/OR masks
//! - Quadratic interpolation into a 192-tap FIR decimator (8× oversampling)
//! - Optional 1024-sample DC blocker
//!
//! # Quick start
//! ```
//! use ay_psg::{Psg, PsgConfig};
//!
//! let mut chip = Psg::new(&PsgConfig::zx_spectrum())?;
//! chip.write(7, 0b0011_1110); // Mixer: tone A only
//! chip.write(0, 0xFD); // Tone A period low
//! chip.write(1, 0x00); // Tone A period high
//! chip.write(8, 0x0F); // Volume A
//!
//! for _ in 0..1000 {
//!     let (_left, _right) = chip.process();
//! }
//! let (_left, _right) = chip.remove_dc();
//! # Ok::<(), ay_psg::PsgError>(())
//! ```
//!
//! # Threading
//! The engine performs no synchronisation. Hosts that write registers from a
//! frame-rate thread while another thread calls [`Psg::process`] must
//! serialise access themselves.

#![warn(missing_docs)]

pub mod backend;
pub mod chip;
pub mod chip_model;
pub mod config;
pub mod dc_filter;
pub mod fir_kernel;
pub mod generators;
pub mod mixer;
pub mod registers;
pub mod resampler;
pub mod tables;

/// Error types for PSG engine operations
#[derive(thiserror::Error, Debug)]
pub enum PsgError {
    /// The clock is too fast for the output rate at 8×8 oversampling
    #[error(
        "clock {clock_hz} Hz cannot be resampled to {sample_rate} Hz (step {step:.4} must be below 1)"
    )]
    ClockRatio {
        /// Requested master clock
        clock_hz: u32,
        /// Requested output rate
        sample_rate: u32,
        /// Resulting chip ticks per oversampled point
        step: f64,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Configuration could not be parsed
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, PsgError>;

// Public API exports
pub use backend::PsgBackend;
pub use chip::{EngineState, Psg};
pub use chip_model::{ChipModel, NoiseTap};
pub use config::{PsgConfig, StereoLayout};
pub use registers::{Bank, Register};
