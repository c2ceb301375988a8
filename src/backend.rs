//! Backend trait abstraction for PSG engines
//!
//! Output sinks (file writers, audio callbacks, streamers) drive a chip
//! through this trait so they do not depend on one concrete engine type.

use crate::chip::Psg;

/// Common interface for PSG backends
///
/// # Example
///
/// ```
/// use ay_psg::{Psg, PsgBackend, PsgConfig};
///
/// fn play_note<B: PsgBackend>(chip: &mut B) -> Vec<f32> {
///     chip.write_register(0x00, 0xF0); // Channel A period low
///     chip.write_register(0x01, 0x01); // Channel A period high
///     chip.write_register(0x08, 0x0F); // Channel A volume
///     chip.write_register(0x07, 0x3E); // Mixer: enable tone A
///
///     chip.render(441, true)
/// }
///
/// let mut chip = Psg::new(&PsgConfig::default())?;
/// assert_eq!(play_note(&mut chip).len(), 882);
/// # Ok::<(), ay_psg::PsgError>(())
/// ```
pub trait PsgBackend: Send {
    /// Reset the backend to initial state
    ///
    /// Clears all registers and generator state.
    fn reset(&mut self);

    /// Write to a register
    ///
    /// # Arguments
    ///
    /// * `addr` - Register address (0x00-0x1F)
    /// * `value` - Register value (0x00-0xFF)
    ///
    /// Addresses outside the valid range for the current mode are ignored.
    fn write_register(&mut self, addr: u8, value: u8);

    /// Read from a register
    ///
    /// # Returns
    ///
    /// Current register value, or 0x00 for reserved addresses
    fn read_register(&self, addr: u8) -> u8;

    /// Advance by one output sample
    ///
    /// # Returns
    ///
    /// `(left, right)` sample pair
    fn process(&mut self) -> (f64, f64);

    /// Remove the DC offset from the last sample produced by [`process`](Self::process)
    fn remove_dc(&mut self) -> (f64, f64);

    /// Render interleaved stereo into a caller-provided buffer
    ///
    /// The buffer holds `left, right` pairs; a trailing odd slot is left
    /// untouched. This avoids per-call allocations; prefer it in hot paths.
    fn render_into(&mut self, buffer: &mut [f32], dc_block: bool) {
        for frame in buffer.chunks_exact_mut(2) {
            let (mut left, mut right) = self.process();
            if dc_block {
                (left, right) = self.remove_dc();
            }
            frame[0] = left as f32;
            frame[1] = right as f32;
        }
    }

    /// Render `frames` stereo frames as interleaved `f32`
    fn render(&mut self, frames: usize, dc_block: bool) -> Vec<f32> {
        let mut samples = vec![0.0; frames * 2];
        self.render_into(&mut samples, dc_block);
        samples
    }
}

impl PsgBackend for Psg {
    fn reset(&mut self) {
        Psg::reset(self)
    }

    fn write_register(&mut self, addr: u8, value: u8) {
        Psg::write(self, addr, value)
    }

    fn read_register(&self, addr: u8) -> u8 {
        Psg::read_register(self, addr)
    }

    fn process(&mut self) -> (f64, f64) {
        Psg::process(self)
    }

    fn remove_dc(&mut self) -> (f64, f64) {
        Psg::remove_dc(self)
    }
}
