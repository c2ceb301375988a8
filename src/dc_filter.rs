//! DC offset removal filter
//!
//! The DAC maps levels onto 0.0..=1.0, so the mixed output always sits above
//! zero. This filter subtracts a running average to centre it.

/// History buffer size (1024 samples = ~23ms at 44.1kHz)
const HISTORY_SIZE_BITS: usize = 10;
/// Number of samples averaged by [`DcFilter`]
pub const HISTORY_SIZE: usize = 1 << HISTORY_SIZE_BITS;

/// DC offset removal filter using a running average
///
/// This filter maintains a circular buffer of recent samples and subtracts
/// the running average to center the output around zero.
#[derive(Clone)]
pub struct DcFilter {
    /// Circular buffer of recent samples
    buffer: Box<[f64; HISTORY_SIZE]>,
    /// Current write position in buffer
    position: usize,
    /// Running sum of all samples in buffer
    running_sum: f64,
}

impl DcFilter {
    /// Create a new DC filter
    pub fn new() -> Self {
        Self {
            buffer: Box::new([0.0; HISTORY_SIZE]),
            position: 0,
            running_sum: 0.0,
        }
    }

    /// Process a sample and return it with the running average removed
    #[inline]
    pub fn process(&mut self, sample: f64) -> f64 {
        self.running_sum += sample - self.buffer[self.position];
        self.buffer[self.position] = sample;
        self.position = (self.position + 1) & (HISTORY_SIZE - 1);

        sample - self.running_sum / HISTORY_SIZE as f64
    }

    /// Reset the filter state
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.position = 0;
        self.running_sum = 0.0;
    }
}

impl Default for DcFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DcFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DcFilter")
            .field("position", &self.position)
            .field("running_sum", &self.running_sum)
            .finish_non_exhaustive()
    }
}
