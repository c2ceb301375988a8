//! PSG Register Definitions
//!
//! Canonical register numbers for the compatibility layout (R0-R15) and the
//! AY8930 expanded layout, where bank B occupies 0x10-0x1F. Register 0x0D
//! (aliased at 0x1D) doubles as the AY8930 mode latch.

use std::fmt;

/// Canonical register address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Channel A tone period (low byte) - R0
    ChAFreqLo = 0x00,
    /// Channel A tone period (high byte) - R1
    ChAFreqHi = 0x01,
    /// Channel B tone period (low byte) - R2
    ChBFreqLo = 0x02,
    /// Channel B tone period (high byte) - R3
    ChBFreqHi = 0x03,
    /// Channel C tone period (low byte) - R4
    ChCFreqLo = 0x04,
    /// Channel C tone period (high byte) - R5
    ChCFreqHi = 0x05,
    /// Noise period - R6
    NoiseFreq = 0x06,
    /// Mixer control (tone/noise enable per channel) - R7
    MixerCtrl = 0x07,
    /// Channel A amplitude - R8
    ChAAmplitude = 0x08,
    /// Channel B amplitude - R9
    ChBAmplitude = 0x09,
    /// Channel C amplitude - R10
    ChCAmplitude = 0x0A,
    /// Envelope (A) period low byte - R11
    EnvelopeFreqLo = 0x0B,
    /// Envelope (A) period high byte - R12
    EnvelopeFreqHi = 0x0C,
    /// Envelope (A) shape, AY8930 mode and bank in the high nibble - R13
    ModeShape = 0x0D,
    /// I/O Port A - R14
    PortA = 0x0E,
    /// I/O Port B - R15
    PortB = 0x0F,
    /// Envelope B period low byte (bank B)
    EnvelopeBFreqLo = 0x10,
    /// Envelope B period high byte (bank B)
    EnvelopeBFreqHi = 0x11,
    /// Envelope C period low byte (bank B)
    EnvelopeCFreqLo = 0x12,
    /// Envelope C period high byte (bank B)
    EnvelopeCFreqHi = 0x13,
    /// Envelope B shape (bank B)
    EnvelopeBShape = 0x14,
    /// Envelope C shape (bank B)
    EnvelopeCShape = 0x15,
    /// Channel A duty cycle (bank B)
    ChADuty = 0x16,
    /// Channel B duty cycle (bank B)
    ChBDuty = 0x17,
    /// Channel C duty cycle (bank B)
    ChCDuty = 0x18,
    /// Noise AND mask (bank B)
    NoiseAndMask = 0x19,
    /// Noise OR mask (bank B)
    NoiseOrMask = 0x1A,
}

impl Register {
    /// Convert a canonical address (0x00-0x1F) to a register
    ///
    /// Reserved addresses and the 0x1D mode alias return `None`.
    pub fn from_addr(addr: u8) -> Option<Self> {
        match addr {
            0x00 => Some(Register::ChAFreqLo),
            0x01 => Some(Register::ChAFreqHi),
            0x02 => Some(Register::ChBFreqLo),
            0x03 => Some(Register::ChBFreqHi),
            0x04 => Some(Register::ChCFreqLo),
            0x05 => Some(Register::ChCFreqHi),
            0x06 => Some(Register::NoiseFreq),
            0x07 => Some(Register::MixerCtrl),
            0x08 => Some(Register::ChAAmplitude),
            0x09 => Some(Register::ChBAmplitude),
            0x0A => Some(Register::ChCAmplitude),
            0x0B => Some(Register::EnvelopeFreqLo),
            0x0C => Some(Register::EnvelopeFreqHi),
            0x0D => Some(Register::ModeShape),
            0x0E => Some(Register::PortA),
            0x0F => Some(Register::PortB),
            0x10 => Some(Register::EnvelopeBFreqLo),
            0x11 => Some(Register::EnvelopeBFreqHi),
            0x12 => Some(Register::EnvelopeCFreqLo),
            0x13 => Some(Register::EnvelopeCFreqHi),
            0x14 => Some(Register::EnvelopeBShape),
            0x15 => Some(Register::EnvelopeCShape),
            0x16 => Some(Register::ChADuty),
            0x17 => Some(Register::ChBDuty),
            0x18 => Some(Register::ChCDuty),
            0x19 => Some(Register::NoiseAndMask),
            0x1A => Some(Register::NoiseOrMask),
            _ => None,
        }
    }

    /// Get the register address value
    pub fn addr(&self) -> u8 {
        *self as u8
    }

    /// Whether the register only exists in expanded mode
    pub fn is_bank_b(&self) -> bool {
        self.addr() >= 0x10
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::ChAFreqLo => "Channel A Period Low",
            Register::ChAFreqHi => "Channel A Period High",
            Register::ChBFreqLo => "Channel B Period Low",
            Register::ChBFreqHi => "Channel B Period High",
            Register::ChCFreqLo => "Channel C Period Low",
            Register::ChCFreqHi => "Channel C Period High",
            Register::NoiseFreq => "Noise Period",
            Register::MixerCtrl => "Mixer Control",
            Register::ChAAmplitude => "Channel A Amplitude",
            Register::ChBAmplitude => "Channel B Amplitude",
            Register::ChCAmplitude => "Channel C Amplitude",
            Register::EnvelopeFreqLo => "Envelope Period Low",
            Register::EnvelopeFreqHi => "Envelope Period High",
            Register::ModeShape => "Mode / Envelope Shape",
            Register::PortA => "I/O Port A",
            Register::PortB => "I/O Port B",
            Register::EnvelopeBFreqLo => "Envelope B Period Low",
            Register::EnvelopeBFreqHi => "Envelope B Period High",
            Register::EnvelopeCFreqLo => "Envelope C Period Low",
            Register::EnvelopeCFreqHi => "Envelope C Period High",
            Register::EnvelopeBShape => "Envelope B Shape",
            Register::EnvelopeCShape => "Envelope C Shape",
            Register::ChADuty => "Channel A Duty Cycle",
            Register::ChBDuty => "Channel B Duty Cycle",
            Register::ChCDuty => "Channel C Duty Cycle",
            Register::NoiseAndMask => "Noise AND Mask",
            Register::NoiseOrMask => "Noise OR Mask",
        };
        write!(f, "R{:02X} ({})", self.addr(), name)
    }
}

/// Register bank selected by the AY8930 mode latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bank {
    /// Bank A (0x00-0x0F)
    #[default]
    A,
    /// Bank B (0x10-0x1F), expanded mode only
    B,
}

/// High nibble of register 0x0D as latched by the AY8930
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeLatch(u8);

impl ModeLatch {
    /// Latch the high nibble of a mode/shape register write
    pub fn from_register(value: u8) -> Self {
        ModeLatch(value >> 4)
    }

    /// `101x` selects expanded mode
    #[inline]
    pub fn is_expanded(self) -> bool {
        self.0 & 0x0E == 0x0A
    }

    /// Bank selected by the low mode bit (only meaningful in expanded mode)
    #[inline]
    pub fn bank(self) -> Bank {
        if self.is_expanded() && self.0 & 0x01 != 0 {
            Bank::B
        } else {
            Bank::A
        }
    }

    /// Raw 4-bit mode value
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Raw register file (two banks of 16 bytes)
#[derive(Debug, Clone, Copy)]
pub struct RegisterFile {
    /// Register values 0x00-0x1F
    pub registers: [u8; 32],
}

impl RegisterFile {
    /// Create a new register file with all values set to 0
    pub fn new() -> Self {
        RegisterFile { registers: [0; 32] }
    }

    /// Read a register value
    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.registers[(addr & 0x1F) as usize]
    }

    /// Write a register value
    #[inline]
    pub fn write(&mut self, addr: u8, value: u8) {
        self.registers[(addr & 0x1F) as usize] = value;
    }

    /// Read a 16-bit (or narrower) period from a low/high register pair
    #[inline]
    pub fn pair(&self, lo: u8) -> (u8, u8) {
        (self.read(lo), self.read(lo + 1))
    }

    /// Get all registers as a slice
    pub fn as_slice(&self) -> &[u8; 32] {
        &self.registers
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
