//! PSG Output Mixer
//!
//! Gates each channel with the mixer control register (R7), picks either the
//! fixed volume or the live envelope level, looks the result up in the chip
//! model's DAC table and spreads it over the stereo pair.
//!
//! The gate follows the hardware logic
//! `enabled = (tone | tone_off) & (noise | noise_off)`, so a channel with both
//! sources switched off outputs its volume as a constant level.

use bitflags::bitflags;

use crate::chip_model::ChipModel;
use crate::generators::NUM_CHANNELS;

bitflags! {
    /// Mixer Control Register (R7) bitflags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MixerFlags: u8 {
        /// Channel A tone bit
        const CH_A_TONE = 0x01;
        /// Channel B tone bit
        const CH_B_TONE = 0x02;
        /// Channel C tone bit
        const CH_C_TONE = 0x04;
        /// Channel A noise bit
        const CH_A_NOISE = 0x08;
        /// Channel B noise bit
        const CH_B_NOISE = 0x10;
        /// Channel C noise bit
        const CH_C_NOISE = 0x20;
    }
}

impl MixerFlags {
    /// Create mixer flags from raw register value
    pub fn from_register(value: u8) -> Self {
        MixerFlags::from_bits_truncate(value)
    }

    /// Tone bit for a channel (0=A, 1=B, 2=C)
    #[inline]
    pub fn tone_bit(channel: usize) -> Self {
        MixerFlags::from_bits_truncate(0x01 << channel)
    }

    /// Noise bit for a channel (0=A, 1=B, 2=C)
    #[inline]
    pub fn noise_bit(channel: usize) -> Self {
        MixerFlags::from_bits_truncate(0x08 << channel)
    }

    /// Check if a channel's tone reaches the output
    ///
    /// `active_high` selects the AY8930 sense where a set bit enables.
    #[inline]
    pub fn is_tone_enabled(&self, channel: usize, active_high: bool) -> bool {
        self.contains(Self::tone_bit(channel)) == active_high
    }

    /// Check if a channel's noise reaches the output
    #[inline]
    pub fn is_noise_enabled(&self, channel: usize, active_high: bool) -> bool {
        self.contains(Self::noise_bit(channel)) == active_high
    }
}

/// Generator outputs feeding one channel for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelInput {
    /// Tone (or duty pulse) bit
    pub tone: u32,
    /// Noise bit
    pub noise: u32,
    /// Level of the envelope routed to this channel (0-31)
    pub envelope: u32,
}

/// Per-channel volume, pan and mute state
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChannelMix {
    /// Raw amplitude register (volume plus envelope-routing bits)
    volume: u8,
    pan_left: f64,
    pan_right: f64,
    muted: bool,
}

impl Default for ChannelMix {
    fn default() -> Self {
        ChannelMix {
            volume: 0,
            pan_left: 0.5,
            pan_right: 0.5,
            muted: false,
        }
    }
}

/// Audio Mixer - combines the three channels into a stereo pair
#[derive(Debug, Clone)]
pub struct Mixer {
    mixer_flags: MixerFlags,
    channels: [ChannelMix; NUM_CHANNELS],
    dac: &'static [f64; 32],
    active_high: bool,
    envelope_field_mask: u8,
    full_envelope: bool,
}

impl Mixer {
    /// Create a mixer for a chip model, all channels centred
    pub fn new(model: ChipModel) -> Self {
        Mixer {
            mixer_flags: MixerFlags::empty(),
            channels: [ChannelMix::default(); NUM_CHANNELS],
            dac: model.dac_table(),
            active_high: model.mixer_bits_active_high(),
            envelope_field_mask: model.envelope_field_mask(),
            full_envelope: model.has_32_step_envelope(),
        }
    }

    /// Set mixer control register value
    pub fn set_mixer_control(&mut self, value: u8) {
        self.mixer_flags = MixerFlags::from_register(value);
    }

    /// Store a channel amplitude register
    #[inline]
    pub fn set_volume(&mut self, channel: usize, value: u8) {
        if let Some(ch) = self.channels.get_mut(channel) {
            ch.volume = value;
        }
    }

    /// Place a channel in the stereo field
    ///
    /// `pan` runs from 0.0 (left) to 1.0 (right) and is clamped; NaN centres.
    /// Equal-power panning uses square-root gains so a centred channel keeps
    /// its loudness.
    pub fn set_pan(&mut self, channel: usize, pan: f64, equal_power: bool) {
        let Some(ch) = self.channels.get_mut(channel) else {
            return;
        };
        let pan = if pan.is_nan() {
            0.5
        } else {
            pan.clamp(0.0, 1.0)
        };
        if equal_power {
            ch.pan_left = (1.0 - pan).sqrt();
            ch.pan_right = pan.sqrt();
        } else {
            ch.pan_left = 1.0 - pan;
            ch.pan_right = pan;
        }
    }

    /// Left and right gains of a channel
    pub fn pan_gains(&self, channel: usize) -> Option<(f64, f64)> {
        self.channels
            .get(channel)
            .map(|ch| (ch.pan_left, ch.pan_right))
    }

    /// Mute or unmute a channel
    pub fn set_channel_mute(&mut self, channel: usize, mute: bool) {
        if let Some(ch) = self.channels.get_mut(channel) {
            ch.muted = mute;
        }
    }

    /// Check if a channel is muted
    pub fn is_channel_muted(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|ch| ch.muted)
    }

    /// Forget register-driven state, keeping pan and mute
    pub fn reset(&mut self) {
        self.mixer_flags = MixerFlags::empty();
        for ch in self.channels.iter_mut() {
            ch.volume = 0;
        }
    }

    /// Whether the R7 gate lets a channel through for this tick
    #[inline]
    fn gate(&self, channel: usize, input: &ChannelInput) -> bool {
        let tone_off = !self.mixer_flags.is_tone_enabled(channel, self.active_high);
        let noise_off = !self.mixer_flags.is_noise_enabled(channel, self.active_high);
        (input.tone != 0 || tone_off) && (input.noise != 0 || noise_off)
    }

    /// DAC table index for a channel
    ///
    /// In expanded mode bit 5 routes the envelope and the low 5 bits are the
    /// volume. In compatibility mode the field above the 4-bit volume routes
    /// the envelope: one bit on most parts, two on the AY-3-8914 where lower
    /// values attenuate the envelope by 6 dB steps. Parts with a 16-step
    /// envelope only drive the odd DAC entries.
    #[inline]
    fn level_index(&self, channel: usize, expanded: bool, envelope: u32) -> usize {
        let volume = self.channels[channel].volume;
        let index = if expanded {
            if volume & 0x20 != 0 {
                envelope
            } else {
                (volume & 0x1F) as u32
            }
        } else {
            let field = (volume >> 4) & self.envelope_field_mask;
            if field == 0 {
                ((volume & 0x0F) as u32) << 1 | 1
            } else {
                let env = envelope >> (self.envelope_field_mask - field);
                if self.full_envelope {
                    env
                } else {
                    env | 1
                }
            }
        };
        (index & 0x1F) as usize
    }

    /// Mix one tick of generator output into a stereo pair
    #[inline]
    pub fn mix(&self, expanded: bool, inputs: &[ChannelInput; NUM_CHANNELS]) -> (f64, f64) {
        let mut left = 0.0;
        let mut right = 0.0;
        for (channel, input) in inputs.iter().enumerate() {
            let ch = &self.channels[channel];
            if ch.muted || !self.gate(channel, input) {
                continue;
            }
            let level = self.dac[self.level_index(channel, expanded, input.envelope)];
            left += level * ch.pan_left;
            right += level * ch.pan_right;
        }
        (left, right)
    }
}
