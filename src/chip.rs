//! PSG engine
//!
//! Register dispatch, per-tick synthesis and resampling for one emulated
//! chip. Generators advance at the internal clock rate (master_clock / 8);
//! the resampler pulls ticks as needed to produce each host-rate sample.

use log::{debug, trace, warn};

use crate::chip_model::{ChipModel, NoiseTap};
use crate::config::{validate_rates, PsgConfig};
use crate::dc_filter::DcFilter;
use crate::generators::{EnvelopeGenerator, NoiseGenerator, ToneGenerator, NUM_CHANNELS};
use crate::mixer::{ChannelInput, Mixer};
use crate::registers::{Bank, ModeLatch, Register, RegisterFile};
use crate::resampler::{step_for, Resampler};
use crate::tables::{COMPAT_REG_MASK, EXPANDED_REG_MASK, LEGACY_LAYOUT_REMAP};
use crate::Result;

/// Canonical address of the mode/shape register
const MODE_SHAPE: u8 = Register::ModeShape as u8;

/// Number of compatibility registers uploaded by [`Psg::load_registers`]
const FRAME_REGISTERS: usize = 14;

/// Lifecycle of an engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Configured or reset, no sample produced yet
    Idle,
    /// At least one sample has been produced
    Running,
}

/// Register file, generators and mixer: everything one chip tick touches
#[derive(Debug, Clone)]
struct ChipCore {
    model: ChipModel,
    noise_tap: NoiseTap,
    registers: RegisterFile,
    mode: ModeLatch,
    tones: [ToneGenerator; NUM_CHANNELS],
    noise: NoiseGenerator,
    /// Envelope A is shared in compatibility mode; B and C only run in
    /// expanded mode
    envelopes: [EnvelopeGenerator; NUM_CHANNELS],
    mixer: Mixer,
}

impl ChipCore {
    fn new(model: ChipModel, noise_tap: NoiseTap) -> Self {
        ChipCore {
            model,
            noise_tap,
            registers: RegisterFile::new(),
            mode: ModeLatch::default(),
            tones: Default::default(),
            noise: NoiseGenerator::new(),
            envelopes: Default::default(),
            mixer: Mixer::new(model),
        }
    }

    #[inline]
    fn expanded(&self) -> bool {
        self.mode.is_expanded()
    }

    fn reset(&mut self) {
        self.registers = RegisterFile::new();
        self.mode = ModeLatch::default();
        self.tones.iter_mut().for_each(ToneGenerator::reset);
        self.noise.reset();
        self.envelopes.iter_mut().for_each(EnvelopeGenerator::reset);
        self.mixer.reset();
    }

    /// Map a bus address to its canonical register, or `None` if the address
    /// is reserved in the current mode
    fn resolve(&self, address: u8) -> Option<u8> {
        if address > 0x1F {
            return None;
        }
        let address = if self.model.uses_legacy_layout() {
            *LEGACY_LAYOUT_REMAP.get(address as usize)?
        } else {
            address
        };

        if self.expanded() {
            let canonical = match self.mode.bank() {
                Bank::A => address,
                Bank::B => address | 0x10,
            };
            if canonical & 0x0F == MODE_SHAPE {
                return Some(MODE_SHAPE);
            }
            (EXPANDED_REG_MASK[canonical as usize] != 0).then_some(canonical)
        } else if address < 0x10 {
            Some(address)
        } else if address == MODE_SHAPE | 0x10 && self.model.supports_expanded_mode() {
            Some(MODE_SHAPE)
        } else {
            None
        }
    }

    /// Valid bits of a canonical register in the current mode
    fn mask(&self, canonical: u8) -> u8 {
        if self.expanded() {
            EXPANDED_REG_MASK[canonical as usize]
        } else if canonical == MODE_SHAPE && self.model.supports_expanded_mode() {
            0xFF
        } else if (0x08..=0x0A).contains(&canonical) && self.model.uses_legacy_layout() {
            0x3F
        } else {
            COMPAT_REG_MASK[canonical as usize]
        }
    }

    fn write(&mut self, address: u8, value: u8) {
        let Some(canonical) = self.resolve(address) else {
            match Register::from_addr(address) {
                Some(register) if register.is_bank_b() => trace!(
                    "{}: {register} needs expanded mode, dropped {value:#04x}",
                    self.model
                ),
                _ => trace!(
                    "{}: dropped {value:#04x} to reserved address {address:#04x}",
                    self.model
                ),
            }
            return;
        };

        if canonical == MODE_SHAPE && self.model.supports_expanded_mode() {
            self.write_mode(value);
            return;
        }

        let value = value & self.mask(canonical);
        self.registers.write(canonical, value);
        self.apply(canonical);
    }

    /// AY8930 mode/shape write: latch mode and bank, restart envelope A
    fn write_mode(&mut self, value: u8) {
        let latch = ModeLatch::from_register(value);
        let was_expanded = self.expanded();
        self.mode = latch;
        if latch.is_expanded() != was_expanded {
            let mode = if latch.is_expanded() {
                "expanded"
            } else {
                "compatibility"
            };
            debug!(
                "{}: {mode} mode (mode bits {:#06b})",
                self.model,
                latch.bits()
            );
            self.clear_registers();
        }
        self.registers.write(MODE_SHAPE, value);
        self.envelopes[0].set_shape(value);
    }

    /// Zero every register except the mode latch
    ///
    /// Done on every AY8930 mode transition so no half-compat, half-expanded
    /// settings survive. This follows the datasheet's description; it has not
    /// been confirmed on silicon.
    fn clear_registers(&mut self) {
        for canonical in (0u8..0x20).filter(|r| r & 0x0F != MODE_SHAPE) {
            self.registers.write(canonical, 0);
            self.apply(canonical);
        }
    }

    /// Push a stored register value into the generators
    fn apply(&mut self, canonical: u8) {
        let expanded = self.expanded();
        let value = self.registers.read(canonical);
        match canonical {
            0x00..=0x05 => {
                let channel = (canonical / 2) as usize;
                let (fine, coarse) = self.registers.pair(canonical & !1);
                self.tones[channel].set_period(expanded, fine, coarse);
            }
            0x06 => self.noise.set_period(expanded, value),
            0x07 => self.mixer.set_mixer_control(value),
            0x08..=0x0A => self.mixer.set_volume((canonical - 0x08) as usize, value),
            0x0B | 0x0C => {
                let (fine, coarse) = self.registers.pair(0x0B);
                self.envelopes[0].set_period(fine, coarse);
            }
            0x0D => self.envelopes[0].set_shape(value),
            0x10..=0x13 => {
                let channel = 1 + ((canonical - 0x10) / 2) as usize;
                let (fine, coarse) = self.registers.pair(canonical & !1);
                self.envelopes[channel].set_period(fine, coarse);
            }
            0x14 | 0x15 => self.envelopes[1 + (canonical - 0x14) as usize].set_shape(value),
            0x16..=0x18 => self.tones[(canonical - 0x16) as usize].set_duty(value),
            0x19 => self.noise.set_and_mask(value),
            0x1A => self.noise.set_or_mask(value),
            // I/O ports and reserved registers only hold their value
            _ => {}
        }
    }

    fn read(&self, address: u8) -> u8 {
        self.resolve(address)
            .map_or(0, |canonical| self.registers.read(canonical))
    }

    /// Run one chip tick and return the raw stereo mix
    #[inline]
    fn tick(&mut self) -> (f64, f64) {
        let expanded = self.expanded();
        let noise = self.noise.update(expanded, self.noise_tap);

        let envelopes = if expanded { NUM_CHANNELS } else { 1 };
        for envelope in &mut self.envelopes[..envelopes] {
            envelope.update();
        }

        let mut inputs = [ChannelInput::default(); NUM_CHANNELS];
        for (channel, input) in inputs.iter_mut().enumerate() {
            let envelope = if expanded { channel } else { 0 };
            *input = ChannelInput {
                tone: self.tones[channel].update(expanded),
                noise,
                envelope: self.envelopes[envelope].level(),
            };
        }
        self.mixer.mix(expanded, &inputs)
    }
}

/// Programmable sound generator engine
///
/// One instance emulates one chip. Register writes go through
/// [`write`](Self::write); every call to [`process`](Self::process) advances
/// time by one host sample.
///
/// # Example
///
/// ```
/// use ay_psg::{ChipModel, Psg, PsgConfig};
///
/// let config = PsgConfig::atari_st().with_sample_rate(48_000);
/// let mut chip = Psg::new(&config)?;
/// assert_eq!(chip.model(), ChipModel::Ym2149);
///
/// chip.write(0x00, 0x1C); // Tone A period low
/// chip.write(0x01, 0x01); // Tone A period high
/// chip.write(0x08, 0x0F); // Volume A
/// chip.write(0x07, 0x3E); // Mixer: tone A on
///
/// let (left, right) = chip.process();
/// assert!(left.is_finite() && right.is_finite());
/// # Ok::<(), ay_psg::PsgError>(())
/// ```
#[derive(Clone)]
pub struct Psg {
    clock_hz: u32,
    sample_rate: u32,
    core: ChipCore,
    resampler: Resampler,
    dc_left: DcFilter,
    dc_right: DcFilter,
    /// Last value returned by `process` or `remove_dc`
    output: (f64, f64),
    state: EngineState,
}

impl Psg {
    /// Build an engine from a configuration
    ///
    /// Fails if the configuration does not validate, in particular when the
    /// clock is too fast for the output rate.
    pub fn new(config: &PsgConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!("{}: rejected configuration: {err}", config.model);
            return Err(err);
        }
        let mut chip = Psg {
            clock_hz: config.clock_hz,
            sample_rate: config.sample_rate,
            core: ChipCore::new(config.model, config.effective_noise_tap()),
            resampler: Resampler::new(config.step()),
            dc_left: DcFilter::new(),
            dc_right: DcFilter::new(),
            output: (0.0, 0.0),
            state: EngineState::Idle,
        };
        for (channel, pan) in config.layout.pans().into_iter().enumerate() {
            chip.set_pan(channel, pan, config.equal_power_pan);
        }
        debug!(
            "{}: configured {} Hz -> {} Hz (step {:.6}, tap {:?})",
            config.model,
            config.clock_hz,
            config.sample_rate,
            config.step(),
            config.effective_noise_tap()
        );
        Ok(chip)
    }

    /// Change clock and output rate
    ///
    /// Resampler and DC history are cleared; registers and generator state
    /// are kept. On error the engine is left unchanged.
    pub fn configure(&mut self, clock_hz: u32, sample_rate: u32) -> Result<()> {
        if let Err(err) = validate_rates(clock_hz, sample_rate) {
            warn!("{}: rejected configuration: {err}", self.core.model);
            return Err(err);
        }
        self.clock_hz = clock_hz;
        self.sample_rate = sample_rate;
        self.resampler.set_step(step_for(clock_hz, sample_rate));
        self.dc_left.reset();
        self.dc_right.reset();
        self.output = (0.0, 0.0);
        debug!(
            "{}: configured {clock_hz} Hz -> {sample_rate} Hz (step {:.6})",
            self.core.model,
            self.resampler.step()
        );
        Ok(())
    }

    /// Silence the chip: all registers 0, generators and filters cleared
    ///
    /// Pan and mute settings survive.
    pub fn reset(&mut self) {
        self.core.reset();
        self.resampler.reset();
        self.dc_left.reset();
        self.dc_right.reset();
        self.output = (0.0, 0.0);
        self.state = EngineState::Idle;
    }

    /// Write a register
    ///
    /// Addresses are 0x00-0x1F. Addresses that are reserved in the current
    /// mode are ignored and reserved bits are masked off.
    pub fn write(&mut self, address: u8, value: u8) {
        self.core.write(address, value);
    }

    /// Read back the masked value stored for an address, 0 if reserved
    pub fn read_register(&self, address: u8) -> u8 {
        self.core.read(address)
    }

    /// Write R0-R13 in order
    pub fn load_registers(&mut self, regs: &[u8; 16]) {
        for (address, &value) in regs.iter().take(FRAME_REGISTERS).enumerate() {
            self.write(address as u8, value);
        }
    }

    /// Snapshot of the canonical register file (bank B at 0x10-0x1F)
    pub fn dump_registers(&self) -> [u8; 32] {
        *self.core.registers.as_slice()
    }

    /// Place a channel in the stereo field (0.0 left, 1.0 right)
    pub fn set_pan(&mut self, channel: usize, pan: f64, equal_power: bool) {
        self.core.mixer.set_pan(channel, pan, equal_power);
    }

    /// Mute or unmute a channel; its generators keep running
    pub fn set_channel_mute(&mut self, channel: usize, mute: bool) {
        self.core.mixer.set_channel_mute(channel, mute);
    }

    /// Check if a channel is muted
    pub fn is_channel_muted(&self, channel: usize) -> bool {
        self.core.mixer.is_channel_muted(channel)
    }

    /// Advance by one host sample and return it
    #[inline]
    pub fn process(&mut self) -> (f64, f64) {
        let core = &mut self.core;
        self.output = self.resampler.process(|| core.tick());
        self.state = EngineState::Running;
        self.output
    }

    /// Remove the DC offset from the last sample and return it
    #[inline]
    pub fn remove_dc(&mut self) -> (f64, f64) {
        self.output = (
            self.dc_left.process(self.output.0),
            self.dc_right.process(self.output.1),
        );
        self.output
    }

    /// Emulated part
    pub fn model(&self) -> ChipModel {
        self.core.model
    }

    /// Noise feedback tap in use
    pub fn noise_tap(&self) -> NoiseTap {
        self.core.noise_tap
    }

    /// Whether AY8930 expanded mode is active
    pub fn is_expanded(&self) -> bool {
        self.core.expanded()
    }

    /// Register bank currently addressed by 0x00-0x0F
    pub fn bank(&self) -> Bank {
        self.core.mode.bank()
    }

    /// Lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Chip ticks per oversampled point
    pub fn step(&self) -> f64 {
        self.resampler.step()
    }

    /// Master clock in Hz
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Output sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl std::fmt::Debug for Psg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pan_gains: Vec<(f64, f64)> = (0..NUM_CHANNELS)
            .filter_map(|channel| self.core.mixer.pan_gains(channel))
            .collect();
        f.debug_struct("Psg")
            .field("model", &self.core.model)
            .field("clock_hz", &self.clock_hz)
            .field("sample_rate", &self.sample_rate)
            .field("registers", self.core.registers.as_slice())
            .field("pan_gains", &pan_gains)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
