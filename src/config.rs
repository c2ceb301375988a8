//! Engine configuration
//!
//! Clock, output rate, chip model and initial stereo placement. Presets cover
//! the usual home computers; everything is serde-friendly so hosts can keep
//! configurations in JSON.

use serde::{Deserialize, Serialize};

use crate::chip_model::{ChipModel, NoiseTap};
use crate::generators::NUM_CHANNELS;
use crate::resampler::step_for;
use crate::{PsgError, Result};

/// Default sample rate (44.1 kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// ZX Spectrum 128 PSG clock
pub const ZX_SPECTRUM_CLOCK: u32 = 1_773_400;
/// Atari ST PSG clock
pub const ATARI_ST_CLOCK: u32 = 2_000_000;
/// Amstrad CPC PSG clock
pub const AMSTRAD_CPC_CLOCK: u32 = 1_000_000;
/// MSX (and Intellivision) PSG clock
pub const MSX_CLOCK: u32 = 1_789_772;

/// Initial stereo placement of channels A, B and C
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StereoLayout {
    /// All channels centred
    #[default]
    Mono,
    /// A left, B centre, C right
    Abc,
    /// A left, C centre, B right
    Acb,
    /// B left, A centre, C right
    Bac,
    /// Explicit pan per channel, 0.0 (left) to 1.0 (right)
    Custom([f64; NUM_CHANNELS]),
}

impl StereoLayout {
    /// Pan position of each channel
    pub fn pans(&self) -> [f64; NUM_CHANNELS] {
        match self {
            StereoLayout::Mono => [0.5, 0.5, 0.5],
            StereoLayout::Abc => [0.1, 0.5, 0.9],
            StereoLayout::Acb => [0.1, 0.9, 0.5],
            StereoLayout::Bac => [0.5, 0.1, 0.9],
            StereoLayout::Custom(pans) => *pans,
        }
    }
}

/// Configuration for one emulated chip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsgConfig {
    /// Master clock in Hz
    pub clock_hz: u32,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Emulated part
    pub model: ChipModel,
    /// Noise feedback tap; `None` uses the model's default
    pub noise_tap: Option<NoiseTap>,
    /// Initial channel placement
    pub layout: StereoLayout,
    /// Use equal-power (square-root) pan gains instead of linear ones
    pub equal_power_pan: bool,
}

impl PsgConfig {
    /// AY-3-8910 at `clock_hz`, centred channels
    pub fn new(clock_hz: u32, sample_rate: u32) -> Self {
        PsgConfig {
            clock_hz,
            sample_rate,
            model: ChipModel::Ay8910,
            noise_tap: None,
            layout: StereoLayout::Mono,
            equal_power_pan: false,
        }
    }

    /// ZX Spectrum 128 / +2 / +3 (AY-3-8912, ABC stereo)
    pub fn zx_spectrum() -> Self {
        Self::new(ZX_SPECTRUM_CLOCK, DEFAULT_SAMPLE_RATE).with_layout(StereoLayout::Abc)
    }

    /// Atari ST (YM2149, mono)
    pub fn atari_st() -> Self {
        Self::new(ATARI_ST_CLOCK, DEFAULT_SAMPLE_RATE).with_model(ChipModel::Ym2149)
    }

    /// Amstrad CPC (AY-3-8912, ABC stereo)
    pub fn amstrad_cpc() -> Self {
        Self::new(AMSTRAD_CPC_CLOCK, DEFAULT_SAMPLE_RATE).with_layout(StereoLayout::Abc)
    }

    /// MSX (AY-3-8910, mono)
    pub fn msx() -> Self {
        Self::new(MSX_CLOCK, DEFAULT_SAMPLE_RATE)
    }

    /// Mattel Intellivision (AY-3-8914, mono)
    pub fn intellivision() -> Self {
        Self::new(MSX_CLOCK, DEFAULT_SAMPLE_RATE).with_model(ChipModel::Ay8914)
    }

    /// AY8930 at an arbitrary clock, ABC stereo
    pub fn ay8930(clock_hz: u32) -> Self {
        Self::new(clock_hz, DEFAULT_SAMPLE_RATE)
            .with_model(ChipModel::Ay8930)
            .with_layout(StereoLayout::Abc)
    }

    /// Replace the sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Replace the chip model
    pub fn with_model(mut self, model: ChipModel) -> Self {
        self.model = model;
        self
    }

    /// Force a noise feedback tap
    pub fn with_noise_tap(mut self, tap: NoiseTap) -> Self {
        self.noise_tap = Some(tap);
        self
    }

    /// Replace the stereo layout
    pub fn with_layout(mut self, layout: StereoLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Noise tap the engine will use
    pub fn effective_noise_tap(&self) -> NoiseTap {
        self.noise_tap.unwrap_or_else(|| self.model.default_noise_tap())
    }

    /// Resampler step for this clock and rate
    pub fn step(&self) -> f64 {
        step_for(self.clock_hz, self.sample_rate)
    }

    /// Check that an engine can be built from this configuration
    pub fn validate(&self) -> Result<()> {
        validate_rates(self.clock_hz, self.sample_rate)?;
        if let StereoLayout::Custom(pans) = self.layout {
            if let Some(pan) = pans.iter().find(|p| !(0.0..=1.0).contains(*p)) {
                return Err(PsgError::ConfigError(format!(
                    "pan {pan} outside 0.0..=1.0"
                )));
            }
        }
        Ok(())
    }

    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PsgConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PsgConfig {
    fn default() -> Self {
        Self::new(ZX_SPECTRUM_CLOCK, DEFAULT_SAMPLE_RATE)
    }
}

/// Check a clock/rate pair against the fixed 8×8 oversampling factor
pub(crate) fn validate_rates(clock_hz: u32, sample_rate: u32) -> Result<()> {
    if clock_hz == 0 {
        return Err(PsgError::ConfigError("clock must be non-zero".into()));
    }
    if sample_rate == 0 {
        return Err(PsgError::ConfigError("sample rate must be non-zero".into()));
    }
    let step = step_for(clock_hz, sample_rate);
    if step >= 1.0 {
        return Err(PsgError::ClockRatio {
            clock_hz,
            sample_rate,
            step,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for config in [
            PsgConfig::zx_spectrum(),
            PsgConfig::atari_st(),
            PsgConfig::amstrad_cpc(),
            PsgConfig::msx(),
            PsgConfig::intellivision(),
            PsgConfig::ay8930(ATARI_ST_CLOCK),
            PsgConfig::default(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
            assert!(config.step() > 0.0 && config.step() < 1.0);
        }
    }

    #[test]
    fn test_preset_models() {
        assert_eq!(PsgConfig::atari_st().model, ChipModel::Ym2149);
        assert_eq!(PsgConfig::intellivision().model, ChipModel::Ay8914);
        assert_eq!(PsgConfig::ay8930(2_000_000).model, ChipModel::Ay8930);
        assert_eq!(PsgConfig::zx_spectrum().layout, StereoLayout::Abc);
    }

    #[test]
    fn test_clock_too_fast_for_rate() {
        let err = PsgConfig::new(4_000_000, 44_100).validate().unwrap_err();
        assert!(matches!(
            err,
            PsgError::ClockRatio {
                clock_hz: 4_000_000,
                ..
            }
        ));
        // A higher output rate brings the ratio back under one
        assert!(PsgConfig::new(4_000_000, 96_000).validate().is_ok());
    }

    #[test]
    fn test_zero_rates_rejected() {
        assert!(matches!(
            PsgConfig::new(0, 44_100).validate(),
            Err(PsgError::ConfigError(_))
        ));
        assert!(matches!(
            PsgConfig::new(1_000_000, 0).validate(),
            Err(PsgError::ConfigError(_))
        ));
    }

    #[test]
    fn test_custom_pan_range() {
        let ok = PsgConfig::default().with_layout(StereoLayout::Custom([0.0, 0.5, 1.0]));
        assert!(ok.validate().is_ok());

        let bad = PsgConfig::default().with_layout(StereoLayout::Custom([0.0, 1.5, 1.0]));
        assert!(matches!(bad.validate(), Err(PsgError::ConfigError(_))));

        let nan = PsgConfig::default().with_layout(StereoLayout::Custom([f64::NAN, 0.5, 0.5]));
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_layout_pans() {
        assert_eq!(StereoLayout::Mono.pans(), [0.5; 3]);
        assert_eq!(StereoLayout::Acb.pans(), [0.1, 0.9, 0.5]);
        assert_eq!(StereoLayout::Bac.pans(), [0.5, 0.1, 0.9]);
    }

    #[test]
    fn test_noise_tap_override() {
        let config = PsgConfig::zx_spectrum();
        assert_eq!(config.effective_noise_tap(), NoiseTap::Bit3);
        assert_eq!(
            config.with_noise_tap(NoiseTap::Bit2).effective_noise_tap(),
            NoiseTap::Bit2
        );
    }

    #[test]
    fn test_json_round_trip() {
        let config = PsgConfig::ay8930(1_750_000)
            .with_sample_rate(48_000)
            .with_noise_tap(NoiseTap::Bit3);
        let json = config.to_json().unwrap();
        assert!(json.contains("\"ay8930\""));
        assert_eq!(PsgConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_fills_defaults() {
        let config = PsgConfig::from_json(r#"{ "model": "ym2149", "layout": "acb" }"#).unwrap();
        assert_eq!(config.model, ChipModel::Ym2149);
        assert_eq!(config.layout, StereoLayout::Acb);
        assert_eq!(config.clock_hz, ZX_SPECTRUM_CLOCK);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);

        let custom =
            PsgConfig::from_json(r#"{ "layout": { "custom": [0.2, 0.5, 0.8] } }"#).unwrap();
        assert_eq!(custom.layout, StereoLayout::Custom([0.2, 0.5, 0.8]));
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            PsgConfig::from_json("{ not json"),
            Err(PsgError::Json(_))
        ));
        assert!(matches!(
            PsgConfig::from_json(r#"{ "clock_hz": 9000000 }"#),
            Err(PsgError::ClockRatio { .. })
        ));
    }
}
