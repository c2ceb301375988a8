//! Hardware lookup tables
//!
//! Shared, read-only data used by the generators, the dispatcher and the
//! mixer. Nothing in here is mutable; every engine instance reads the same
//! tables.

/// AY-3-891x DAC curve, indexed by 5-bit level
///
/// The part only has 16 distinct levels, so entries come in identical pairs.
pub const AY_DAC_TABLE: [f64; 32] = [
    0.0,
    0.0,
    0.00999465934234,
    0.00999465934234,
    0.0144502937362,
    0.0144502937362,
    0.0210574502174,
    0.0210574502174,
    0.0307011520562,
    0.0307011520562,
    0.0455481803616,
    0.0455481803616,
    0.0644998855573,
    0.0644998855573,
    0.107362478065,
    0.107362478065,
    0.126588845655,
    0.126588845655,
    0.20498970016,
    0.20498970016,
    0.292210269322,
    0.292210269322,
    0.372838941024,
    0.372838941024,
    0.492530708782,
    0.492530708782,
    0.635324635691,
    0.635324635691,
    0.805584802014,
    0.805584802014,
    1.0,
    1.0,
];

/// YM2149 DAC curve, indexed by 5-bit level (32 distinct levels)
pub const YM_DAC_TABLE: [f64; 32] = [
    0.0,
    0.0,
    0.00465400167849,
    0.00772106507973,
    0.0109559777218,
    0.0139620050355,
    0.0169985503929,
    0.0200198367285,
    0.024368657969,
    0.029694056611,
    0.0350652323186,
    0.0403906309606,
    0.0485389486534,
    0.0583352407111,
    0.0680552376593,
    0.0777752346075,
    0.0925154497597,
    0.111085679408,
    0.129747463188,
    0.148485542077,
    0.17666895552,
    0.211551079576,
    0.246387426566,
    0.281101701381,
    0.333730067903,
    0.400427252613,
    0.467383840696,
    0.53443198291,
    0.635172045472,
    0.75800717174,
    0.879926756695,
    1.0,
];

/// Highest envelope level
pub const ENVELOPE_MAX: i32 = 31;

/// Direction of one envelope segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    /// Level counts up by one per step
    Rising,
    /// Level counts down by one per step
    Falling,
    /// Level is pinned at 31
    HoldTop,
    /// Level is pinned at 0
    HoldBottom,
}

impl Slope {
    /// Signed change applied to the level on every envelope step
    #[inline]
    pub const fn delta(self) -> i32 {
        match self {
            Slope::Rising => 1,
            Slope::Falling => -1,
            Slope::HoldTop | Slope::HoldBottom => 0,
        }
    }
}

/// One half of an envelope cycle: direction plus the level loaded on entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeSegment {
    /// Direction while this segment is active
    pub slope: Slope,
    /// Level loaded when the segment becomes active
    pub reload: i32,
}

impl EnvelopeSegment {
    const fn new(slope: Slope, reload: i32) -> Self {
        Self { slope, reload }
    }
}

const FALL: EnvelopeSegment = EnvelopeSegment::new(Slope::Falling, ENVELOPE_MAX);
const RISE: EnvelopeSegment = EnvelopeSegment::new(Slope::Rising, 0);
const TOP: EnvelopeSegment = EnvelopeSegment::new(Slope::HoldTop, ENVELOPE_MAX);
const BOTTOM: EnvelopeSegment = EnvelopeSegment::new(Slope::HoldBottom, 0);

/// The 16 envelope shapes as (first segment, second segment)
///
/// The level moves by the active segment's slope; leaving 0..=31 toggles to
/// the other segment and reloads. Hold segments never leave the range.
pub const ENVELOPE_SHAPES: [[EnvelopeSegment; 2]; 16] = [
    [FALL, BOTTOM], // 0x0 \___
    [FALL, BOTTOM], // 0x1 \___
    [FALL, BOTTOM], // 0x2 \___
    [FALL, BOTTOM], // 0x3 \___
    [RISE, BOTTOM], // 0x4 /___
    [RISE, BOTTOM], // 0x5 /___
    [RISE, BOTTOM], // 0x6 /___
    [RISE, BOTTOM], // 0x7 /___
    [FALL, FALL],   // 0x8 \\\\
    [FALL, BOTTOM], // 0x9 \___
    [FALL, RISE],   // 0xA \/\/
    [FALL, TOP],    // 0xB \¯¯¯
    [RISE, RISE],   // 0xC ////
    [RISE, TOP],    // 0xD /¯¯¯
    [RISE, FALL],   // 0xE /\/\
    [RISE, BOTTOM], // 0xF /___
];

/// AY8930 duty-cycle patterns, read MSB first over a 32-step tone cycle
///
/// Register values above 8 select the last entry.
pub const DUTY_MASKS: [u32; 9] = [
    0x8000_0000, // 3.125 %
    0xC000_0000, // 6.25 %
    0xF000_0000, // 12.5 %
    0xFF00_0000, // 25 %
    0xFFFF_0000, // 50 %
    0xFFFF_FF00, // 75 %
    0xFFFF_FFF0, // 87.5 %
    0xFFFF_FFFC, // 93.75 %
    0xFFFF_FFFE, // 96.875 %
];

/// AY-3-8914 register number -> canonical AY-3-8910 register number
pub const LEGACY_LAYOUT_REMAP: [u8; 16] = [0, 2, 4, 11, 1, 3, 5, 12, 7, 6, 13, 8, 9, 10, 14, 15];

/// Valid bits per register in compatibility mode (R0..R15)
pub const COMPAT_REG_MASK: [u8; 16] = [
    0xFF, 0x0F, 0xFF, 0x0F, 0xFF, 0x0F, // tone periods
    0x1F, 0xFF, // noise period, mixer
    0x1F, 0x1F, 0x1F, // volumes
    0xFF, 0xFF, 0x0F, // envelope period, shape
    0xFF, 0xFF, // I/O ports
];

/// Valid bits per register in expanded mode (0x00..0x1F)
///
/// Zero marks a reserved address; writes to it are dropped.
pub const EXPANDED_REG_MASK: [u8; 32] = [
    // Bank A
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // tone periods (16-bit)
    0xFF, 0xFF, // noise period, mixer
    0x3F, 0x3F, 0x3F, // volumes (5 bits + envelope flag)
    0xFF, 0xFF, 0xFF, // envelope A period, mode/shape
    0xFF, 0xFF, // I/O ports
    // Bank B
    0xFF, 0xFF, 0xFF, 0xFF, // envelope B and C periods
    0x0F, 0x0F, // envelope B and C shapes
    0x0F, 0x0F, 0x0F, // duty cycles
    0xFF, 0xFF, // noise AND / OR masks
    0x00, 0x00, 0xFF, 0x00, 0x00, // reserved, mode/shape alias, reserved
];
