//! Render a short arpeggio to a WAV file
//!
//! Run with: cargo run --example render_wav -- [output.wav] [config.json]
//!
//! The optional JSON file holds a `PsgConfig`; without it a ZX Spectrum
//! preset is used. Set `RUST_LOG=debug` to see engine configuration logs.

use std::path::Path;

use anyhow::{Context, Result};
use ay_psg::{Psg, PsgBackend, PsgConfig};

/// Frames per second of the register stream
const FRAME_RATE: u32 = 50;

/// Semitone ratios of a major arpeggio
const ARPEGGIO: [f64; 3] = [1.0, 1.259_921, 1.498_307];

/// Tone period register value for a frequency
fn tone_period(clock_hz: u32, freq: f64) -> u16 {
    (clock_hz as f64 / (16.0 * freq)).round().clamp(1.0, 4095.0) as u16
}

/// Register frame for one 50 Hz tick of the tune
fn frame_registers(clock_hz: u32, frame: u32) -> [u8; 16] {
    let root = 220.0;
    let note = ARPEGGIO[(frame % 3) as usize];
    let lead = tone_period(clock_hz, root * 2.0 * note);
    let bass = tone_period(clock_hz, root / 2.0);

    let mut regs = [0u8; 16];
    regs[0] = (lead & 0xFF) as u8;
    regs[1] = (lead >> 8) as u8;
    regs[2] = (bass & 0xFF) as u8;
    regs[3] = (bass >> 8) as u8;
    regs[6] = 0x04; // noise period
    // Snare on C every 8th frame
    regs[7] = if frame % 8 == 0 {
        0b0001_1100
    } else {
        0b0011_1100
    };
    regs[8] = 0x0D;
    regs[9] = 0x10; // bass follows the envelope
    regs[10] = if frame % 8 == 0 { 0x0C } else { 0x00 };
    regs[11] = 0x00;
    regs[12] = 0x08; // envelope period
    regs[13] = 0x0A; // triangle envelope
    regs
}

fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for &sample in samples {
        let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(sample_i16)?;
    }

    writer.finalize().context("failed to finalize WAV file")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "arpeggio.wav".to_string());
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {path}"))?;
            PsgConfig::from_json(&json)?
        }
        None => PsgConfig::zx_spectrum(),
    };

    let mut chip = Psg::new(&config)?;
    let samples_per_frame = (config.sample_rate / FRAME_RATE) as usize;
    let frames = FRAME_RATE * 4;

    println!(
        "Rendering {frames} frames on {} at {} Hz...",
        config.model, config.sample_rate
    );

    let mut samples = Vec::with_capacity(frames as usize * samples_per_frame * 2);
    let mut block = vec![0.0f32; samples_per_frame * 2];
    for frame in 0..frames {
        let regs = frame_registers(config.clock_hz, frame);
        // Only retrigger the envelope on the first frame
        if frame == 0 {
            chip.load_registers(&regs);
        } else {
            for (addr, &value) in regs.iter().take(13).enumerate() {
                chip.write(addr as u8, value);
            }
        }
        chip.render_into(&mut block, true);
        samples.extend_from_slice(&block);
    }

    println!("Writing WAV file to {output}...");
    write_wav(Path::new(&output), &samples, config.sample_rate)?;
    println!("Export complete!");
    Ok(())
}
