//! Benchmarks for the PSG engine hot path
//!
//! Run with: cargo bench --bench engine

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use ay_psg::{ChipModel, Psg, PsgBackend, PsgConfig};

fn tone_chip(config: &PsgConfig) -> Psg {
    let mut chip = Psg::new(config).unwrap();
    chip.write(0, 0x10); // Tone A period low
    chip.write(1, 0x01); // Tone A period high
    chip.write(7, 0x3E); // Mixer: enable tone A, disable noise
    chip.write(8, 0x0F); // Tone A volume max
    chip
}

fn bench_process_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    let mut chip = tone_chip(&PsgConfig::zx_spectrum());

    for iterations in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            iterations,
            |b, &iterations| {
                b.iter(|| {
                    for _ in 0..iterations {
                        black_box(chip.process());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let mut chip = tone_chip(&PsgConfig::atari_st());
    let mut buffer = vec![0.0f32; 2 * 44100];

    for frames in [882, 4410, 44100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(frames), frames, |b, &frames| {
            b.iter(|| {
                chip.render_into(black_box(&mut buffer[..frames * 2]), true);
            });
        });
    }

    group.finish();
}

fn bench_register_updates(c: &mut Criterion) {
    let mut chip = Psg::new(&PsgConfig::default()).unwrap();

    c.bench_function("write_register", |b| {
        b.iter(|| {
            chip.write(black_box(0), black_box(0x10));
            chip.write(black_box(1), black_box(0x01));
            chip.write(black_box(7), black_box(0x3E));
            chip.write(black_box(8), black_box(0x0F));
        });
    });
}

fn bench_music_frame(c: &mut Criterion) {
    let mut chip = Psg::new(&PsgConfig::zx_spectrum()).unwrap();

    // Simulate a typical tracker frame update (R0-R13)
    let frame_regs: [u8; 16] = [
        0x10, 0x01, // R0-R1: Tone A period
        0x20, 0x02, // R2-R3: Tone B period
        0x30, 0x03, // R4-R5: Tone C period
        0x10, // R6: Noise period
        0x3E, // R7: Mixer
        0x0F, // R8: Tone A volume
        0x0C, // R9: Tone B volume
        0x08, // R10: Tone C volume
        0x00, 0x10, // R11-R12: Envelope period
        0x09, // R13: Envelope shape
        0x00, 0x00, // R14-R15: I/O ports
    ];

    c.bench_function("music_frame_882_samples", |b| {
        b.iter(|| {
            chip.load_registers(black_box(&frame_regs));

            // One 50 Hz frame at 44.1 kHz
            for _ in 0..882 {
                black_box(chip.process());
            }
        });
    });
}

fn bench_envelope_generation(c: &mut Criterion) {
    let mut chip = tone_chip(&PsgConfig::atari_st());
    chip.write(8, 0x10); // Volume controlled by envelope
    chip.write(11, 0x00); // Envelope period low
    chip.write(12, 0x10); // Envelope period high
    chip.write(13, 0x0E); // Envelope shape (triangle)

    c.bench_function("envelope_with_tone", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(chip.process());
            }
        });
    });
}

fn bench_noise_generation(c: &mut Criterion) {
    let mut chip = Psg::new(&PsgConfig::zx_spectrum()).unwrap();
    chip.write(6, 0x10); // Noise period
    chip.write(7, 0x07); // Noise on A, B, C
    chip.write(8, 0x0F);
    chip.write(9, 0x0F);
    chip.write(10, 0x0F);

    c.bench_function("noise_three_channels", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(chip.process());
            }
        });
    });
}

fn bench_expanded_mode(c: &mut Criterion) {
    let config = PsgConfig::ay8930(2_000_000);
    let mut chip = Psg::new(&config).unwrap();
    assert_eq!(chip.model(), ChipModel::Ay8930);
    chip.write(0x0D, 0xA0); // Expanded mode, bank A
    chip.write(0x00, 0x10);
    chip.write(0x01, 0x01);
    chip.write(0x07, 0x3F); // Tone and noise on for all channels
    chip.write(0x08, 0x3F);
    chip.write(0x09, 0x3F);
    chip.write(0x0A, 0x3F);
    chip.write(0x10, 0x40); // Envelope B period
    chip.write(0x14, 0x0E);
    chip.write(0x19, 0x55); // Noise AND mask

    c.bench_function("ay8930_expanded", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(chip.process());
            }
        });
    });
}

fn bench_dc_removal(c: &mut Criterion) {
    let mut chip = tone_chip(&PsgConfig::zx_spectrum());

    c.bench_function("process_remove_dc", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                chip.process();
                black_box(chip.remove_dc());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_process_iterations,
    bench_render,
    bench_register_updates,
    bench_music_frame,
    bench_envelope_generation,
    bench_noise_generation,
    bench_expanded_mode,
    bench_dc_removal
);
criterion_main!(benches);
