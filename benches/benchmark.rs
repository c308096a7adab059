//! Benchmarks for rotor machine operations.
//!
//! Measures configuration parsing, per-symbol conversion throughput with the
//! standard five-slot layout, and conversion cost as the slot count grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma::{Machine, MachineConfig, Settings};

/// Moving rotors available to the slot-scaling benchmark, in insertion order.
const MOVING: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

const ROTORS: &str = " I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 V MZ      (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
 VI MZM    (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
 VII MZM   (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
 VIII MZM  (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
 BETA N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
";

/// Message length used by the throughput benchmarks.
const MESSAGE_LEN: usize = 1024;

fn config_text(num_rotors: usize, pawls: usize) -> String {
    format!(
        "ABCDEFGHIJKLMNOPQRSTUVWXYZ\n {} {}\n{}",
        num_rotors, pawls, ROTORS
    )
}

fn message() -> String {
    "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG"
        .chars()
        .cycle()
        .take(MESSAGE_LEN)
        .collect()
}

/// A machine with the reflector and `num_rotors - 1` moving rotors, all
/// driven by pawls.
fn scaled_machine(num_rotors: usize) -> (Machine, Settings) {
    let moving = &MOVING[..num_rotors - 1];
    let mut machine = MachineConfig::parse(&config_text(num_rotors, num_rotors - 1))
        .unwrap()
        .into_machine()
        .unwrap();
    let line = format!("* B {} {}", moving.join(" "), "A".repeat(moving.len()));
    let settings = Settings::parse(&line, num_rotors).unwrap();
    settings.apply(&mut machine).unwrap();
    (machine, settings)
}

/// Benchmarks `MachineConfig::parse()` on the full standard rotor set.
fn bench_config_parse(c: &mut Criterion) {
    let text = config_text(5, 3);
    c.bench_function("config_parse", |b| {
        b.iter(|| MachineConfig::parse(black_box(&text)).unwrap());
    });
}

/// Benchmarks `Machine::convert()` throughput in the standard layout.
///
/// Rotors are reset before each iteration so every run sees the same
/// stepping pattern.
fn bench_convert(c: &mut Criterion) {
    let mut machine = MachineConfig::parse(&config_text(5, 3))
        .unwrap()
        .into_machine()
        .unwrap();
    let settings =
        Settings::parse("* B BETA III IV I AXLE (HQ) (EX) (IP) (TR) (BY)", 5).unwrap();
    settings.apply(&mut machine).unwrap();
    let msg = message();

    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Elements(MESSAGE_LEN as u64));
    group.bench_function("5_slots", |b| {
        b.iter(|| {
            machine.set_rotors("AXLE").unwrap();
            machine.convert(black_box(&msg)).unwrap()
        });
    });
    group.finish();
}

/// Benchmarks `Machine::convert()` across different slot counts.
///
/// Every slot beyond the reflector holds a moving rotor, so both the
/// stepping check and the two substitution passes grow with the count.
fn bench_convert_slot_scaling(c: &mut Criterion) {
    let slot_counts: &[usize] = &[2, 5, 9];
    let msg = message();

    let mut group = c.benchmark_group("convert_slot_scaling");
    group.throughput(Throughput::Elements(MESSAGE_LEN as u64));

    for &num_rotors in slot_counts {
        let (mut machine, settings) = scaled_machine(num_rotors);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_rotors),
            &num_rotors,
            |b, _| {
                b.iter(|| {
                    machine.set_rotors(settings.positions()).unwrap();
                    machine.convert(black_box(&msg)).unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_config_parse,
    bench_convert,
    bench_convert_slot_scaling,
);
criterion_main!(benches);
