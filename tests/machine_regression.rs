//! Frozen-vector regression tests for the complete machine.
//!
//! Every expected ciphertext and rotor setting below was captured from a
//! reference run with the standard rotor set. Any change in output means the
//! stepping rule or the signal path changed.
//!
//! Coverage:
//! - `MachineConfig` + `Settings` + `Machine` end to end
//! - single and double stepping, multi-notch rotors
//! - plugboard and reflector variants
//! - `stream::process` line handling
//! - error propagation (`Configuration`, `Alphabet`)

use enigma::{stream, EnigmaError, Machine, MachineConfig, Settings};

const STANDARD: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ
 5 3
 I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 V MZ      (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
 VI MZM    (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
 VII MZM   (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
 VIII MZM  (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
 BETA N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 GAMMA N   (AFNIRLBSQWVXGUZDKMTPCOYJHE)
 B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
           (RX) (SZ) (TV)
 C R       (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW)
           (QZ) (SX) (UY)
";

fn machine_with(settings: &str) -> Machine {
    let mut machine = MachineConfig::parse(STANDARD)
        .unwrap()
        .into_machine()
        .unwrap();
    Settings::parse(settings, machine.num_rotors())
        .unwrap()
        .apply(&mut machine)
        .unwrap();
    machine
}

// ═══════════════════════════════════════════════════════════════════════
// Known ciphertexts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn hello_axle_known_ciphertext() {
    let mut machine = machine_with("* B BETA III IV I AXLE");
    assert_eq!(machine.convert("HELLO").unwrap(), "FHVGJ");
    assert_eq!(machine.setting(), "AXLJ");
}

#[test]
fn hello_axle_decrypts_after_reset() {
    let mut machine = machine_with("* B BETA III IV I AXLE");
    let cipher = machine.convert("HELLO").unwrap();
    machine.set_rotors("AXLE").unwrap();
    assert_eq!(machine.convert(&cipher).unwrap(), "HELLO");
}

#[test]
fn hiawatha_with_plugboard() {
    let mut machine = machine_with("* B BETA III IV I AXLE (HQ) (EX) (IP) (TR) (BY)");
    assert_eq!(
        machine.convert("FROM HIS SHOULDER HIAWATHA").unwrap(),
        "QVPQSOKOILPUBKJZPISFXDW"
    );
    assert_eq!(machine.setting(), "AXMB");
}

#[test]
fn repeated_key_never_repeats_output_symbol() {
    let mut machine = machine_with("* B BETA III IV I AAAA");
    let cipher = machine.convert("AAAAAAAAAA").unwrap();
    assert_eq!(cipher, "LQFPIWKPCJ");
    // A reflector-based machine never maps a symbol to itself.
    assert!(!cipher.contains('A'));
}

#[test]
fn long_message_passes_turnovers() {
    let mut machine = machine_with("* B BETA III IV I AXLE");
    let cipher = machine.convert(&"HELLOWORLD".repeat(10)).unwrap();
    assert_eq!(
        cipher,
        "FHVGJZUKSGTCKZVODEJVGNFVQYLSZSMPGNFKZYDBYNCZGEUCRGTTQPLMUZKWNBEIFYGVKMKZTMELYGKLFCYDFVTTUQIFHTXNXSQK"
    );
    assert_eq!(machine.setting(), "AXPA");
}

#[test]
fn multi_notch_rotors_and_reflector_c() {
    let mut machine = machine_with("* C GAMMA VI VII VIII ZMZL (AB) (CD)");
    assert_eq!(
        machine.convert("THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG").unwrap(),
        "AECMYSKVTLKJSKAJRNEWFHCFJRTUQBWVUJZ"
    );
    assert_eq!(machine.setting(), "ZNDU");
}

#[test]
fn sixty_keypresses_from_zero() {
    let mut machine = machine_with("* B BETA II V I AAAA");
    assert_eq!(
        machine.convert(&"A".repeat(60)).unwrap(),
        "LKSFEKKPQPELHGLOQCBJFLBZILLJPQDIKPSPTKHPNMPCMCCSLOSHNOSXINTS"
    );
    assert_eq!(machine.setting(), "AACI");
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping
// ═══════════════════════════════════════════════════════════════════════

fn trace(machine: &mut Machine, keys: usize) -> Vec<String> {
    (0..keys)
        .map(|_| {
            machine.convert_index(0).unwrap();
            machine.setting()
        })
        .collect()
}

#[test]
fn middle_rotor_double_steps() {
    let mut machine = machine_with("* B BETA III IV I AXIQ");
    assert_eq!(trace(&mut machine, 3), ["AXJR", "AYKS", "AYKT"]);
}

#[test]
fn notch_steps_self_and_left_neighbour_together() {
    // V sits on its notch Z and I on its notch Q: II, V and I all move.
    let mut machine = machine_with("* B BETA II V I AEZQ");
    assert_eq!(trace(&mut machine, 3), ["AFAR", "AFAS", "AFAT"]);
}

#[test]
fn fixed_and_reflector_never_move() {
    let mut machine = machine_with("* B BETA III IV I QVJQ");
    for _ in 0..200 {
        machine.convert_index(3).unwrap();
        assert_eq!(machine.rotor(0).unwrap().position(), 0);
        assert_eq!(machine.rotor(1).unwrap().setting(), 'Q');
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Self-inverse property
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn every_rotor_order_is_self_inverse() {
    let orders = [
        "* B BETA I II III ABCD",
        "* C GAMMA IV V VI ZZZZ (QW) (ER) (TY)",
        "* B GAMMA VIII VII VI MZMZ (AZ) (BY) (CX) (DW)",
        "* C BETA V III I QEVJ",
    ];
    let plain = "ATTACKATDAWNONTHEEASTERNFLANKWITHALLAVAILABLEUNITS";
    for settings in orders {
        let mut machine = machine_with(settings);
        let cipher = machine.convert(plain).unwrap();
        assert_ne!(cipher, plain, "no substitution for {}", settings);
        let mut machine = machine_with(settings);
        assert_eq!(
            machine.convert(&cipher).unwrap(),
            plain,
            "round trip failed for {}",
            settings
        );
    }
}

#[test]
fn cloned_configuration_builds_independent_machines() {
    let conf = MachineConfig::parse(STANDARD).unwrap();
    let settings = Settings::parse("* B BETA III IV I AXLE", 5).unwrap();
    let mut first = conf.clone().into_machine().unwrap();
    let mut second = conf.into_machine().unwrap();
    settings.apply(&mut first).unwrap();
    settings.apply(&mut second).unwrap();
    first.convert("HELLOWORLD").unwrap();
    assert_eq!(second.setting(), "AXLE");
    assert_eq!(second.convert("HELLO").unwrap(), "FHVGJ");
}

// ═══════════════════════════════════════════════════════════════════════
// Message stream
// ═══════════════════════════════════════════════════════════════════════

fn run_stream(input: &str) -> (Result<(), EnigmaError>, String) {
    let mut machine = MachineConfig::parse(STANDARD)
        .unwrap()
        .into_machine()
        .unwrap();
    let mut out = Vec::new();
    let result = stream::process(&mut machine, input.as_bytes(), &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn stream_groups_and_blank_lines() {
    let input = "* B BETA III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
FROM HIS SHOULDER HIAWATHA

* B BETA III IV I AXLE
HELLO
";
    let (result, out) = run_stream(input);
    result.unwrap();
    assert_eq!(out, "QVPQS OKOIL PUBKJ ZPISF XDW\n\nFHVGJ\n");
}

#[test]
fn stream_stops_at_symbol_outside_alphabet() {
    let input = "* B BETA III IV I AXLE\nHELLO\nHELL0 WORLD\nHELLO\n";
    let (result, out) = run_stream(input);
    assert!(matches!(result, Err(EnigmaError::Alphabet('0', _))));
    assert_eq!(out, "FHVGJ\n");
}

#[test]
fn stream_rejects_bad_settings() {
    for settings in [
        "* B BETA III IV X AXLE",
        "* B BETA III III I AXLE",
        "* B BETA III IV I AXL",
        "* BETA B III IV I AXLE",
    ] {
        let (result, out) = run_stream(&format!("{}\nHELLO\n", settings));
        assert!(
            matches!(result, Err(EnigmaError::Configuration(_))),
            "expected configuration error for {}",
            settings
        );
        assert!(out.is_empty());
    }
}
