//! Rotor cipher machine simulator.
//!
//! A stack of substitution rotors, a reflector and a plugboard implementing
//! a stateful, self-inverse, per-symbol substitution cipher, including the
//! double-stepping of the middle rotor.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbols <-> dense indices, shared behind Arc)
//!     ↓
//! Permutation  (cycle notation, precomputed forward/inverse tables)
//!     ↓
//! Rotor        (Moving / Fixed / Reflector, position + notches)
//!     ↓ stored in a RotorCatalog, referenced by RotorId
//! Machine      (slots + plugboard: stepping, then the two-pass transform)
//! ```
//!
//! [`MachineConfig`], [`Settings`] and [`stream`] read the text formats that
//! describe a machine and its messages.
//!
//! # Examples
//!
//! ```
//! use enigma::{MachineConfig, Settings};
//!
//! let conf = "ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!  5 3
//!  I MQ    (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!  III MV  (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!  IV MJ   (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//!  Beta N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!  B R     (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";
//!
//! let mut machine = MachineConfig::parse(conf).unwrap().into_machine().unwrap();
//! let settings = Settings::parse("* B Beta III IV I AXLE", 5).unwrap();
//!
//! settings.apply(&mut machine).unwrap();
//! let cipher = machine.convert("HELLO").unwrap();
//! assert_eq!(cipher, "FHVGJ");
//!
//! settings.apply(&mut machine).unwrap();
//! assert_eq!(machine.convert(&cipher).unwrap(), "HELLO");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod settings;
pub mod stream;

pub use alphabet::Alphabet;
pub use config::MachineConfig;
pub use error::{EnigmaError, Result, SymbolFault};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorCatalog, RotorId, RotorKind};
pub use settings::Settings;
