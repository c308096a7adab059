//! Machine configuration file reader.
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//!  5 3
//!  I      MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!  Beta   N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!  B      R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!              (RX) (SZ) (TV)
//! ```
//!
//! The first line is the alphabet. After it the file is a stream of
//! whitespace-separated tokens: the slot count, the pawl count, then one
//! `<name> <type> <cycles...>` group per rotor. A rotor's cycles are every
//! following token that starts with `(`, so cycles may wrap across lines
//! and may be written `(AB)(CD)` without a space.

use std::iter::Peekable;
use std::str::{FromStr, SplitWhitespace};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorCatalog};

/// Characters reserved by the configuration and settings syntax.
const RESERVED: [char; 3] = ['(', ')', '*'];

/// A parsed configuration file: everything needed to build a [`Machine`].
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    catalog: RotorCatalog,
}

impl MachineConfig {
    /// Parses the text of a configuration file.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] for a bad alphabet line, a missing
    ///   or non-numeric slot/pawl count, a truncated rotor description, an
    ///   unknown rotor type, a repeated rotor name or malformed cycles.
    /// - [`EnigmaError::Alphabet`] for a cycle or notch symbol outside the
    ///   alphabet, or a symbol repeated within one rotor's cycles.
    pub fn parse(text: &str) -> Result<Self> {
        let (first, rest) = match text.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (text, ""),
        };
        let alphabet = Arc::new(parse_alphabet(first.trim())?);

        let mut tokens = rest.split_whitespace().peekable();
        let num_rotors = parse_count(tokens.next(), "number of rotor slots")?;
        let pawls = parse_count(tokens.next(), "number of pawls")?;

        let mut catalog = RotorCatalog::new();
        while let Some(name) = tokens.next() {
            let rotor = read_rotor(&alphabet, name, &mut tokens)?;
            catalog.add(rotor)?;
        }

        debug!(
            alphabet = %alphabet,
            num_rotors,
            pawls,
            rotors = catalog.len(),
            "read machine configuration"
        );
        Ok(MachineConfig {
            alphabet,
            num_rotors,
            pawls,
            catalog,
        })
    }

    /// The configured alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls.
    pub fn pawls(&self) -> usize {
        self.pawls
    }

    /// Every rotor described in the file.
    pub fn catalog(&self) -> &RotorCatalog {
        &self.catalog
    }

    /// Builds a machine from this configuration. Call it again on a clone
    /// for an independent machine with its own rotor positions.
    ///
    /// # Errors
    /// See [`Machine::new`].
    pub fn into_machine(self) -> Result<Machine> {
        Machine::new(self.alphabet, self.num_rotors, self.pawls, self.catalog)
    }
}

impl FromStr for MachineConfig {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_alphabet(line: &str) -> Result<Alphabet> {
    if line.is_empty() {
        return Err(EnigmaError::config("configuration file truncated"));
    }
    if line.contains(&RESERVED[..]) || line.contains(char::is_whitespace) {
        return Err(EnigmaError::config(format!(
            "alphabet \"{}\" may not contain whitespace, '(', ')' or '*'",
            line
        )));
    }
    Alphabet::new(line)
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize> {
    let token = token.ok_or_else(|| EnigmaError::config("configuration file truncated"))?;
    token
        .parse()
        .map_err(|_| EnigmaError::config(format!("bad {}: \"{}\"", what, token)))
}

fn read_rotor(
    alphabet: &Arc<Alphabet>,
    name: &str,
    tokens: &mut Peekable<SplitWhitespace<'_>>,
) -> Result<Rotor> {
    if name.contains(&RESERVED[..]) {
        return Err(EnigmaError::config(format!("bad rotor name: {}", name)));
    }
    let kind = tokens
        .next()
        .ok_or_else(|| EnigmaError::config(format!("bad rotor description for {}", name)))?;

    let mut cycles = Vec::new();
    while let Some(token) = tokens.next_if(|t| t.starts_with('(')) {
        cycles.push(token);
    }
    let perm = Permutation::parse(alphabet.clone(), &cycles.join(" "))?;

    let mut chars = kind.chars();
    let code = chars.next().map(|c| c.to_ascii_uppercase());
    let notches = chars.as_str();
    match code {
        Some('M') => Rotor::moving(name, perm, notches),
        Some('N') if notches.is_empty() => Ok(Rotor::fixed(name, perm)),
        Some('R') if notches.is_empty() => {
            if !perm.derangement() {
                warn!(rotor = name, "reflector has a fixed point");
            }
            Ok(Rotor::reflector(name, perm))
        }
        _ => Err(EnigmaError::config(format!(
            "bad rotor type \"{}\" for {}",
            kind, name
        ))),
    }
}
