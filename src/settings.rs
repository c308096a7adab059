//! Settings line: `* <reflector> <rotor>... <setting> [<plugboard cycles>]`.

use tracing::debug;

use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;

/// A parsed settings line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    rotors: Vec<String>,
    positions: String,
    plugboard: String,
}

impl Settings {
    /// Parses `line` for a machine with `num_rotors` slots.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if the line does not start
    /// with a `*` token, names fewer than `num_rotors` rotors, or has no
    /// rotor setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Settings;
    ///
    /// let s = Settings::parse("* B BETA III IV I AXLE (HQ) (EX)", 5).unwrap();
    /// assert_eq!(s.rotors(), ["B", "BETA", "III", "IV", "I"]);
    /// assert_eq!(s.positions(), "AXLE");
    /// assert_eq!(s.plugboard(), "(HQ) (EX)");
    /// ```
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("*") {
            return Err(EnigmaError::config(format!(
                "settings line must start with '*': \"{}\"",
                line
            )));
        }
        let rotors: Vec<String> = tokens.by_ref().take(num_rotors).map(String::from).collect();
        if rotors.len() < num_rotors {
            return Err(EnigmaError::config(format!(
                "settings line names {} rotors, expected {}",
                rotors.len(),
                num_rotors
            )));
        }
        let positions = match tokens.next() {
            Some(token) if !token.starts_with('(') => token.to_string(),
            _ => {
                return Err(EnigmaError::config(format!(
                    "settings line has no rotor setting: \"{}\"",
                    line
                )))
            }
        };
        let plugboard = tokens.collect::<Vec<_>>().join(" ");
        Ok(Settings {
            rotors,
            positions,
            plugboard,
        })
    }

    /// Rotor names, reflector first.
    pub fn rotors(&self) -> &[String] {
        &self.rotors
    }

    /// Initial positions of slots `1..`.
    pub fn positions(&self) -> &str {
        &self.positions
    }

    /// Plugboard cycles, possibly empty.
    pub fn plugboard(&self) -> &str {
        &self.plugboard
    }

    /// Clears `machine`'s slots, inserts the named rotors, sets their
    /// positions and installs the plugboard.
    ///
    /// # Errors
    /// Any error of [`Machine::insert_rotors`], [`Machine::set_rotors`],
    /// [`Permutation::parse`] or [`Machine::set_plugboard`].
    pub fn apply(&self, machine: &mut Machine) -> Result<()> {
        machine.clear_rotors();
        machine.insert_rotors(self.rotors.as_slice())?;
        machine.set_rotors(&self.positions)?;
        let plugboard = Permutation::parse(machine.alphabet().clone(), &self.plugboard)?;
        machine.set_plugboard(plugboard)?;
        debug!(rotors = ?self.rotors, setting = %self.positions, "applied settings");
        Ok(())
    }
}
