//! Machine: slot list of rotors plus a plugboard.
//!
//! Each keypress first steps the rotors, then sends the signal through the
//! plugboard, right-to-left through every slot down to the reflector, back
//! left-to-right through slots 1.., and out through the plugboard inverse.
//!
//! ```text
//!  in ─▶ plugboard ─▶ slot N-1 ─▶ … ─▶ slot 1 ─▶ slot 0 (reflector)
//!                                                    │
//! out ◀─ plugboard⁻¹ ◀─ slot N-1 ◀─ … ◀─ slot 1 ◀────┘
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorCatalog, RotorId};

/// A configured rotor machine.
///
/// The machine owns its [`RotorCatalog`]; slots hold [`RotorId`]s into it.
/// Rotor positions change on every converted symbol, so output depends on
/// the whole conversion history since the last [`set_rotors`](Self::set_rotors).
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    pawls: usize,
    catalog: RotorCatalog,
    slots: Vec<RotorId>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots, of which the rightmost
    /// `pawls` hold moving rotors, drawing rotors from `catalog`.
    ///
    /// The plugboard starts as the identity and no rotors are inserted.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `num_rotors < 2`,
    /// `pawls >= num_rotors`, the catalog holds fewer than `num_rotors`
    /// rotors, or a catalog rotor uses another alphabet.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        pawls: usize,
        catalog: RotorCatalog,
    ) -> Result<Self> {
        if num_rotors < 2 {
            return Err(EnigmaError::config(format!(
                "a machine needs at least 2 rotor slots, got {}",
                num_rotors
            )));
        }
        if pawls >= num_rotors {
            return Err(EnigmaError::config(format!(
                "pawls ({}) must be fewer than rotor slots ({})",
                pawls, num_rotors
            )));
        }
        if num_rotors > catalog.len() {
            return Err(EnigmaError::config(format!(
                "{} rotor slots but only {} rotors defined",
                num_rotors,
                catalog.len()
            )));
        }
        if let Some(r) = catalog.iter().find(|r| r.alphabet() != &alphabet) {
            return Err(EnigmaError::config(format!(
                "rotor {} uses a different alphabet",
                r.name()
            )));
        }
        let plugboard = Permutation::identity(alphabet.clone());
        Ok(Machine {
            alphabet,
            num_rotors,
            pawls,
            catalog,
            slots: Vec::with_capacity(num_rotors),
            plugboard,
        })
    }

    /// Number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls, and so of moving rotors.
    pub fn num_pawls(&self) -> usize {
        self.pawls
    }

    /// The machine's alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// All rotors available to this machine.
    pub fn catalog(&self) -> &RotorCatalog {
        &self.catalog
    }

    /// The current plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// The rotor in `slot`, if rotors are inserted and `slot` is in range.
    pub fn rotor(&self, slot: usize) -> Option<&Rotor> {
        self.slots.get(slot).map(|&id| self.catalog.get(id))
    }

    /// Names of the inserted rotors, reflector first.
    pub fn rotor_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|&id| self.catalog.get(id).name())
            .collect()
    }

    /// Current positions of slots `1..`, as symbols, left to right.
    pub fn setting(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .map(|&id| self.catalog.get(id).setting())
            .collect()
    }

    /// Empties every slot.
    pub fn clear_rotors(&mut self) {
        self.slots.clear();
    }

    /// Fills the slots with the rotors named in `names`, reflector first.
    /// Every inserted rotor starts at position 0.
    ///
    /// The previous slot contents are replaced only if the whole list is valid.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if
    /// - `names` does not hold exactly `num_rotors()` names,
    /// - a name is unknown or repeated,
    /// - slot 0 is not a reflector, or a reflector appears in another slot,
    /// - a pawl slot (the rightmost `num_pawls()`) holds a non-moving rotor,
    ///   or a moving rotor sits outside the pawl slots.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::config(format!(
                "expected {} rotors, got {}",
                self.num_rotors,
                names.len()
            )));
        }
        let first_pawl = self.num_rotors - self.pawls;
        let mut slots = Vec::with_capacity(self.num_rotors);

        for (slot, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let id = self
                .catalog
                .find(name)
                .ok_or_else(|| EnigmaError::config(format!("bad rotor name: {}", name)))?;
            if slots.contains(&id) {
                return Err(EnigmaError::config(format!("duplicate rotor name: {}", name)));
            }
            let rotor = self.catalog.get(id);
            if slot == 0 && !rotor.reflecting() {
                return Err(EnigmaError::config(format!(
                    "first rotor must be a reflector, {} is not",
                    name
                )));
            }
            if slot > 0 && rotor.reflecting() {
                return Err(EnigmaError::config(format!(
                    "reflector {} can only go in the first slot",
                    name
                )));
            }
            if slot >= first_pawl && !rotor.rotates() {
                return Err(EnigmaError::config(format!(
                    "slot {} needs a moving rotor, {} does not rotate",
                    slot, name
                )));
            }
            if slot > 0 && slot < first_pawl && rotor.rotates() {
                return Err(EnigmaError::config(format!(
                    "moving rotor {} cannot go in non-moving slot {}",
                    name, slot
                )));
            }
            slots.push(id);
        }

        for &id in &slots {
            self.catalog.get_mut(id).set(0)?;
        }
        self.slots = slots;
        debug!(rotors = ?self.rotor_names(), "inserted rotors");
        Ok(())
    }

    /// Sets the positions of slots `1..` from `setting`, one symbol per slot,
    /// left to right.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] if no rotors are inserted or
    ///   `setting` does not have `num_rotors() - 1` symbols.
    /// - [`EnigmaError::Alphabet`] if a symbol is not in the alphabet.
    ///
    /// No position changes unless the whole setting is valid.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        self.ensure_rotors()?;
        let positions = setting
            .chars()
            .map(|ch| self.alphabet.to_index(ch))
            .collect::<Result<Vec<usize>>>()?;
        if positions.len() != self.num_rotors - 1 {
            return Err(EnigmaError::config(format!(
                "rotor setting \"{}\" has wrong length, expected {}",
                setting,
                self.num_rotors - 1
            )));
        }
        for (&id, &posn) in self.slots.iter().skip(1).zip(&positions) {
            self.catalog.get_mut(id).set(posn)?;
        }
        debug!(setting, "set rotors");
        Ok(())
    }

    /// Replaces the plugboard.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `plugboard` uses a
    /// different alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        if plugboard.alphabet() != &self.alphabet {
            return Err(EnigmaError::config(
                "plugboard alphabet does not match the machine's",
            ));
        }
        debug!(plugboard = %plugboard, "set plugboard");
        self.plugboard = plugboard;
        Ok(())
    }

    /// Converts the symbol with index `c`, stepping the rotors first.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if no rotors are inserted or
    /// `c` is not a valid index.
    pub fn convert_index(&mut self, c: usize) -> Result<usize> {
        self.ensure_rotors()?;
        if c >= self.alphabet.size() {
            return Err(EnigmaError::config(format!(
                "index {} out of range for alphabet of size {}",
                c,
                self.alphabet.size()
            )));
        }
        self.step()?;

        let mut signal = self.plugboard.permute(c);
        for &id in self.slots.iter().rev() {
            signal = self.catalog.get(id).convert_forward(signal);
        }
        for &id in &self.slots[1..] {
            signal = self.catalog.get(id).convert_backward(signal)?;
        }
        let out = self.plugboard.invert(signal);
        trace!(input = c, output = out, setting = %self.setting(), "converted");
        Ok(out)
    }

    /// Converts every symbol of `msg`, ignoring whitespace.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] on the first symbol outside the
    /// alphabet. The message is checked before any rotor moves, so a
    /// rejected message leaves the machine untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Machine, Permutation, Rotor, RotorCatalog};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let mut catalog = RotorCatalog::new();
    /// catalog.add(Rotor::reflector("R", Permutation::parse(alpha.clone(), "(AC) (BD)").unwrap())).unwrap();
    /// catalog.add(Rotor::moving("M", Permutation::parse(alpha.clone(), "(ABCD)").unwrap(), "A").unwrap()).unwrap();
    ///
    /// let mut machine = Machine::new(alpha, 2, 1, catalog).unwrap();
    /// machine.insert_rotors(&["R", "M"]).unwrap();
    /// machine.set_rotors("A").unwrap();
    /// let cipher = machine.convert("AB CD").unwrap();
    ///
    /// machine.set_rotors("A").unwrap();
    /// assert_eq!(machine.convert(&cipher).unwrap(), "ABCD");
    /// ```
    pub fn convert(&mut self, msg: &str) -> Result<String> {
        let indices = msg
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| self.alphabet.to_index(ch))
            .collect::<Result<Vec<usize>>>()?;
        let mut out = String::with_capacity(indices.len());
        for c in indices {
            let e = self.convert_index(c)?;
            out.push(self.alphabet.to_char(e)?);
        }
        Ok(out)
    }

    /// Advances the rotors for one keypress.
    ///
    /// Which rotors move is decided from the positions before this keypress.
    /// The rightmost rotor always moves. A pawl slot moves when its right
    /// neighbour is at a notch, and that neighbour moves with it, which is
    /// what makes a middle rotor step twice in a row.
    fn step(&mut self) -> Result<()> {
        let n = self.num_rotors;
        let mut moves = vec![false; n];
        moves[n - 1] = true;
        for (slot, pair) in self.slots.windows(2).enumerate().skip(n - self.pawls) {
            let left = self.catalog.get(pair[0]);
            let right = self.catalog.get(pair[1]);
            if right.at_notch() && left.rotates() {
                moves[slot] = true;
                moves[slot + 1] = true;
            }
        }
        for (slot, &moving) in moves.iter().enumerate() {
            let rotor = self.catalog.get_mut(self.slots[slot]);
            if moving && rotor.rotates() {
                rotor.advance()?;
            }
        }
        Ok(())
    }

    fn ensure_rotors(&self) -> Result<()> {
        if self.slots.len() != self.num_rotors {
            return Err(EnigmaError::config("rotors have not been inserted"));
        }
        Ok(())
    }
}
