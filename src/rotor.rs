//! Rotor: a rotatable substitution wheel wrapping a [`Permutation`].
//!
//! Three kinds share one struct and differ only in capabilities:
//!
//! | Kind        | rotates | notches | backward pass | position         |
//! |-------------|---------|---------|---------------|------------------|
//! | `Moving`    | yes     | ≥ 1     | yes           | any, advances    |
//! | `Fixed`     | no      | none    | yes           | settable, static |
//! | `Reflector` | no      | none    | no            | always 0         |
//!
//! The machine only ever asks for capabilities ([`Rotor::rotates`],
//! [`Rotor::at_notch`], [`Rotor::supports_backward`]); it never matches on
//! the kind itself.
//!
//! Rotors live in a [`RotorCatalog`] arena and machine slots hold
//! [`RotorId`]s into it.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// The closed set of rotor kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Rotates; steps its left neighbour when at one of `notches` (indices).
    Moving { notches: Vec<usize> },
    /// Never rotates, but its position can be set.
    Fixed,
    /// Never rotates, position 0, forward pass only.
    Reflector,
}

/// A named rotor with a wiring permutation and a current position.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    position: usize,
}

impl Rotor {
    /// Creates a moving rotor that steps its left neighbour at any of the
    /// symbols in `notches`.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] if `notches` is empty.
    /// - [`EnigmaError::Alphabet`] if a notch is not in the permutation's alphabet.
    pub fn moving(name: impl Into<String>, permutation: Permutation, notches: &str) -> Result<Self> {
        let name = name.into();
        if notches.is_empty() {
            return Err(EnigmaError::config(format!(
                "moving rotor {} has no notches",
                name
            )));
        }
        let alphabet = permutation.alphabet().clone();
        let mut indices = notches
            .chars()
            .map(|ch| alphabet.to_index(ch))
            .collect::<Result<Vec<usize>>>()?;
        indices.sort_unstable();
        indices.dedup();
        Ok(Rotor {
            name,
            permutation,
            kind: RotorKind::Moving { notches: indices },
            position: 0,
        })
    }

    /// Creates a non-rotating rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            permutation,
            kind: RotorKind::Fixed,
            position: 0,
        }
    }

    /// Creates a reflector.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            permutation,
            kind: RotorKind::Reflector,
            position: 0,
        }
    }

    /// The rotor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rotor's kind.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// The wiring permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// The alphabet of the wiring.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Alphabet size.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// True iff this rotor can advance.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// True iff this rotor turns the signal back through the stack.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// True iff the signal may traverse this rotor right-to-left on its way out.
    pub fn supports_backward(&self) -> bool {
        !self.reflecting()
    }

    /// Notch indices; empty for non-rotating rotors.
    pub fn notches(&self) -> &[usize] {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            RotorKind::Fixed | RotorKind::Reflector => &[],
        }
    }

    /// Current position in `[0, size)`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The symbol shown at the current position.
    pub fn setting(&self) -> char {
        self.alphabet().symbols()[self.position]
    }

    /// Sets the position to `posn` (taken modulo `size()`).
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] for a reflector and any
    /// position other than 0.
    pub fn set(&mut self, posn: usize) -> Result<()> {
        let posn = posn % self.size();
        if self.reflecting() && posn != 0 {
            return Err(EnigmaError::config(format!(
                "reflector {} has only one position",
                self.name
            )));
        }
        self.position = posn;
        Ok(())
    }

    /// Sets the position to the index of symbol `cposn`.
    ///
    /// # Errors
    /// [`EnigmaError::Alphabet`] if `cposn` is not in the alphabet, plus the
    /// errors of [`set`](Self::set).
    pub fn set_symbol(&mut self, cposn: char) -> Result<()> {
        let posn = self.alphabet().to_index(cposn)?;
        self.set(posn)
    }

    /// Advances one position with wraparound.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if the rotor does not rotate;
    /// its position is left untouched.
    pub fn advance(&mut self) -> Result<()> {
        if !self.rotates() {
            return Err(EnigmaError::config(format!(
                "rotor {} does not rotate",
                self.name
            )));
        }
        self.position = (self.position + 1) % self.size();
        Ok(())
    }

    /// True iff the symbol at the current position is one of the notches.
    pub fn at_notch(&self) -> bool {
        self.notches().contains(&self.position)
    }

    /// Signal entering on the right at contact `p` leaves on the left at
    /// `permute(p + position) - position`, all modulo `size()`.
    pub fn convert_forward(&self, p: usize) -> usize {
        let size = self.size();
        let contact = self.permutation.permute((p % size + self.position) % size);
        (contact + size - self.position) % size
    }

    /// Signal entering on the left at contact `e` leaves on the right at
    /// `invert(e + position) - position`, all modulo `size()`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] for a reflector.
    pub fn convert_backward(&self, e: usize) -> Result<usize> {
        if !self.supports_backward() {
            return Err(EnigmaError::config(format!(
                "reflector {} has no backward pass",
                self.name
            )));
        }
        let size = self.size();
        let contact = self.permutation.invert((e % size + self.position) % size);
        Ok((contact + size - self.position) % size)
    }
}

/// Identifier of a rotor within a [`RotorCatalog`].
///
/// Ids are only issued by [`RotorCatalog::add`] and [`RotorCatalog::find`]:
///
/// ```compile_fail
/// let id = enigma::RotorId(7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub(crate) usize);

/// Arena of the rotors available to a machine, addressed by [`RotorId`].
///
/// Machine slots refer to catalog entries by id, so slot order and rotor
/// storage are independent. Names are unique within a catalog.
#[derive(Debug, Clone, Default)]
pub struct RotorCatalog {
    rotors: Vec<Rotor>,
}

impl RotorCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        RotorCatalog { rotors: Vec::new() }
    }

    /// Adds `rotor` and returns its id.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if a rotor with the same name
    /// is already present.
    pub fn add(&mut self, rotor: Rotor) -> Result<RotorId> {
        if self.find(rotor.name()).is_some() {
            return Err(EnigmaError::config(format!(
                "rotor {} defined twice",
                rotor.name()
            )));
        }
        let id = RotorId(self.rotors.len());
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Looks up a rotor by exact name.
    pub fn find(&self, name: &str) -> Option<RotorId> {
        self.rotors
            .iter()
            .position(|r| r.name() == name)
            .map(RotorId)
    }

    /// Returns the rotor with `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    /// Mutable access to the rotor with `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    pub fn get_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }

    /// Number of rotors.
    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    /// True if the catalog holds no rotors.
    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Iterates over the rotors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rotor> {
        self.rotors.iter()
    }
}
