//! Alphabet: bidirectional mapping between symbols and dense indices.

use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result, SymbolFault};

/// Symbols of the default alphabet.
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of distinct symbols. The symbol at position `k` has index `k`.
///
/// Immutable once built. Permutations, rotors and machines share one instance
/// behind an `Arc` rather than copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates an alphabet from the characters of `symbols`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `symbols` is empty or
    /// contains the same character twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert_eq!(alpha.to_index('C').unwrap(), 2);
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(EnigmaError::config("alphabet is empty"));
        }
        let symbols: Vec<char> = symbols.chars().collect();
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &ch) in symbols.iter().enumerate() {
            if index.insert(ch, i).is_some() {
                return Err(EnigmaError::config(format!(
                    "duplicate character '{}' in alphabet",
                    ch
                )));
            }
        }
        Ok(Alphabet { symbols, index })
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `ch` is a member of this alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Returns the index of `ch`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `ch` is not a member.
    pub fn to_index(&self, ch: char) -> Result<usize> {
        self.index
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::Alphabet(ch, SymbolFault::NotInAlphabet))
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char> {
        self.symbols.get(index).copied().ok_or_else(|| {
            EnigmaError::config(format!(
                "index {} out of range for alphabet of size {}",
                index,
                self.size()
            ))
        })
    }

    /// Symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = UPPER.chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, index }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.symbols {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
