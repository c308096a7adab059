//! Permutation: a bijection over alphabet indices given in cycle notation.
//!
//! The cycles are walked once at construction to fill a forward and an
//! inverse lookup table, so [`Permutation::permute`] and
//! [`Permutation::invert`] are single array reads.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result, SymbolFault};

/// A permutation of `[0, size)` defined by disjoint cycles over an alphabet.
///
/// Symbols that appear in no cycle are fixed points.
#[derive(Debug, Clone)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    cycles: Vec<Vec<usize>>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Builds a permutation from cycles, each given as the string of its
    /// symbols in order (`"ABC"` means A→B→C→A).
    ///
    /// # Errors
    /// - [`EnigmaError::Alphabet`] if a cycle holds a symbol outside `alphabet`,
    ///   or a symbol appears more than once across the cycles.
    /// - [`EnigmaError::Configuration`] if a cycle is empty.
    pub fn from_cycles<I, S>(alphabet: Arc<Alphabet>, cycles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut inverse: Vec<usize> = (0..size).collect();
        let mut seen = vec![false; size];
        let mut parsed = Vec::new();

        for cycle in cycles {
            let cycle = cycle.as_ref();
            if cycle.is_empty() {
                return Err(EnigmaError::config("empty cycle in permutation"));
            }
            let mut indices = Vec::with_capacity(cycle.len());
            for ch in cycle.chars() {
                let idx = alphabet.to_index(ch)?;
                if seen[idx] {
                    return Err(EnigmaError::Alphabet(ch, SymbolFault::Repeated));
                }
                seen[idx] = true;
                indices.push(idx);
            }
            let len = indices.len();
            for (i, &from) in indices.iter().enumerate() {
                let to = indices[(i + 1) % len];
                forward[from] = to;
                inverse[to] = from;
            }
            parsed.push(indices);
        }

        Ok(Permutation {
            alphabet,
            cycles: parsed,
            forward,
            inverse,
        })
    }

    /// Parses cycle notation such as `"(AELT) (BKNW)(CMOY)"`.
    ///
    /// Whitespace between cycles, including newlines, is ignored, and a
    /// cycle may close and the next open without a space between them.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Configuration`] on unbalanced or nested
    /// parentheses, text outside a cycle or whitespace inside one, plus the
    /// errors of [`from_cycles`](Self::from_cycles).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCHZ").unwrap());
    /// let perm = Permutation::parse(alpha, "(ZACH) (B)").unwrap();
    /// assert_eq!(perm.permute_symbol('Z').unwrap(), 'A');
    /// assert_eq!(perm.invert_symbol('Z').unwrap(), 'H');
    /// assert_eq!(perm.permute_symbol('B').unwrap(), 'B');
    /// ```
    pub fn parse(alphabet: Arc<Alphabet>, spec: &str) -> Result<Self> {
        let cycles = parse_cycles(spec)?;
        Self::from_cycles(alphabet, cycles)
    }

    /// The identity permutation over `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            cycles: Vec::new(),
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
        }
    }

    /// Size of the underlying alphabet.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// The alphabet this permutation is defined over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// The cycles, as index sequences, in declaration order.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// Applies the permutation to index `p` (taken modulo `size()`).
    pub fn permute(&self, p: usize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Applies the inverse permutation to index `c` (taken modulo `size()`).
    pub fn invert(&self, c: usize) -> usize {
        self.inverse[self.wrap(c)]
    }

    /// Applies the permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `p` is not in the alphabet.
    pub fn permute_symbol(&self, p: char) -> Result<char> {
        let idx = self.alphabet.to_index(p)?;
        self.alphabet.to_char(self.permute(idx))
    }

    /// Applies the inverse permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Alphabet`] if `c` is not in the alphabet.
    pub fn invert_symbol(&self, c: char) -> Result<char> {
        let idx = self.alphabet.to_index(c)?;
        self.alphabet.to_char(self.invert(idx))
    }

    /// True iff every declared cycle has length at least 2.
    ///
    /// Symbols left out of every cycle are not checked, so a permutation
    /// with uncovered fixed points still reports `true`.
    pub fn derangement(&self) -> bool {
        self.cycles.iter().all(|cycle| cycle.len() >= 2)
    }

    fn wrap(&self, p: usize) -> usize {
        p % self.size()
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.alphabet.symbols();
        for (n, cycle) in self.cycles.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "(")?;
            for &idx in cycle {
                write!(f, "{}", symbols[idx])?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Splits cycle notation into the symbol strings of its cycles.
fn parse_cycles(spec: &str) -> Result<Vec<String>> {
    let mut cycles = Vec::new();
    let mut current: Option<String> = None;

    for ch in spec.chars() {
        match ch {
            '(' => {
                if current.is_some() {
                    return Err(EnigmaError::config(format!(
                        "nested '(' in cycle specification \"{}\"",
                        spec
                    )));
                }
                current = Some(String::new());
            }
            ')' => match current.take() {
                Some(cycle) => cycles.push(cycle),
                None => {
                    return Err(EnigmaError::config(format!(
                        "unbalanced ')' in cycle specification \"{}\"",
                        spec
                    )))
                }
            },
            c if c.is_whitespace() => {
                if current.is_some() {
                    return Err(EnigmaError::config(format!(
                        "whitespace inside a cycle in \"{}\"",
                        spec
                    )));
                }
            }
            c => match current.as_mut() {
                Some(cycle) => cycle.push(c),
                None => {
                    return Err(EnigmaError::config(format!(
                        "'{}' outside parentheses in cycle specification \"{}\"",
                        c, spec
                    )))
                }
            },
        }
    }

    if current.is_some() {
        return Err(EnigmaError::config(format!(
            "unterminated cycle in \"{}\"",
            spec
        )));
    }
    Ok(cycles)
}
