//! Message stream: settings lines, blank lines and message lines in, grouped
//! ciphertext out.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::settings::Settings;

/// Symbols per output group.
pub const GROUP_SIZE: usize = 5;

/// Splits `text` into groups of `size` symbols separated by single spaces.
/// The last group may be shorter.
///
/// # Examples
///
/// ```
/// assert_eq!(enigma::stream::group("QVPQSOKOILPUBKJ", 5), "QVPQS OKOIL PUBKJ");
/// assert_eq!(enigma::stream::group("ZPISFXDW", 5), "ZPISF XDW");
/// ```
pub fn group(text: &str, size: usize) -> String {
    let size = size.max(1);
    let mut out = String::with_capacity(text.len() + text.len() / size);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 && i % size == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Runs every line of `input` through `machine`, writing one line to
/// `output` per input line that is not a settings line.
///
/// - a line containing `*` is a settings line and reconfigures the machine;
/// - a blank line is echoed as a blank line;
/// - any other line is converted (whitespace ignored) and written in groups
///   of [`GROUP_SIZE`].
///
/// # Errors
/// - [`EnigmaError::Configuration`] if a message line comes before the first
///   settings line, or a settings line is invalid.
/// - [`EnigmaError::Alphabet`] for a message symbol outside the alphabet.
/// - [`EnigmaError::Io`] if reading or writing fails.
///
/// Processing stops at the first error; lines already written stay written.
pub fn process<R, W>(machine: &mut Machine, input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut configured = false;
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            writeln!(output)?;
            continue;
        }
        if line.contains('*') {
            Settings::parse(&line, machine.num_rotors())?.apply(machine)?;
            configured = true;
            debug!(line = lineno + 1, "machine reconfigured");
            continue;
        }
        if !configured {
            return Err(EnigmaError::config(
                "input must start with a settings line",
            ));
        }
        let converted = machine.convert(&line)?;
        writeln!(output, "{}", group(&converted, GROUP_SIZE))?;
    }
    output.flush()?;
    Ok(())
}
