//! Line-driven "next image" loop over a cursor.

use std::io::{BufRead, Write};

use super::DatasetCursor;
use crate::error::DatecrawlError;

/// Drives `cursor` from commands read line by line on `input`.
///
/// | command            | effect                               |
/// |--------------------|--------------------------------------|
/// | empty, `n`, `next` | print the next pair (wraps at end)   |
/// | `r`, `reset`       | rewind to the first pair             |
/// | `q`, `quit`, EOF   | stop                                 |
///
/// Unknown commands print a hint and are otherwise ignored. Returns the
/// number of pairs printed.
pub fn browse<R: BufRead, W: Write>(
    cursor: &mut DatasetCursor,
    input: R,
    mut output: W,
) -> Result<usize, DatecrawlError> {
    let mut shown = 0;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" | "n" | "next" => {
                let pair = cursor.next_pair()?;
                writeln!(output, "{}", pair)?;
                shown += 1;
            }
            "r" | "reset" => cursor.reset(),
            "q" | "quit" => break,
            other => {
                writeln!(output, "unknown command '{other}' (n = next, r = reset, q = quit)")?;
            }
        }
        output.flush()?;
    }

    Ok(shown)
}
