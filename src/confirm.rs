use std::io::{self, BufRead, Write};

/// Ask the operator to confirm deletion of `id`.
///
/// Only the first whitespace-delimited token of the answer counts; anything
/// that lower-cases to a leading `y` is a yes. EOF or a blank line is a no.
pub fn confirm_delete<R: BufRead, W: Write>(id: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "Really delete Snippet with ID {:?}? [y,N]: ", id)?;
    output.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;

    let line = String::from_utf8_lossy(&line);
    let answer = line.split_whitespace().next().unwrap_or("");
    Ok(answer.to_lowercase().starts_with('y'))
}
