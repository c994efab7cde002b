// Input acquisition: command-line text or blocking interactive prompts.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::scoring::trust::TrustMode;

pub const TEXT_PROMPT: &str = "Please enter the text to check: ";
pub const TRUST_PROMPT: &str = "Use default trust score? (yes/no): ";

/// Join trailing command-line words into the text to check.
/// Returns None when no words were given.
pub fn text_from_args(args: &[String]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

/// Print `prompt` and read one line, without its trailing newline.
///
/// End of input before any line is an error; an empty line is not.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("stdin closed before an answer was given");
    }

    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(trimmed.to_string())
}

/// Text from the arguments, or from the text prompt when there are none.
pub fn read_text<R: BufRead, W: Write>(
    args: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    match text_from_args(args) {
        Some(text) => Ok(text),
        None => ask(input, output, TEXT_PROMPT),
    }
}

/// Ask whether to use the default trust score.
pub fn read_trust_mode<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<TrustMode> {
    let answer = ask(input, output, TRUST_PROMPT)?;
    Ok(TrustMode::from_answer(&answer))
}
