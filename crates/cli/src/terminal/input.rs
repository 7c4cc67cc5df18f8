use std::io::{BufRead, Write};

use shell_cuts_core::error::{Error, Result};

use super::colors::{self, PROMPT, WARNING};

/// Reads one answer, `None` at end of input.
fn read_answer<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(Error::Stdio)?;

    if read == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

/// Writes `message` in the prompt style followed by `suffix`, then flushes.
fn write_prompt<W: Write>(writer: &mut W, message: &str, suffix: &str, colored: bool) -> Result<()> {
    colors::write_styled(writer, message, PROMPT, colored)
        .and_then(|()| writer.write_all(suffix.as_bytes()))
        .and_then(|()| writer.flush())
        .map_err(Error::Stdio)
}

/// Prompts the user for a value.
///
/// An empty answer returns `default`, which may itself be empty.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] at end of input, so a default is never taken
/// without the user answering, or an error if reading or writing the
/// terminal fails.
pub fn prompt_value<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: &str,
    colored: bool,
) -> Result<String> {
    let suffix = if default.is_empty() {
        ": ".to_string()
    } else {
        format!(" [{default}]: ")
    };
    write_prompt(writer, message, &suffix, colored)?;

    match read_answer(reader)? {
        Some(answer) if answer.is_empty() => Ok(default.to_string()),
        Some(answer) => Ok(answer),
        None => Err(Error::Cancelled(format!("No input available for <{message}>"))),
    }
}

/// Asks a yes/no question; the default answer is no.
///
/// # Errors
///
/// Returns an error if reading or writing the terminal fails.
pub fn confirm<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    colored: bool,
) -> Result<bool> {
    loop {
        write_prompt(writer, message, " [y/N]: ", colored)?;

        let Some(answer) = read_answer(reader)? else {
            return Ok(false);
        };

        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => colors::print_styled(writer, "Please enter y or n", WARNING, colored),
        }
    }
}

/// Asks for a 1-based line number between 1 and `count`, returning the
/// 0-based index.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] at end of input, or an error if reading or
/// writing the terminal fails.
pub fn select_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    count: usize,
    colored: bool,
) -> Result<usize> {
    if count == 1 {
        return Ok(0);
    }

    loop {
        colors::write_styled(writer, "Select line", WARNING, colored)
            .and_then(|()| writer.write_all(b": "))
            .and_then(|()| writer.flush())
            .map_err(Error::Stdio)?;

        let Some(answer) = read_answer(reader)? else {
            return Err(Error::Cancelled("Command selection has been cancelled".to_string()));
        };

        match answer.parse::<usize>() {
            Ok(line) if (1..=count).contains(&line) => {
                writeln!(writer).map_err(Error::Stdio)?;
                return Ok(line - 1);
            }
            _ => colors::print_styled(
                writer,
                &format!("Please select one of the available lines (1-{count})"),
                WARNING,
                colored,
            ),
        }
    }
}
