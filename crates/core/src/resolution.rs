//! Parameter value resolution.
//!
//! Values come from three sources, tried in order for every parameter:
//! the piped stdin line at the parameter's position, the value of the
//! matching CLI flag, then an interactive prompt. An empty string always
//! counts as "no value", so an intentionally empty value cannot be supplied.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::io::BufRead;

use log::debug;

use crate::command_file::CommandFileParam;
use crate::error::{Error, Result};
use crate::interaction::Interaction;

/// Reads piped values, one per line, with line terminators removed.
///
/// # Errors
///
/// Returns an error if reading from `reader` fails.
pub fn read_stdin_values<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut values = Vec::new();
    for line in reader.lines() {
        values.push(line.map_err(Error::Stdio)?);
    }

    Ok(values)
}

/// Resolves one value per parameter, in declaration order.
///
/// `stdin_values` are matched by position, `flag_values` by parameter name.
/// A flag value equal to the declared default is ignored for `ask_always`
/// parameters so the user is always asked for those.
///
/// # Errors
///
/// Returns [`Error::EmptyParameterName`] for a parameter declared without a
/// name, [`Error::MissingValue`] if a parameter is still empty after
/// prompting, or any error raised by the interaction surface.
pub fn resolve_values<I, S>(
    params: &[CommandFileParam],
    stdin_values: &[String],
    flag_values: &HashMap<String, String, S>,
    interaction: &mut I,
) -> Result<Vec<String>>
where
    I: Interaction + ?Sized,
    S: BuildHasher,
{
    let mut values = Vec::with_capacity(params.len());

    for (index, param) in params.iter().enumerate() {
        if param.name.is_empty() {
            return Err(Error::EmptyParameterName(index + 1));
        }

        let mut value = stdin_values.get(index).cloned().unwrap_or_default();

        if value.is_empty() {
            if let Some(flag_value) = flag_values.get(&param.name) {
                if param.ask_always && *flag_value == param.default {
                    debug!("Ignoring default flag value for always-ask parameter `{}`", param.name);
                } else {
                    value = flag_value.clone();
                }
            }
        } else {
            debug!("Using piped value for parameter `{}`", param.name);
        }

        if value.is_empty() {
            value = interaction.prompt(param.prompt_text(), &param.default)?;
        }

        if value.is_empty() {
            return Err(Error::MissingValue(param.name.clone()));
        }

        values.push(value);
    }

    Ok(values)
}
