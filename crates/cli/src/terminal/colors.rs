use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

/// Foreground, background and attributes applied to a piece of text.
#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub attributes: &'static [Attribute],
}

pub const INFO: TextStyle = TextStyle {
    foreground: Some(Color::DarkGrey),
    background: None,
    attributes: &[],
};

pub const WARNING: TextStyle = TextStyle {
    foreground: Some(Color::Yellow),
    background: None,
    attributes: &[Attribute::Italic],
};

pub const ERROR: TextStyle = TextStyle {
    foreground: Some(Color::Red),
    background: None,
    attributes: &[],
};

pub const PROMPT: TextStyle = TextStyle {
    foreground: Some(Color::DarkGreen),
    background: None,
    attributes: &[],
};

pub const HEADER: TextStyle = TextStyle {
    foreground: Some(Color::Magenta),
    background: None,
    attributes: &[Attribute::Bold, Attribute::Underlined],
};

/// Every other table row
pub const STRIPE: TextStyle = TextStyle {
    foreground: Some(Color::White),
    background: Some(Color::AnsiValue(233)),
    attributes: &[],
};

pub const PLAIN: TextStyle = TextStyle {
    foreground: None,
    background: None,
    attributes: &[],
};

/// Writes `text` with `style`, or as is when `colored` is false.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_styled<W: Write>(
    writer: &mut W,
    text: &str,
    style: TextStyle,
    colored: bool,
) -> std::io::Result<()> {
    if !colored {
        return writer.write_all(text.as_bytes());
    }

    if let Some(foreground) = style.foreground {
        queue!(writer, SetForegroundColor(foreground))?;
    }

    if let Some(background) = style.background {
        queue!(writer, SetBackgroundColor(background))?;
    }

    for attribute in style.attributes {
        queue!(writer, SetAttribute(*attribute))?;
    }

    queue!(writer, Print(text), SetAttribute(Attribute::Reset), ResetColor)
}

/// Writes a styled line, logging rather than failing on write errors.
pub fn print_styled<W: Write>(writer: &mut W, text: &str, style: TextStyle, colored: bool) {
    let result = write_styled(writer, text, style, colored)
        .and_then(|()| writeln!(writer))
        .and_then(|()| writer.flush());

    if let Err(e) = result {
        log::warn!("Could not write message: {e}");
    }
}
