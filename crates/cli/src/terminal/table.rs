use std::io::Write;

use itertools::Itertools;
use shell_cuts_core::command_file::CommandFile;
use shell_cuts_core::error::{Error, Result};

use super::colors::{self, HEADER, INFO, PLAIN, STRIPE};

const COLUMN_GAP: &str = "  ";

/// Plain text table with a numbered first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from `headers` and `rows`, prefixing an index column.
    #[must_use]
    pub fn new(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        let headers = std::iter::once("N.")
            .chain(headers.iter().copied())
            .map(ToString::to_string)
            .collect();

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| std::iter::once((index + 1).to_string()).chain(row).collect())
            .collect();

        Self { headers, rows }
    }

    /// The listing shown for command files.
    #[must_use]
    pub fn for_commands(commands: &[CommandFile]) -> Self {
        let rows = commands
            .iter()
            .map(|command| {
                vec![
                    command.root_name.clone(),
                    command.f_name.clone(),
                    command.desc.clone(),
                ]
            })
            .collect();

        Self::new(&["Folder", "File", "Description"], rows)
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect()
    }

    fn format_line(cells: &[String], widths: &[usize]) -> String {
        let last = widths.len().saturating_sub(1);
        cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(column, (cell, width))| {
                if column == last {
                    cell.clone()
                } else {
                    format!("{cell:<width$}")
                }
            })
            .join(COLUMN_GAP)
    }

    /// The header line followed by one line per row, without styling.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let widths = self.widths();
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|cells| Self::format_line(cells, &widths))
            .collect()
    }

    /// Prints the table, striping every other row when `colored`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn print<W: Write>(&self, writer: &mut W, colored: bool) -> Result<()> {
        if self.rows.is_empty() {
            colors::print_styled(writer, "No data available", INFO, colored);
            return Ok(());
        }

        for (index, line) in self.lines().iter().enumerate() {
            let style = match index {
                0 => HEADER,
                i if i % 2 == 1 => STRIPE,
                _ => PLAIN,
            };
            colors::write_styled(writer, line, style, colored)
                .and_then(|()| writeln!(writer))
                .map_err(Error::Stdio)?;
        }

        writer.flush().map_err(Error::Stdio)
    }
}
