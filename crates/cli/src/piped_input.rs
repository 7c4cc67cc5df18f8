//! Values piped into `scut run`.
//!
//! Piped values are only taken when the selected script declares parameters
//! and the input already has data (or end of input) waiting. An open pipe
//! with nothing written to it is left alone rather than waited on.

use std::io::{BufReader, Read};

use crossterm::tty::IsTty;
use log::debug;
use shell_cuts_core::error::Result;
use shell_cuts_core::resolution::read_stdin_values;

#[cfg(unix)]
use std::os::fd::AsRawFd;

/// An input that can be checked for pending data.
#[cfg(unix)]
pub trait PipedSource: Read + IsTty + AsRawFd {}

#[cfg(unix)]
impl<T: Read + IsTty + AsRawFd> PipedSource for T {}

#[cfg(not(unix))]
pub trait PipedSource: Read + IsTty {}

#[cfg(not(unix))]
impl<T: Read + IsTty> PipedSource for T {}

/// Whether reading `source` would return without blocking.
#[cfg(unix)]
fn has_pending_input<S: PipedSource>(source: &S) -> bool {
    let mut poll_fd = libc::pollfd {
        fd: source.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };

    // SAFETY: `poll_fd` is a single valid entry and the timeout is zero.
    let ready = unsafe { libc::poll(&mut poll_fd, 1, 0) };

    ready > 0 && poll_fd.revents & (libc::POLLIN | libc::POLLHUP) != 0
}

#[cfg(not(unix))]
fn has_pending_input<S: PipedSource>(_source: &S) -> bool {
    true
}

/// Reads the piped values for a script declaring `param_count` parameters.
///
/// Returns no values when the script has no parameters, so the script
/// inherits the input untouched, when `source` is a terminal, or when
/// nothing is waiting on it.
///
/// # Errors
///
/// Returns an error if reading `source` fails.
pub fn piped_values<S: PipedSource>(source: S, param_count: usize) -> Result<Vec<String>> {
    if param_count == 0 {
        debug!("No parameters, leaving input to the script");
        return Ok(Vec::new());
    }

    if source.is_tty() {
        return Ok(Vec::new());
    }

    if !has_pending_input(&source) {
        debug!("Input is not a terminal but has nothing pending");
        return Ok(Vec::new());
    }

    read_stdin_values(BufReader::new(source))
}
