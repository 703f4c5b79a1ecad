//! Adapter runtime: pumps protocol lines between a reader and a writer.
//!
//! Synchronous on purpose: the engine is single-owner and every request is
//! answered before the next line is read.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::protocol::{create_error, ErrorCode, ServerMessage};
use crate::session::Session;

/// Serve requests until `reader` hits EOF.
///
/// The initial state is written first with `seq` 0. Blank lines are skipped.
/// A line that is not UTF-8 gets a `parse_error` reply with `seq` 0.
/// Returns the number of requests answered.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut reader: R,
    mut writer: W,
) -> Result<usize> {
    write_message(&mut writer, &session.observe(0))?;

    let mut handled = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("read request line")?;
        if read == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                session.handle_line(line)
            }
            Err(e) => {
                warn!("rejecting non-UTF-8 line: {}", e);
                ServerMessage::Error(create_error(
                    0,
                    ErrorCode::ParseError,
                    &format!("request is not valid UTF-8: {}", e),
                ))
            }
        };
        write_message(&mut writer, &reply)?;
        handled += 1;
    }

    info!("input closed after {} requests", handled);
    Ok(handled)
}

fn write_message<W: Write>(writer: &mut W, msg: &ServerMessage) -> Result<()> {
    let line = msg
        .to_line()
        .with_context(|| format!("encode reply seq {}", msg.seq()))?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
