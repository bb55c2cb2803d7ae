//! Interactive run-request prompt.

use std::io::{BufRead, Write};

use adtally_core::{parse_run_request, RunRequest, MAX_DAY_COUNT};
use chrono::NaiveDate;

/// Asks for a date or day count until the answer validates.
///
/// # Errors
///
/// Returns an error if reading or writing the terminal fails, or if input
/// ends before a valid answer is given.
pub(crate) fn prompt_run_request<R, W>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> anyhow::Result<RunRequest>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(
            output,
            "Enter a date (YYYY-MM-DD) or a number of days before today (0-{MAX_DAY_COUNT}): "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before a date or day count was entered");
        }

        match parse_run_request(&line, today) {
            Ok(request) => return Ok(request),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}
