//! Parse subcommand handler

use anyhow::{bail, Result};

use subseek::notice::Notice;
use subseek::theme::current_theme;
use subseek::timestamp;

/// Print `raw -> seconds` per timestamp. Fails if any of them is invalid.
pub fn handle(timestamps: &[String]) -> Result<()> {
    let theme = current_theme();
    let mut failed = 0;

    for raw in timestamps {
        match timestamp::parse(raw) {
            Ok(ts) => println!(
                "{} {} {}",
                theme.primary_text(raw),
                theme.secondary_text(&format!("{ts} ->")),
                theme.accent_text(&format!("{:.3}", ts.as_secs_f64()))
            ),
            Err(err) => {
                failed += 1;
                eprintln!("{}", theme.notice(&Notice::warning(err.to_string())));
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} timestamps could not be parsed", timestamps.len());
    }
    Ok(())
}
