//! Headless commands, written against any reader/writer pair so they run
//! the same on a terminal and in tests.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::tracker::Tracker;

/// Ask a y/N question; anything but `y`/`yes` (or end of input) is a no
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Visited counts followed by the visited parks in list order
pub fn print_stats<W: Write>(tracker: &Tracker, output: &mut W) -> Result<()> {
    let stats = tracker.stats();
    writeln!(
        output,
        "Visited {} / {} parks ({}%)",
        stats.visited, stats.total, stats.percentage
    )?;
    writeln!(output, "Acres   {:.0} / {:.0}", stats.visited_acres, stats.total_acres)?;
    for row in tracker.list().rows().iter().filter(|r| r.checked) {
        writeln!(output, "  [x] {} ({})", row.name, row.city)?;
    }
    Ok(())
}

/// Replace progress with an exported file after confirmation
pub fn import<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    file: &Path,
    yes: bool,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let preview = tracker.preview_import(file)?;
    writeln!(output, "{}", preview.summary())?;
    if !yes && !confirm(input, output, "Continue? [y/N] ")? {
        writeln!(output, "Import cancelled")?;
        return Ok(());
    }

    let count = preview.incoming_count;
    tracker.apply_import(preview);
    if let Some(err) = tracker.take_save_error() {
        bail!(err);
    }
    writeln!(output, "Imported {} visited parks", count)?;
    Ok(())
}

/// Forget every visit after confirmation
pub fn clear<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    yes: bool,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let count = tracker.visited().len();
    if count == 0 {
        writeln!(output, "No visited parks to clear")?;
        return Ok(());
    }

    let prompt = format!(
        "Clear all {} visited parks? This cannot be undone. [y/N] ",
        count
    );
    if !yes && !confirm(input, output, &prompt)? {
        writeln!(output, "Clear cancelled")?;
        return Ok(());
    }

    tracker.clear_all();
    if let Some(err) = tracker.take_save_error() {
        bail!(err);
    }
    writeln!(output, "Cleared {} visited parks", count)?;
    Ok(())
}
