//! Human-readable scoring reports.

use std::fmt::{self, Write as _};

use crate::score::{ScoringResult, DEFAULT_Z};

/// How we describe the confidence level in the report.
fn confidence_label(z: f64) -> String {
    if z == DEFAULT_Z {
        "95%".to_owned()
    } else {
        format!("z={}", z)
    }
}

/// Render `result` as the plain-text report printed by `vocabstudy score`.
pub fn render_report(result: &ScoringResult) -> String {
    let mut out = String::new();
    write_report(&mut out, result).expect("writing to a String cannot fail");
    out
}

fn write_report(out: &mut String, result: &ScoringResult) -> fmt::Result {
    let label = confidence_label(result.z);
    writeln!(out, "===== RESULTS =====")?;
    writeln!(out, "Sample size (n): {}", result.n)?;
    writeln!(
        out,
        "Known (passive): {}/{} = {:.3}",
        result.k, result.n, result.p
    )?;
    writeln!(
        out,
        "{} CI (Wilson): [{:.3}, {:.3}]",
        label, result.ci_low, result.ci_high
    )?;

    if let Some(ext) = &result.in_text {
        writeln!(out)?;
        writeln!(
            out,
            "In-text known vocabulary: {} ({} CI: {}–{}) out of T={}",
            ext.estimate, label, ext.low, ext.high, ext.population
        )?;
    }
    if let Some(ext) = &result.external {
        writeln!(
            out,
            "External list estimate (L={}): {} ({} CI: {}–{})",
            ext.population, ext.estimate, label, ext.low, ext.high
        )?;
    }
    Ok(())
}
