use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::{FailureSummary, PreconSummary};
use crate::ctx::Ctx;

/// Two-column bordered table; the first row is the heading.
pub fn ascii_table(rows: &[(String, String)]) -> String {
    let w0 = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(0);
    let w1 = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(0);
    let rule = format!("+{}+{}+\n", "-".repeat(w0 + 2), "-".repeat(w1 + 2));

    let mut out = String::new();
    out.push_str(&rule);
    for (i, (a, b)) in rows.iter().enumerate() {
        out.push_str(&format!("| {:<w0$} | {:<w1$} |\n", a, b, w0 = w0, w1 = w1));
        if i == 0 {
            out.push_str(&rule);
        }
    }
    out.push_str(&rule);
    out
}

/// Float rendering for the summary text: whole numbers keep one decimal.
pub fn fmt_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

fn row(label: &str, value: f64) -> (String, String) {
    (label.to_string(), fmt_value(value))
}

pub fn format_precon_summary(name: &str, s: &PreconSummary) -> String {
    let force = ascii_table(&[
        ("General summary".to_string(), String::new()),
        row("Sample length", s.sample_length),
        row("Minimum force", s.min_force),
        row("Maximum force", s.max_force),
        row("Maximum force cycle 1", s.max_force_cycle1),
        row("Maximum force cycle 5", s.max_force_cycle5),
        row("Stress-relaxation", s.stress_relaxation),
    ]);
    let hysteresis = ascii_table(&[
        ("Hysteresis".to_string(), "Cycle 1-5".to_string()),
        row("Positive value", s.hysteresis.positive),
        row("Sum value", s.hysteresis.sum),
        row("Hysteresis %", s.hysteresis.percent),
    ]);

    let mut out = format!("Summary data for {} preconditioning...\n\n", name);
    out.push_str(&force);
    out.push_str(&hysteresis);
    out
}

pub fn format_failure_summary(name: &str, s: &FailureSummary) -> String {
    let modulus = ascii_table(&[
        ("Summary".to_string(), String::new()),
        row("Max modulus", s.max_modulus),
        row("Stress at max modulus", s.stress_at_max_modulus),
        row("Strain at max modulus", s.strain_at_max_modulus),
        row("Failure stress (MPa)", s.failure_stress),
        row("Failure strain (%)", s.failure_strain_percent),
        row("Failure force (N)", s.failure_force),
        row("Failure extension (mm)", s.failure_extension),
    ]);

    let mut out = format!("Summary data for {} failure...\n\n", name);
    out.push_str(&modulus);
    out
}

/// End-of-run console summary.
pub fn format_run_summary(ctx: &Ctx) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    out.push_str(&format!("tendon-biomech v{}\n", version));
    out.push_str(&format!("Root: {}\n", ctx.root.display()));
    out.push_str(&format!(
        "Metadata records: {}\n",
        ctx.metadata.as_ref().map(|m| m.len()).unwrap_or(0)
    ));
    out.push_str(&format!("Processed: {}\n", ctx.results.len()));
    out.push_str(&format!(
        "No metadata match: {}\n",
        ctx.error_log.no_metadata_match.len()
    ));
    out.push_str(&format!(
        "Processing errors: {}\n",
        ctx.error_log.processing_failed.len()
    ));
    out
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
