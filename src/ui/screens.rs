// Text renderers for the three screens. Pure functions of their input.

use super::progress::{format_duration, format_eta, ProgressGauge};
use crate::certificate::{CompletionRecord, WIPE_METHOD};
use crate::simulator::{ProgressSnapshot, PASS_COUNT};
use colored::Colorize;
use std::fmt::Write;

pub const APP_TITLE: &str = "Secure Data Wiper";
pub const APP_TAGLINE: &str = "Professional Data Sanitization";
pub const APP_VERSION: &str = "v1.0.0";

const RULE_WIDTH: usize = 64;

/// Feature cards shown on the home screen: (title, description, badge)
pub const SECURITY_FEATURES: [(&str, &str, &str); 3] = [
    (
        "Multi-Pass Overwrite",
        "DoD 5220.22-M standard with 3-pass verification",
        "Military Grade",
    ),
    (
        "Compliance Certificate",
        "Digitally signed proof of secure data erasure",
        "NIST SP 800-88",
    ),
    (
        "Sector Verification",
        "Complete HPA/DCO and SSD sector sanitization",
        "100% Coverage",
    ),
];

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

pub fn render_header() -> String {
    format!(
        "{}  {}  {}\n{}\n",
        format!("🛡  {}", APP_TITLE).as_str().bold(),
        APP_TAGLINE.dimmed(),
        APP_VERSION.dimmed(),
        rule()
    )
}

pub fn render_footer() -> String {
    format!(
        "{}\n{}\n",
        rule(),
        "Compliant with NIST SP 800-88, DoD 5220.22-M, and ISO 27001 standards".dimmed()
    )
}

pub fn render_home() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Professional Data Wiping".bold());
    let _ = writeln!(
        out,
        "Securely erase sensitive data with military-grade algorithms.\n\
         Ensuring complete data sanitization for responsible IT asset disposal.\n"
    );

    let _ = writeln!(
        out,
        "{} This process will permanently and irreversibly delete ALL data on the\n\
         selected storage device. Ensure you have backed up any important files\n\
         before proceeding.\n",
        "⚠ Critical Warning:".red().bold()
    );

    for (title, description, badge) in SECURITY_FEATURES {
        let _ = writeln!(out, "  {} [{}]", title.bold(), badge.cyan());
        let _ = writeln!(out, "    {}", description);
    }

    let _ = writeln!(
        out,
        "\n  {} NIST Compliant   {} Audit Ready   {} Secure & Verified",
        "✓".green(),
        "✓".green(),
        "✓".green()
    );
    let _ = writeln!(out, "\nPress Enter to {} or q to quit.", "Start Secure Wipe".bold());

    out
}

pub fn render_progress(snapshot: &ProgressSnapshot, gauge: &mut ProgressGauge) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Secure Wipe in Progress".bold());
    let _ = writeln!(
        out,
        "{}\n",
        "Please do not power off your device during this process".dimmed()
    );
    let _ = writeln!(out, "{}", gauge.render(snapshot));
    let _ = writeln!(
        out,
        "{}  {}",
        snapshot.phase.status_text(),
        format!("Pass {} of {}", snapshot.pass, PASS_COUNT).as_str().cyan()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  Phase:          {}", snapshot.phase.label());
    let _ = writeln!(out, "  Method:         {}", WIPE_METHOD);
    let _ = writeln!(out, "  Time remaining: {}", format_eta(snapshot.estimated_remaining));
    let _ = writeln!(out, "  Verification:   Real-time");

    out
}

pub fn render_certificate(record: &CompletionRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "✓ Wipe Completed Successfully".green().bold());
    let _ = writeln!(
        out,
        "{}\n",
        "Data has been securely erased and verified according to industry standards".dimmed()
    );

    let _ = writeln!(out, "{}", "Secure Wipe Certificate".bold());
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "  Certificate ID:  {}", record.id);
    let _ = writeln!(out, "  Status:          {}", record.status.as_str().green());
    let _ = writeln!(out, "  Device:          {}", record.device);
    let _ = writeln!(out, "  Method:          {}", record.method);
    let _ = writeln!(out, "  Duration:        {}", format_duration(record.duration_seconds));
    let _ = writeln!(
        out,
        "  Verification:    {}",
        record.verification_status.as_str().green()
    );
    let _ = writeln!(
        out,
        "  Completed:       {}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "  Integrity token: {}", record.integrity_token);

    let badges: Vec<String> = record
        .compliance_standards
        .iter()
        .map(|s| format!("✓ {}", s))
        .collect();
    let _ = writeln!(out, "  Compliance:      {}", badges.join("  "));
    let _ = writeln!(out, "{}", rule());

    let _ = writeln!(
        out,
        "\n[e] Export Certificate   [n] Start New Wipe   [q] Quit"
    );

    out
}
