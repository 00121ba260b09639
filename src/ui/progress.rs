use crate::simulator::ProgressSnapshot;
use colored::Colorize;
use std::time::Duration;

pub(crate) const SPINNER_FRAMES: [&str; 4] = ["·", "˚", "•", "˚"];

pub struct ProgressGauge {
    width: usize,
    frame: usize,
}

impl ProgressGauge {
    /// width = number of bar character slots (not including the brackets)
    pub fn new(width: usize) -> Self {
        Self { width, frame: 0 }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render one bar line for `snapshot`, advancing the spinner.
    pub fn render(&mut self, snapshot: &ProgressSnapshot) -> String {
        let pct = clamp_percent(snapshot.percent);
        let (filled, empty) = bar_cells(pct, self.width);
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();

        let bar = format!(
            "{}{}",
            "█".repeat(filled).as_str().bright_green().bold(),
            "░".repeat(empty).as_str().bright_black()
        );

        let spinner = if snapshot.phase.is_terminal() {
            "✓"
        } else {
            SPINNER_FRAMES[self.frame]
        };

        format!(
            "[{}] {}  {}",
            bar,
            format!("{:.1}%", pct).as_str().bold(),
            spinner.cyan()
        )
    }
}

pub(crate) fn clamp_percent(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

/// Split `width` slots into (filled, empty) for `pct`.
pub(crate) fn bar_cells(pct: f64, width: usize) -> (usize, usize) {
    let filled = ((clamp_percent(pct) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    (filled, width - filled)
}

/// Time-remaining text for the progress screen.
///
/// Whole minutes are rounded up; anything over an hour is shown as hours and
/// minutes.
pub fn format_eta(remaining: Option<Duration>) -> String {
    let Some(remaining) = remaining else {
        return "Calculating...".to_string();
    };

    let minutes = (remaining.as_secs_f64() / 60.0).ceil() as u64;
    if minutes > 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else if minutes > 0 {
        format!("{} minutes", minutes)
    } else {
        "Less than 1 minute".to_string()
    }
}

/// Certificate duration: `1h 2m 3s`, `2m 3s` or `3s`
pub fn format_duration(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}
