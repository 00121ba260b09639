pub mod notice;
pub mod progress;
pub mod screens;

pub use notice::{Notice, Severity};
pub use progress::{format_duration, format_eta, ProgressGauge};
