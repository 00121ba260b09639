// App driver - wires the router, simulator, screens and exporter together
//
// Rendering goes through a `Surface` so the same flow drives the terminal and
// the integration tests.

use crate::certificate::CompletionRecord;
use crate::export::{CertificateExporter, DirectoryTarget, ExportReceipt, SaveTarget};
use crate::router::{Screen, ScreenRouter};
use crate::settings::SimulatorConfig;
use crate::simulator::ProgressSimulator;
use crate::ui::screens::{render_certificate, render_footer, render_header, render_home, render_progress};
use crate::ui::{Notice, ProgressGauge};
use crate::{is_interrupted, SimError, SimResult};
use console::Term;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const GAUGE_WIDTH: usize = 48;
const INTERRUPT_POLL: Duration = Duration::from_millis(100);

/// Where screens and notifications are drawn
pub trait Surface {
    /// Draw a full screen below whatever is already shown.
    fn show(&mut self, frame: &str) -> SimResult<()>;

    /// Replace the previously redrawn frame in place.
    fn redraw(&mut self, frame: &str) -> SimResult<()> {
        self.show(frame)
    }

    fn notify(&mut self, notice: &Notice) -> SimResult<()>;
}

/// Stdout surface that redraws the progress screen in place
pub struct TerminalSurface {
    term: Term,
    redrawn_lines: usize,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            redrawn_lines: 0,
        }
    }
}

impl Surface for TerminalSurface {
    fn show(&mut self, frame: &str) -> SimResult<()> {
        self.term.write_str(frame)?;
        self.redrawn_lines = 0;
        Ok(())
    }

    fn redraw(&mut self, frame: &str) -> SimResult<()> {
        if self.redrawn_lines > 0 && self.term.is_term() {
            self.term.clear_last_lines(self.redrawn_lines)?;
        }
        self.term.write_str(frame)?;
        self.redrawn_lines = frame.lines().count();
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) -> SimResult<()> {
        self.term.write_line(&notice.render())?;
        self.redrawn_lines = 0;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Export,
    NewWipe,
    Quit,
    Unknown,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "s" | "start" => Command::Start,
            "e" | "export" => Command::Export,
            "n" | "new" => Command::NewWipe,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

pub struct WiperApp {
    config: SimulatorConfig,
    router: ScreenRouter,
    simulator: ProgressSimulator,
    exporter: CertificateExporter,
    target: Box<dyn SaveTarget + Send>,
}

impl WiperApp {
    /// App exporting into the configured directory
    pub fn new(config: SimulatorConfig) -> Self {
        let target = DirectoryTarget::new(config.export.resolved_directory());
        Self::with_target(config, target)
    }

    pub fn with_target(config: SimulatorConfig, target: impl SaveTarget + Send + 'static) -> Self {
        Self {
            simulator: ProgressSimulator::new(config.timing.clone()),
            exporter: CertificateExporter::new(config.timing.export_delay()),
            router: ScreenRouter::new(),
            target: Box::new(target),
            config,
        }
    }

    pub fn with_exporter(mut self, exporter: CertificateExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn router(&self) -> &ScreenRouter {
        &self.router
    }

    /// Simulated permission check, then move to the progress screen.
    pub async fn start_wipe<S: Surface>(&mut self, surface: &mut S) -> SimResult<()> {
        // Validate the transition before making the user wait
        if matches!(self.router.screen(), Screen::Progress) {
            return self.router.start();
        }

        tokio::time::sleep(self.config.timing.security_check()).await;
        surface.notify(&Notice::security_check_complete())?;
        tokio::time::sleep(self.config.timing.launch_delay()).await;

        self.router.start()
    }

    /// Run one simulated wipe and move to the certificate screen.
    ///
    /// Returns `SimError::Cancelled` if an interrupt arrives first; the tick
    /// source is released before returning.
    pub async fn run_progress<S: Surface>(&mut self, surface: &mut S) -> SimResult<CompletionRecord> {
        if !matches!(self.router.screen(), Screen::Progress) {
            return Err(SimError::InvalidTransition {
                action: "run a wipe",
                screen: self.router.screen().name(),
            });
        }

        let mut handle = self.simulator.start();
        let mut gauge = ProgressGauge::new(GAUGE_WIDTH);
        surface.redraw(&render_progress(&handle.snapshot(), &mut gauge))?;

        let mut interrupted = false;
        loop {
            tokio::select! {
                next = handle.next_snapshot() => match next {
                    Some(snapshot) => surface.redraw(&render_progress(&snapshot, &mut gauge))?,
                    None => break,
                },
                _ = wait_for_interrupt() => {
                    interrupted = true;
                    break;
                }
            }
        }

        if interrupted {
            handle.cancel();
            return Err(SimError::Cancelled);
        }

        let record = handle.completion().await?;
        self.router.on_completed(record.clone())?;
        Ok(record)
    }

    /// Export the record on the certificate screen. The outcome is reported
    /// on `surface`; the current screen is never changed.
    pub async fn export_current<S: Surface>(&mut self, surface: &mut S) -> SimResult<ExportReceipt> {
        let record = match self.router.record() {
            Some(record) => record.clone(),
            None => {
                return Err(SimError::InvalidTransition {
                    action: "export",
                    screen: self.router.screen().name(),
                })
            }
        };

        surface.notify(&Notice::info("Generating...", "Preparing certificate export"))?;
        match self.exporter.export(&record, self.target.as_mut()).await {
            Ok(receipt) => {
                surface.notify(&Notice::exported(&receipt))?;
                Ok(receipt)
            }
            Err(failure) => {
                surface.notify(&Notice::export_failed(&failure))?;
                Err(failure.into())
            }
        }
    }

    /// "Start New Wipe": discard the record and go home.
    pub fn new_wipe(&mut self) -> SimResult<()> {
        self.router.reset()
    }

    /// Drive home -> progress -> certificate without user input.
    pub async fn run_once<S: Surface>(&mut self, surface: &mut S, export: bool) -> SimResult<CompletionRecord> {
        surface.show(&render_header())?;
        self.start_wipe(surface).await?;
        let record = self.run_progress(surface).await?;
        surface.show(&render_certificate(&record))?;

        if export {
            self.export_current(surface).await?;
        }
        Ok(record)
    }

    /// Interactive loop reading one command per line from `input`.
    /// End of input quits.
    pub async fn run_interactive<S, R>(&mut self, surface: &mut S, mut input: R) -> SimResult<()>
    where
        S: Surface,
        R: AsyncBufRead + Unpin,
    {
        surface.show(&render_header())?;

        loop {
            let screen = self.router.screen().clone();
            match screen {
                Screen::Home => {
                    surface.show(&render_home())?;
                    match read_command(&mut input).await? {
                        Command::Quit => break,
                        Command::Start => self.start_wipe(surface).await?,
                        _ => surface.notify(&unknown_command("home"))?,
                    }
                }
                Screen::Progress => {
                    self.run_progress(surface).await?;
                }
                Screen::Certificate(record) => {
                    surface.show(&render_certificate(&record))?;
                    match read_command(&mut input).await? {
                        Command::Quit => break,
                        Command::Export => match self.export_current(surface).await {
                            Ok(_) => {}
                            Err(e) if e.is_export_failure() => {}
                            Err(e) => return Err(e),
                        },
                        Command::NewWipe => self.new_wipe()?,
                        _ => surface.notify(&unknown_command("certificate"))?,
                    }
                }
            }
        }

        surface.show(&render_footer())?;
        Ok(())
    }
}

fn unknown_command(screen: &str) -> Notice {
    tracing::debug!(screen, "Unrecognised command");
    Notice::destructive("Unknown command", "Use the keys listed on screen.")
}

/// Next command from `input`; end of input quits, an interrupt cancels.
async fn read_command<R: AsyncBufRead + Unpin>(input: &mut R) -> SimResult<Command> {
    let mut line = String::new();
    tokio::select! {
        read = input.read_line(&mut line) => {
            if read? == 0 {
                return Ok(Command::Quit);
            }
            Ok(Command::parse(&line))
        }
        _ = wait_for_interrupt() => Err(SimError::Cancelled),
    }
}

async fn wait_for_interrupt() {
    loop {
        if is_interrupted() {
            return;
        }
        tokio::time::sleep(INTERRUPT_POLL).await;
    }
}
