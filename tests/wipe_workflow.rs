/// End-to-end workflow tests: home -> progress -> certificate -> export
///
/// Every test runs on a paused tokio clock so the 200ms ticks and the fixed
/// delays elapse instantly but in order. The interrupt flag is process-wide,
/// so these tests run serially.
#[path = "common/mod.rs"]
mod common;

use common::{default_config, fast_config, FailingTarget, MemoryTarget, RecordingSurface};
use secure_wiper::export::CertificateExporter;
use secure_wiper::{reset_interrupted, set_interrupted, Screen, SimError, WiperApp};
use serial_test::serial;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
#[serial]
async fn test_full_run_emits_one_passed_record() {
    reset_interrupted();
    let mut app = WiperApp::with_target(default_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();
    let origin = Instant::now();

    let record = app.run_once(&mut surface, false).await.unwrap();

    // 1.5s check + 1s launch + 200 ticks of 200ms + 2s completion delay
    assert_eq!(origin.elapsed(), Duration::from_millis(1500 + 1000 + 40_000 + 2000));
    assert_eq!(record.verification_status, "PASSED");
    assert_eq!(
        record.compliance_standards,
        vec!["NIST SP 800-88", "DoD 5220.22-M", "ISO 27001"]
    );
    assert_eq!(record.duration_seconds, 40);

    // Initial frame plus one redraw per tick
    assert_eq!(surface.redraws, 201);
    assert!(surface
        .frames
        .iter()
        .any(|f| f.contains("100.0%") && f.contains("Pass 3 of 3")));

    assert_eq!(app.router().record(), Some(&record));
    assert_eq!(surface.notice_titles(), vec!["Security Check Complete"]);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_progress_frames_are_monotonic() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    app.run_once(&mut surface, false).await.unwrap();

    let percents: Vec<f64> = surface
        .frames
        .iter()
        .filter_map(|f| {
            let end = f.find('%')?;
            let start = f[..end].rfind(|c: char| !(c.is_ascii_digit() || c == '.'))? + 1;
            f[start..end].parse().ok()
        })
        .collect();

    assert!(!percents.is_empty());
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(percents.last().copied(), Some(100.0));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_export_after_run() {
    reset_interrupted();
    let target = MemoryTarget::default();
    let saved = target.saved.clone();
    let mut app = WiperApp::with_target(fast_config(), target);
    let mut surface = RecordingSurface::default();

    let record = app.run_once(&mut surface, true).await.unwrap();

    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let (name, content) = &saved[0];
    assert_eq!(name, &format!("secure-wipe-certificate-{}.json", record.id));

    let doc: serde_json::Value = serde_json::from_slice(content).unwrap();
    assert_eq!(doc["id"], record.id.as_str());
    assert_eq!(doc["durationSeconds"], record.duration_seconds);
    assert_eq!(doc["integrityToken"], record.integrity_token.as_str());
    assert_eq!(doc["format"], "JSON");
    assert!(doc["exportedAt"].is_string());

    assert!(surface.notice_titles().contains(&"Certificate Exported"));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_export_failure_leaves_certificate_screen() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), FailingTarget);
    let mut surface = RecordingSurface::default();

    let err = app.run_once(&mut surface, true).await.unwrap_err();

    assert!(err.is_export_failure());
    assert!(matches!(app.router().screen(), Screen::Certificate(_)));
    let last = surface.notices.last().unwrap();
    assert_eq!(last.title, "Export Failed");
    assert!(last.is_error());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_export_waits_generation_delay() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default())
        .with_exporter(CertificateExporter::new(Duration::from_secs(2)));
    let mut surface = RecordingSurface::default();

    app.run_once(&mut surface, false).await.unwrap();
    let before = Instant::now();
    app.export_current(&mut surface).await.unwrap();

    assert_eq!(before.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_export_without_record_rejected() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    let err = app.export_current(&mut surface).await.unwrap_err();
    assert!(matches!(err, SimError::InvalidTransition { action: "export", .. }));
    assert!(surface.notices.is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_new_wipe_discards_record() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    app.run_once(&mut surface, false).await.unwrap();
    app.new_wipe().unwrap();

    assert_eq!(app.router().screen(), &Screen::Home);
    assert!(app.new_wipe().is_err(), "reset from home is rejected");
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_second_run_produces_new_record() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    let first = app.run_once(&mut surface, false).await.unwrap();
    // Starting again straight from the certificate screen is allowed
    app.start_wipe(&mut surface).await.unwrap();
    assert!(app.router().record().is_none());

    let second = app.run_progress(&mut surface).await.unwrap();
    assert_ne!(first.id, second.id);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_run_progress_requires_progress_screen() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    let err = app.run_progress(&mut surface).await.unwrap_err();
    assert!(matches!(err, SimError::InvalidTransition { screen: "home", .. }));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_interrupt_cancels_simulation() {
    reset_interrupted();
    let mut app = WiperApp::with_target(default_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();
    app.start_wipe(&mut surface).await.unwrap();

    let interrupter = tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        set_interrupted();
    });

    let err = app.run_progress(&mut surface).await.unwrap_err();
    interrupter.await.unwrap();
    reset_interrupted();

    assert!(matches!(err, SimError::Cancelled));
    assert_eq!(app.router().screen(), &Screen::Progress);
    assert!(app.router().record().is_none());
    // Roughly 25 ticks happened before the interrupt was noticed
    assert!(surface.redraws > 20 && surface.redraws < 30, "redraws {}", surface.redraws);
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_interactive_session() {
    reset_interrupted();
    let target = MemoryTarget::default();
    let saved = target.saved.clone();
    let mut app = WiperApp::with_target(fast_config(), target);
    let mut surface = RecordingSurface::default();

    // start, export, new wipe, quit
    let input: &[u8] = b"\ne\nn\nq\n";
    app.run_interactive(&mut surface, input).await.unwrap();

    assert_eq!(app.router().screen(), &Screen::Home);
    assert_eq!(saved.lock().unwrap().len(), 1);
    assert_eq!(
        surface.notice_titles(),
        vec!["Security Check Complete", "Generating...", "Certificate Exported"]
    );
    assert!(surface.frames.iter().any(|f| f.contains("Wipe Completed Successfully")));
    assert!(surface.last_frame().contains("ISO 27001"));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_interactive_export_failure_keeps_running() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), FailingTarget);
    let mut surface = RecordingSurface::default();

    let input: &[u8] = b"start\ne\nq\n";
    app.run_interactive(&mut surface, input).await.unwrap();

    assert!(matches!(app.router().screen(), Screen::Certificate(_)));
    assert!(surface.notice_titles().contains(&"Export Failed"));
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_interactive_end_of_input_quits() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    let input: &[u8] = b"";
    app.run_interactive(&mut surface, input).await.unwrap();

    assert_eq!(app.router().screen(), &Screen::Home);
    assert!(surface.notices.is_empty());
}

#[tokio::test(start_paused = true)]
#[serial]
async fn test_interactive_unknown_command_notifies() {
    reset_interrupted();
    let mut app = WiperApp::with_target(fast_config(), MemoryTarget::default());
    let mut surface = RecordingSurface::default();

    let input: &[u8] = b"format c:\nq\n";
    app.run_interactive(&mut surface, input).await.unwrap();

    assert_eq!(surface.notice_titles(), vec!["Unknown command"]);
}
