use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use camscope_core::pipeline::live_feed_use_case::{
    LiveFeedConfig, LiveFeedUseCase, ProcessorCommand,
};
use camscope_core::processing::domain::filter_mode::FilterMode;
use camscope_core::processing::infrastructure::opencv_display_converter::OpenCvDisplayConverter;
use camscope_core::processing::infrastructure::processor_factory::ProcessorFactory;
use camscope_core::shared::frame::Frame;
use camscope_core::video::infrastructure::opencv_camera::OpenCvCamera;

/// Messages sent from the capture thread to the UI.
#[derive(Debug)]
pub enum CaptureMessage {
    /// Capture is about to begin; lists modes whose detectors failed to load.
    Started { unavailable: Vec<FilterMode> },
    /// One display-ready RGB frame.
    Frame(Frame),
    Error(String),
    Stopped,
}

pub struct CaptureParams {
    pub device_id: i32,
    pub interval: Duration,
    pub threshold: u8,
    /// Pins cascade lookup to one directory; `None` uses the resolver chain.
    pub cascade_dir: Option<PathBuf>,
}

/// Handle owned by the UI. Dropping it unblocks the worker's frame channel,
/// so `stop()` followed by dropping the handle halts the feed promptly.
pub struct CaptureHandle {
    frames: Receiver<CaptureMessage>,
    commands: Sender<ProcessorCommand>,
    cancelled: Arc<AtomicBool>,
}

impl CaptureHandle {
    pub fn try_next(&self) -> Option<CaptureMessage> {
        self.frames.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<CaptureMessage> {
        self.frames.recv_timeout(timeout).ok()
    }

    pub fn set_mode(&self, mode: FilterMode) {
        let _ = self.commands.send(ProcessorCommand::SetMode(mode));
    }

    pub fn set_threshold(&self, value: u8) {
        let _ = self.commands.send(ProcessorCommand::SetThreshold(value));
    }

    /// Signals the worker to halt and release the device. Idempotent.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Spawn the capture thread for one camera session.
///
/// The frame channel is bounded to a single slot: the worker cannot start
/// the next tick's delivery until the UI has consumed the previous frame.
pub fn spawn(params: CaptureParams) -> CaptureHandle {
    let (tx, rx) = crossbeam_channel::bounded::<CaptureMessage>(1);
    let (command_tx, command_rx) = crossbeam_channel::unbounded::<ProcessorCommand>();
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_worker = cancelled.clone();

    thread::spawn(move || {
        if let Err(e) = run_capture(&tx, command_rx, &cancelled_worker, params) {
            log::error!("capture worker failed: {e}");
            let _ = tx.send(CaptureMessage::Error(e.to_string()));
        }
        let _ = tx.send(CaptureMessage::Stopped);
    });

    CaptureHandle {
        frames: rx,
        commands: command_tx,
        cancelled,
    }
}

fn run_capture(
    tx: &Sender<CaptureMessage>,
    commands: Receiver<ProcessorCommand>,
    cancelled: &Arc<AtomicBool>,
    params: CaptureParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let built = ProcessorFactory::new(params.cascade_dir.clone()).create();
    let mut processor = built.processor;
    processor.set_threshold(params.threshold);

    let unavailable: Vec<FilterMode> = built.unavailable.iter().map(|(m, _)| *m).collect();
    if tx.send(CaptureMessage::Started { unavailable }).is_err() {
        return Ok(());
    }

    let source = OpenCvCamera::new(params.device_id);
    let mut use_case = LiveFeedUseCase::new(
        Box::new(source),
        processor,
        Box::new(OpenCvDisplayConverter::new()),
    );

    let tx_frames = tx.clone();
    use_case.run(LiveFeedConfig {
        interval: params.interval,
        commands,
        cancelled: cancelled.clone(),
        on_frame: Box::new(move |frame| tx_frames.send(CaptureMessage::Frame(frame)).is_ok()),
    })
}
