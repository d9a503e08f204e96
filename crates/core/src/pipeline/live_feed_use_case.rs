use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::processing::domain::display_converter::DisplayConverter;
use crate::processing::domain::filter_mode::FilterMode;
use crate::processing::domain::frame_processor::FrameProcessor;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

/// Control messages applied between ticks, never during one.
#[derive(Debug, Clone, Copy)]
pub enum ProcessorCommand {
    SetMode(FilterMode),
    SetThreshold(u8),
}

pub struct LiveFeedConfig {
    /// Tick pacing, measured tick start to tick start.
    pub interval: Duration,
    pub commands: Receiver<ProcessorCommand>,
    pub cancelled: Arc<AtomicBool>,
    /// Receives each display-ready frame; returning `false` ends the feed.
    pub on_frame: Box<dyn FnMut(Frame) -> bool + Send>,
}

/// The capture-process-display loop.
///
/// Owns the frame source exclusively for its whole run. Each tick runs
/// strictly in sequence: cancellation check, command drain, read, process,
/// convert, deliver. An empty read skips the tick; a processing failure is
/// logged and skipped; the next tick retries either way. The source is
/// released on every exit path.
pub struct LiveFeedUseCase {
    source: Box<dyn FrameSource>,
    processor: FrameProcessor,
    converter: Box<dyn DisplayConverter>,
}

impl LiveFeedUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        processor: FrameProcessor,
        converter: Box<dyn DisplayConverter>,
    ) -> Self {
        Self {
            source,
            processor,
            converter,
        }
    }

    pub fn run(&mut self, mut config: LiveFeedConfig) -> Result<(), Box<dyn std::error::Error>> {
        if let Err(e) = self.source.open() {
            self.source.release();
            return Err(e);
        }
        log::info!("live feed started, tick interval {:?}", config.interval);

        let outcome = self.tick_loop(&mut config);
        self.source.release();
        log::info!("live feed stopped");
        outcome
    }

    fn tick_loop(&mut self, config: &mut LiveFeedConfig) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let tick_started = Instant::now();
            if config.cancelled.load(Ordering::Relaxed) {
                return Ok(());
            }
            self.apply_commands(&config.commands);

            match self.source.read_frame() {
                Ok(Some(frame)) => {
                    let tick = frame.tick();
                    match self.process(&frame) {
                        Ok(display) => {
                            if config.cancelled.load(Ordering::Relaxed) {
                                return Ok(());
                            }
                            if !(config.on_frame)(display) {
                                return Ok(());
                            }
                        }
                        Err(e) => log::warn!("tick {tick}: processing failed: {e}"),
                    }
                }
                Ok(None) => log::debug!("no frame this tick"),
                Err(e) => log::warn!("frame read failed: {e}"),
            }

            let elapsed = tick_started.elapsed();
            if elapsed < config.interval {
                thread::sleep(config.interval - elapsed);
            }
        }
    }

    fn apply_commands(&mut self, commands: &Receiver<ProcessorCommand>) {
        while let Ok(command) = commands.try_recv() {
            match command {
                ProcessorCommand::SetMode(mode) => {
                    if let Err(e) = self.processor.set_mode(mode) {
                        log::warn!("mode change ignored: {e}");
                    }
                }
                ProcessorCommand::SetThreshold(value) => self.processor.set_threshold(value),
            }
        }
    }

    fn process(&mut self, frame: &Frame) -> Result<Frame, Box<dyn std::error::Error>> {
        let processed = self.processor.process(frame)?;
        self.converter.to_display(&processed)
    }
}
