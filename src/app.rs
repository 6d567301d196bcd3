// The main loop, written against two small traits so it runs the same with a real
// camera + window or with in-memory fakes.
//
// One iteration: check window -> grab frame -> mirror -> pipeline -> present -> poll key.
// Everything is single-threaded; the only blocking calls are the frame grab and the
// window update.

use std::time::{Duration, Instant};

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::pipeline::DrawingPipeline;
use crate::types::Frame;

/// Something that produces camera frames.
pub trait FrameSource {
    /// Blocks until the next frame is available. An error means the stream is over.
    fn next_frame(&mut self) -> Result<Frame>;

    /// Resolution actually delivered (may differ from what was requested).
    fn resolution(&self) -> (u32, u32);
}

/// Something that shows images and reports key presses.
pub trait DisplaySink {
    fn present(&mut self, image: &RgbImage) -> Result<()>;

    /// False once the user closed the window.
    fn is_visible(&self) -> bool;

    /// At most one command per call; `None` when no relevant key was pressed.
    fn poll_key(&mut self) -> Option<Command>;
}

/// Key commands understood by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `Q` or `Esc`.
    Quit,
    /// `C`: wipe the canvas.
    Clear,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    QuitKey,
    WindowClosed,
    EndOfStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub stop: StopReason,
}

/// Counts frames and reports the rate roughly once per second.
struct FpsMeter {
    since: Instant,
    frames: u32,
}

impl FpsMeter {
    fn new() -> Self {
        Self {
            since: Instant::now(),
            frames: 0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.since);
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames as f32 / elapsed.as_secs_f32();
            debug!("FPS: {:.1}", fps);
            self.frames = 0;
            self.since = now;
        }
    }
}

/// Run until the user quits, closes the window, or the camera stops delivering.
/// Presenting to the window is the only failure that is returned as an error.
pub fn run<S, D>(
    source: &mut S,
    sink: &mut D,
    pipeline: &mut DrawingPipeline,
    mirror: bool,
) -> Result<SessionStats>
where
    S: FrameSource,
    D: DisplaySink,
{
    let mut frames = 0u64;
    let mut fps = FpsMeter::new();

    let stop = loop {
        if !sink.is_visible() {
            break StopReason::WindowClosed;
        }

        let mut frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("{e}; stopping");
                break StopReason::EndOfStream;
            }
        };
        if mirror {
            frame.mirror();
        }

        let output = pipeline.process(&frame);
        sink.present(&output.image)?;
        frames += 1;
        fps.tick();

        match sink.poll_key() {
            Some(Command::Quit) => break StopReason::QuitKey,
            Some(Command::Clear) => pipeline.clear_canvas(),
            None => {}
        }
    };

    info!(frames, reason = ?stop, "session finished");
    Ok(SessionStats { frames, stop })
}
