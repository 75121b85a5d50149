use crate::{
    canvas::{Rgba, Surface},
    error::Result,
    game::{Control, Game},
    input::FrameInput,
    render::Renderer,
    stats::FrameStats,
};
use std::{
    io, thread,
    time::{Duration, Instant},
};
use tracing::{debug, info};

/// The device side of the frame loop: screen, input polling and presentation
pub trait Host {
    /// Screen size in pixels, fixed for the whole run
    fn screen_size(&self) -> (u32, u32);
    /// Device state for the frame about to be updated
    fn poll_input(&mut self) -> io::Result<FrameInput>;
    fn present(&mut self, screen: &Surface) -> io::Result<()>;
}

/// Drives update then render once per frame at a target frame rate
pub struct FrameLoop {
    frame_time: Option<Duration>,
    max_frames: Option<u64>,
}

impl FrameLoop {
    /// A loop paced to `frame_rate` frames per second; 0 runs unpaced
    pub fn new(frame_rate: u32) -> Self {
        let frame_time = (frame_rate > 0).then(|| Duration::from_secs(1) / frame_rate);
        Self {
            frame_time,
            max_frames: None,
        }
    }

    /// Stops after `frames` frames even if no quit was requested
    pub fn max_frames(mut self, frames: Option<u64>) -> Self {
        self.max_frames = frames;
        self
    }

    /// Runs frames until a quit is requested, returning the number of frames run
    ///
    /// A quit takes effect once the frame that requested it has been presented.
    pub fn run<H: Host>(&self, host: &mut H, game: &mut Game, renderer: &mut Renderer) -> Result<u64> {
        let (width, height) = host.screen_size();
        let mut screen = Surface::new(width, height, Rgba::BLACK);
        let mut stats = FrameStats::new();
        info!(width, height, frame_time = ?self.frame_time, "starting frame loop");

        let mut frames = 0;
        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                break;
            }
            let start = Instant::now();

            let input = host.poll_input()?;
            let control = game.update(&input);
            renderer.draw(game, &mut screen, &input.mouse)?;
            host.present(&screen)?;
            frames += 1;

            stats.record(game.params().steps, game.board().count_alive());
            if stats.has_report() {
                debug!(report = %stats.report(), "frame stats");
            }
            if control == Control::Quit {
                break;
            }

            if let Some(frame_time) = self.frame_time {
                if let Some(rest) = frame_time.checked_sub(start.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }
        info!(frames, steps = game.params().steps, "frame loop finished");
        Ok(frames)
    }
}
