use std::time::{Duration, Instant};

/// Interval between two rate reports
pub const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// Measures frame and generation rates between reports
pub struct FrameStats {
    frames: u64,
    frames_in_report: u64,
    steps_at_report: u64,
    alive: usize,
    steps: u64,
    last_report: Instant,
}

/// A snapshot of the rates since the previous report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub frames_per_sec: f64,
    pub gens_per_sec: f64,
    pub frames: u64,
    pub steps: u64,
    pub alive: usize,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            frames_in_report: 0,
            steps_at_report: 0,
            alive: 0,
            steps: 0,
            last_report: Instant::now(),
        }
    }

    /// Records a finished frame with the step counter and alive count it ended on
    pub fn record(&mut self, steps: u64, alive: usize) {
        self.frames += 1;
        self.frames_in_report += 1;
        // a clear resets the step counter
        if steps < self.steps {
            self.steps_at_report = 0;
        }
        self.steps = steps;
        self.alive = alive;
    }

    #[inline]
    pub fn has_report(&self) -> bool {
        self.last_report.elapsed() >= REPORT_INTERVAL
    }

    pub fn report(&mut self) -> Report {
        let elapsed = self.last_report.elapsed().as_secs_f64().max(f64::EPSILON);
        let report = Report {
            frames_per_sec: self.frames_in_report as f64 / elapsed,
            gens_per_sec: (self.steps - self.steps_at_report) as f64 / elapsed,
            frames: self.frames,
            steps: self.steps,
            alive: self.alive,
        };

        // reset stats for next report
        self.last_report = Instant::now();
        self.frames_in_report = 0;
        self.steps_at_report = self.steps;
        report
    }
}
impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.02}fps {:.02}gen/s frames:{}, gens:{}, alive:{}",
            self.frames_per_sec, self.gens_per_sec, self.frames, self.steps, self.alive
        )
    }
}
