//! Eased fill animation
//!
//! Lights (or clears) a contiguous run of cells from the base of the strip
//! so that the lit fraction follows a square-root curve of the elapsed time.
//! The animation is paced by the estimated length of the sound playing next
//! to it and blocks the control thread until it is done.
//!
//! Presenting the strip stalls the clock for a time proportional to the
//! strip length. Every present therefore moves the start of the animation
//! back by `len * latency_per_cell`, so the visual progress keeps up with the
//! sound instead of lagging a little more after each write.

use core::fmt;

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::audio::{AudioCue, Cue, play_cue_or_skip};
use crate::bounds::{CellRange, OutOfBounds};
use crate::clock::Clock;
use crate::color::{OFF, Rgb};
use crate::config::SaberConfig;
use crate::math8::{ease_sqrt, progress, round_half_up};
use crate::strip::LightStrip;

/// Which way the lit run moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    /// Grow the run from the base to the tip (power on)
    Forward,
    /// Shrink the run from the tip to the base (power off)
    Reverse,
}

impl FillDirection {
    /// Boundary that is already rendered before the first frame
    const fn initial_boundary(self, len: usize) -> usize {
        match self {
            Self::Forward => 0,
            Self::Reverse => len,
        }
    }
}

/// Request to animate the strip towards a settled state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillRequest {
    /// Color of the lit run
    pub color: Rgb,
    /// Estimated duration of the accompanying sound
    pub duration: Duration,
    pub direction: FillDirection,
    /// Cue started together with the animation
    pub cue: Option<Cue>,
    /// Block after the animation until the cue stops playing
    pub await_cue: bool,
}

impl FillRequest {
    pub const fn forward(color: Rgb, duration: Duration) -> Self {
        Self {
            color,
            duration,
            direction: FillDirection::Forward,
            cue: None,
            await_cue: false,
        }
    }

    pub const fn reverse(color: Rgb, duration: Duration) -> Self {
        Self {
            color,
            duration,
            direction: FillDirection::Reverse,
            cue: None,
            await_cue: false,
        }
    }

    /// Start `cue` at the first frame of the animation
    #[must_use]
    pub const fn with_cue(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Return only once the cue has stopped playing
    #[must_use]
    pub const fn awaiting_cue(mut self) -> Self {
        self.await_cue = true;
        self
    }

    /// Color of every cell once the animation has settled
    pub const fn settled_color(&self) -> Rgb {
        match self.direction {
            FillDirection::Forward => self.color,
            FillDirection::Reverse => OFF,
        }
    }
}

/// Error returned when a fill cannot run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillError {
    /// Duration is zero
    InvalidDuration,
    /// The lit run moved against the requested direction
    DirectionMismatch {
        direction: FillDirection,
        from: usize,
        to: usize,
    },
    Strip(OutOfBounds),
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration => f.write_str("fill duration must be longer than zero"),
            Self::DirectionMismatch {
                direction,
                from,
                to,
            } => write!(f, "{direction:?} fill moved backwards from {from} to {to}"),
            Self::Strip(err) => write!(f, "{err}"),
        }
    }
}

impl From<OutOfBounds> for FillError {
    fn from(err: OutOfBounds) -> Self {
        Self::Strip(err)
    }
}

/// Number of lit cells `elapsed` into a fill of `len` cells
///
/// Cells `0..lit_cells(..)` are lit, the rest are dark, in both directions.
#[allow(clippy::cast_precision_loss)]
pub fn lit_cells(
    elapsed: Duration,
    duration: Duration,
    direction: FillDirection,
    len: usize,
) -> usize {
    let mut fraction = progress(elapsed, duration);
    if direction == FillDirection::Reverse {
        fraction = 1.0 - fraction;
    }
    round_half_up(len as f32 * ease_sqrt(fraction)).min(len)
}

/// Outcome of a single [`FillTransition::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStep {
    /// Duration elapsed, the strip should settle
    Done,
    /// Boundary did not move, nothing to render
    Hold,
    /// Cells in the range changed and must be rendered
    Advance(CellRange),
}

/// Progress of one fill, advanced by timestamps
#[derive(Debug, Clone)]
pub struct FillTransition {
    direction: FillDirection,
    duration: Duration,
    len: usize,
    start: Instant,
    /// Time lost to presents, added to the measured elapsed time
    compensation: Duration,
    /// First cell not lit
    boundary: usize,
}

impl FillTransition {
    pub fn new(request: &FillRequest, len: usize, start: Instant) -> Result<Self, FillError> {
        if request.duration.as_ticks() == 0 {
            return Err(FillError::InvalidDuration);
        }
        Ok(Self {
            direction: request.direction,
            duration: request.duration,
            len,
            start,
            compensation: Duration::from_ticks(0),
            boundary: request.direction.initial_boundary(len),
        })
    }

    /// Index of the first dark cell
    pub const fn boundary(&self) -> usize {
        self.boundary
    }

    /// Elapsed animation time at `now`, including compensation
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start) + self.compensation
    }

    /// Shift the start of the animation back by `latency`
    pub fn compensate(&mut self, latency: Duration) {
        self.compensation += latency;
    }

    /// Update the boundary for `now`
    pub fn tick(&mut self, now: Instant) -> Result<FillStep, FillError> {
        let elapsed = self.elapsed(now);
        if elapsed > self.duration {
            return Ok(FillStep::Done);
        }

        let threshold = lit_cells(elapsed, self.duration, self.direction, self.len);
        if threshold == self.boundary {
            return Ok(FillStep::Hold);
        }

        let range = match self.direction {
            FillDirection::Forward if threshold > self.boundary => {
                CellRange::new(self.boundary, threshold)
            }
            FillDirection::Reverse if threshold < self.boundary => {
                CellRange::new(threshold, self.boundary)
            }
            direction => {
                return Err(FillError::DirectionMismatch {
                    direction,
                    from: self.boundary,
                    to: threshold,
                });
            }
        };
        self.boundary = threshold;
        Ok(FillStep::Advance(range))
    }
}

/// Statistics of a finished fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Presents issued, including the final settle
    pub presents: u32,
    /// Clock samples that did not move the boundary
    pub frames_skipped: u32,
}

/// Runs [`FillRequest`]s against a strip
#[derive(Debug, Clone, Copy)]
pub struct FillAnimator {
    latency_per_cell: Duration,
    audio_poll: Duration,
}

impl FillAnimator {
    pub const fn new(latency_per_cell: Duration, audio_poll: Duration) -> Self {
        Self {
            latency_per_cell,
            audio_poll,
        }
    }

    pub const fn from_config(config: &SaberConfig) -> Self {
        Self::new(config.present_latency_per_cell, config.timings.audio_poll)
    }

    /// Time a present of `len` cells keeps the clock from advancing
    ///
    /// Depends on the strip length only; the whole strip is rewritten even
    /// when a single cell changed.
    pub fn present_latency(&self, len: usize) -> Duration {
        Duration::from_ticks(self.latency_per_cell.as_ticks() * len as u64)
    }

    /// Animate the strip and block until it has settled
    ///
    /// On success the strip is fully in the settled state of the request and
    /// has been presented. If the request awaits its cue, this also blocks
    /// until the voice of its cue is silent.
    pub fn run<D, C, A, const N: usize>(
        &self,
        strip: &mut LightStrip<D, N>,
        clock: &mut C,
        audio: &mut A,
        request: &FillRequest,
    ) -> Result<FillReport, FillError>
    where
        D: OutputDriver,
        C: Clock,
        A: AudioCue,
    {
        let mut transition = FillTransition::new(request, N, clock.now())?;
        if let Some(cue) = request.cue {
            play_cue_or_skip(audio, cue, false);
        }

        let latency = self.present_latency(N);
        let mut report = FillReport::default();
        loop {
            match transition.tick(clock.now())? {
                FillStep::Done => break,
                FillStep::Hold => {
                    report.frames_skipped = report.frames_skipped.saturating_add(1);
                }
                FillStep::Advance(range) => {
                    strip.set_range(range, request.settled_color())?;
                    strip.present();
                    report.presents += 1;
                    transition.compensate(latency);
                }
            }
        }

        // Clear any rounding residue
        strip.fill(request.settled_color());
        strip.present();
        report.presents += 1;

        if let Some(cue) = request.cue.filter(|_| request.await_cue) {
            while audio.is_playing(cue.voice()) {
                clock.sleep(self.audio_poll);
            }
        }

        crate::log!(
            "[FillAnimator.run] {:?} fill settled after {} presents",
            request.direction,
            report.presents
        );
        Ok(report)
    }
}
