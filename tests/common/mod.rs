//! Hardware fakes shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use myrtio_saber::color::OFF;
use myrtio_saber::{
    AudioCue, AudioError, Clock, Controls, Cue, Duration, GestureSample, Instant, MotionSensor,
    OutputDriver, Rgb, SensorError, Voice,
};

/// Shared fake monotonic time, in microseconds
#[derive(Clone, Default)]
pub struct Timeline(Rc<Cell<u64>>);

impl Timeline {
    pub fn now(&self) -> Instant {
        Instant::from_micros(self.0.get())
    }

    pub fn micros(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, duration: Duration) {
        self.0.set(self.0.get() + duration.as_micros());
    }
}

/// Clock that moves forward by `step` on every read
pub struct FakeClock {
    timeline: Timeline,
    step: Duration,
}

impl FakeClock {
    pub fn new(timeline: Timeline, step: Duration) -> Self {
        Self { timeline, step }
    }
}

impl Clock for FakeClock {
    fn now(&mut self) -> Instant {
        let now = self.timeline.now();
        self.timeline.advance(self.step);
        now
    }

    fn sleep(&mut self, duration: Duration) {
        self.timeline.advance(duration);
    }
}

/// Output driver that keeps every presented frame
#[derive(Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgb>>,
    pub enabled: Vec<bool>,
}

impl RecordingDriver {
    pub fn last_frame(&self) -> &[Rgb] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl OutputDriver for RecordingDriver {
    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled.push(enabled);
    }
}

pub fn lit(frame: &[Rgb]) -> usize {
    frame.iter().filter(|cell| **cell != OFF).count()
}

/// Whether the frame is a lit run from cell 0 followed by dark cells
pub fn is_prefix_run(frame: &[Rgb], color: Rgb) -> bool {
    let count = lit(frame);
    frame[..count].iter().all(|cell| *cell == color) && frame[count..].iter().all(|cell| *cell == OFF)
}

/// Buttons replaying a script of levels, released once the script runs out
#[derive(Default)]
pub struct ScriptedControls {
    primary: VecDeque<bool>,
    secondary: VecDeque<bool>,
    pub primary_polls: usize,
}

impl ScriptedControls {
    pub fn new(primary: &[bool], secondary: &[bool]) -> Self {
        Self {
            primary: primary.iter().copied().collect(),
            secondary: secondary.iter().copied().collect(),
            primary_polls: 0,
        }
    }
}

impl Controls for ScriptedControls {
    fn primary_pressed(&mut self) -> bool {
        self.primary_polls += 1;
        self.primary.pop_front().unwrap_or(false)
    }

    fn secondary_pressed(&mut self) -> bool {
        self.secondary.pop_front().unwrap_or(false)
    }
}

/// Sensor replaying a script, at rest once the script runs out
#[derive(Default)]
pub struct ScriptedSensor {
    samples: VecDeque<Result<GestureSample, SensorError>>,
    pub reads: usize,
}

impl ScriptedSensor {
    pub fn new(samples: &[Result<GestureSample, SensorError>]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            reads: 0,
        }
    }
}

impl MotionSensor for ScriptedSensor {
    fn read(&mut self) -> Result<GestureSample, SensorError> {
        self.reads += 1;
        self.samples
            .pop_front()
            .unwrap_or(Ok(GestureSample::default()))
    }
}

/// Two-voice audio backend whose cues last for a configured time
pub struct FakeAudio {
    timeline: Timeline,
    lengths: Vec<(Cue, Duration)>,
    missing: Vec<Cue>,
    /// End of playback per voice, hum first
    playing_until: [Option<u64>; 2],
    pub played: Vec<(Cue, bool)>,
    pub levels: Vec<(Voice, u8)>,
    pub stops: Vec<Voice>,
}

impl FakeAudio {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            lengths: Vec::new(),
            missing: Vec::new(),
            playing_until: [None; 2],
            played: Vec::new(),
            levels: Vec::new(),
            stops: Vec::new(),
        }
    }

    pub fn with_length(mut self, cue: Cue, length: Duration) -> Self {
        self.lengths.push((cue, length));
        self
    }

    pub fn with_missing(mut self, cue: Cue) -> Self {
        self.missing.push(cue);
        self
    }

    fn slot(voice: Voice) -> usize {
        match voice {
            Voice::Hum => 0,
            Voice::Effect => 1,
        }
    }
}

impl AudioCue for FakeAudio {
    fn play(&mut self, cue: Cue, looping: bool) -> Result<(), AudioError> {
        if self.missing.contains(&cue) {
            return Err(AudioError::MissingCue(cue));
        }
        self.played.push((cue, looping));
        let length = self
            .lengths
            .iter()
            .find(|(known, _)| *known == cue)
            .map_or(Duration::from_ticks(0), |(_, length)| *length);
        self.playing_until[Self::slot(cue.voice())] = if looping {
            Some(u64::MAX)
        } else {
            Some(self.timeline.micros() + length.as_micros())
        };
        Ok(())
    }

    fn is_playing(&self, voice: Voice) -> bool {
        self.playing_until[Self::slot(voice)].is_some_and(|until| self.timeline.micros() < until)
    }

    fn stop(&mut self, voice: Voice) {
        self.stops.push(voice);
        self.playing_until[Self::slot(voice)] = None;
    }

    fn set_level(&mut self, voice: Voice, level: u8) {
        self.levels.push((voice, level));
    }
}
