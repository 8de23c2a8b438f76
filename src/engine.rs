use core::convert::Infallible;
use core::fmt;

use crate::audio::{AudioCue, Cue, Voice, play_cue_or_skip};
use crate::clock::Clock;
use crate::color::Rgb;
use crate::config::{ConfigError, SaberConfig};
use crate::fill::{FillAnimator, FillError, FillRequest};
use crate::gesture::{GestureClass, MotionSensor, SensorError, classify};
use crate::hue::HueCounter;
use crate::strip::LightStrip;
use crate::{Controls, OutputDriver};

/// Power state of the blade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Off,
    /// Powered on and armed, showing the idle color
    On { idle_color: Rgb },
}

impl Mode {
    /// Whether gestures are being classified
    pub const fn is_armed(self) -> bool {
        matches!(self, Self::On { .. })
    }
}

/// Phase of the control loop, including the transient ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Off,
    PoweringOn,
    IdleArmed,
    Reacting(GestureClass),
    PoweringOff,
}

/// Mutable state of the control loop
///
/// Owned by the caller and handed to every [`SaberEngine::step`].
#[derive(Debug, Clone)]
pub struct EngineState {
    mode: Mode,
    phase: Phase,
    hue: HueCounter,
    /// Secondary button level seen on the previous poll
    secondary_held: bool,
}

impl EngineState {
    pub const fn new(initial_hue: u8) -> Self {
        Self {
            mode: Mode::Off,
            phase: Phase::Off,
            hue: HueCounter::new(initial_hue),
            secondary_held: false,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn hue(&self) -> HueCounter {
        self.hue
    }

    /// Color shown while armed
    pub const fn idle_color(&self) -> Rgb {
        self.hue.color()
    }

    fn enter(&mut self, phase: Phase) {
        crate::log!("[EngineState] {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

/// What a single [`SaberEngine::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Blade is off and nothing was pressed
    Off,
    PoweredOn,
    PoweredOff,
    /// Idle color changed to the given hue
    Recolored(u8),
    /// A hit or swing reaction ran to completion
    Reacted(GestureClass),
    /// Armed, no gesture
    Idle,
}

/// Error that stops the control loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    Config(ConfigError),
    Fill(FillError),
    Sensor(SensorError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Fill(err) => write!(f, "fill failed: {err}"),
            Self::Sensor(err) => write!(f, "sensor failed: {err}"),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<FillError> for EngineError {
    fn from(err: FillError) -> Self {
        Self::Fill(err)
    }
}

impl From<SensorError> for EngineError {
    fn from(err: SensorError) -> Self {
        Self::Sensor(err)
    }
}

/// Saber engine - the main orchestrator
///
/// Runs on a single control thread. Power transitions and reactions block
/// until they are complete; input arriving meanwhile is dropped.
pub struct SaberEngine<D, C, A, S, B, const N: usize>
where
    D: OutputDriver,
    C: Clock,
    A: AudioCue,
    S: MotionSensor,
    B: Controls,
{
    // External dependencies and configuration
    strip: LightStrip<D, N>,
    clock: C,
    audio: A,
    sensor: S,
    controls: B,
    config: SaberConfig,

    // Internal dependencies
    animator: FillAnimator,
}

impl<D, C, A, S, B, const N: usize> SaberEngine<D, C, A, S, B, N>
where
    D: OutputDriver,
    C: Clock,
    A: AudioCue,
    S: MotionSensor,
    B: Controls,
{
    /// Create a new engine with a dark strip
    ///
    /// Fails if `config` does not pass [`SaberConfig::validate`].
    pub fn new(
        driver: D,
        clock: C,
        audio: A,
        sensor: S,
        controls: B,
        config: SaberConfig,
    ) -> Result<Self, EngineError> {
        let config = config.validate()?;
        let mut strip = LightStrip::new(driver, config.brightness);
        strip.present();
        Ok(Self {
            strip,
            clock,
            audio,
            sensor,
            controls,
            animator: FillAnimator::from_config(&config),
            config,
        })
    }

    /// Fresh state for this engine, powered off
    pub const fn initial_state(&self) -> EngineState {
        EngineState::new(self.config.initial_hue)
    }

    /// Run the control loop forever
    ///
    /// Returns only when a step fails.
    pub fn run(&mut self, state: &mut EngineState) -> Result<Infallible, EngineError> {
        loop {
            self.step(state)?;
        }
    }

    /// Process one poll cycle
    pub fn step(&mut self, state: &mut EngineState) -> Result<StepOutcome, EngineError> {
        if self.controls.primary_pressed() {
            let outcome = match state.mode {
                Mode::Off => {
                    self.power_on(state)?;
                    StepOutcome::PoweredOn
                }
                Mode::On { .. } => {
                    self.power_off(state)?;
                    StepOutcome::PoweredOff
                }
            };
            self.wait_for_release();
            return Ok(outcome);
        }

        let Mode::On { idle_color } = state.mode else {
            return Ok(StepOutcome::Off);
        };

        let secondary = self.controls.secondary_pressed();
        let pressed_now = secondary && !state.secondary_held;
        state.secondary_held = secondary;
        if pressed_now {
            return Ok(StepOutcome::Recolored(self.recolor(state)));
        }
        if secondary {
            // Still held from the recolor, gestures wait for release
            return Ok(StepOutcome::Idle);
        }

        let sample = self.sensor.read()?;
        match classify(sample, state.mode, &self.config.thresholds) {
            GestureClass::Hit => {
                self.react_hit(state, idle_color);
                Ok(StepOutcome::Reacted(GestureClass::Hit))
            }
            GestureClass::Swing => {
                self.react_swing(state, idle_color);
                Ok(StepOutcome::Reacted(GestureClass::Swing))
            }
            GestureClass::Idle => Ok(StepOutcome::Idle),
        }
    }

    fn power_on(&mut self, state: &mut EngineState) -> Result<(), FillError> {
        state.enter(Phase::PoweringOn);
        let idle_color = state.idle_color();
        self.strip.set_enabled(true);

        let request =
            FillRequest::forward(idle_color, self.config.timings.power_on).with_cue(Cue::PowerOn);
        self.animator
            .run(&mut self.strip, &mut self.clock, &mut self.audio, &request)?;
        self.audio.set_level(Voice::Hum, self.config.hum_level);
        play_cue_or_skip(&mut self.audio, Cue::Idle, true);

        state.mode = Mode::On { idle_color };
        state.secondary_held = false;
        state.enter(Phase::IdleArmed);
        Ok(())
    }

    fn power_off(&mut self, state: &mut EngineState) -> Result<(), FillError> {
        state.enter(Phase::PoweringOff);
        self.audio.stop(Voice::Hum);

        let request = FillRequest::reverse(state.idle_color(), self.config.timings.power_off)
            .with_cue(Cue::PowerOff)
            .awaiting_cue();
        self.animator
            .run(&mut self.strip, &mut self.clock, &mut self.audio, &request)?;
        self.strip.set_enabled(false);

        state.mode = Mode::Off;
        state.enter(Phase::Off);
        Ok(())
    }

    /// Step the hue and repaint the blade at once
    fn recolor(&mut self, state: &mut EngineState) -> u8 {
        let hue = state.hue.advance();
        let idle_color = state.idle_color();
        state.mode = Mode::On { idle_color };
        self.show(idle_color);
        crate::log!("[SaberEngine.recolor] hue {}", hue);
        hue
    }

    fn react_hit(&mut self, state: &mut EngineState, idle_color: Rgb) {
        state.enter(Phase::Reacting(GestureClass::Hit));
        let timings = self.config.timings;

        self.show(self.config.hit_color);
        self.clock.sleep(timings.hit_flash);
        self.show(idle_color);
        play_cue_or_skip(&mut self.audio, Cue::Hit, false);
        self.clock.sleep(timings.reaction_settle);
        self.show(idle_color);

        state.enter(Phase::IdleArmed);
    }

    fn react_swing(&mut self, state: &mut EngineState, idle_color: Rgb) {
        state.enter(Phase::Reacting(GestureClass::Swing));

        play_cue_or_skip(&mut self.audio, Cue::Swing, false);
        self.clock.sleep(self.config.timings.reaction_settle);
        self.show(idle_color);

        state.enter(Phase::IdleArmed);
    }

    /// Block until the power button reads released
    ///
    /// Polling at a coarse, fixed interval is deliberate: one physical press
    /// yields exactly one transition however long it is held.
    fn wait_for_release(&mut self) {
        while self.controls.primary_pressed() {
            self.clock.sleep(self.config.timings.debounce_poll);
        }
    }

    fn show(&mut self, color: Rgb) {
        self.strip.fill(color);
        self.strip.present();
    }

    pub fn strip(&self) -> &LightStrip<D, N> {
        &self.strip
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn controls(&self) -> &B {
        &self.controls
    }

    pub const fn config(&self) -> &SaberConfig {
        &self.config
    }
}
