//! Audio cue dispatching
//!
//! Playback itself is an external collaborator behind [`AudioCue`]. The
//! backend mixes two voices: the looping hum and the effects played over
//! it. The engine only starts, stops and polls cues; it never waits on one
//! except during power-off.

use core::fmt;
use core::fmt::Write;

use heapless::String;

const CUE_NAME_POWER_ON: &str = "on";
const CUE_NAME_POWER_OFF: &str = "off";
const CUE_NAME_IDLE: &str = "idle";
const CUE_NAME_HIT: &str = "hit";
const CUE_NAME_SWING: &str = "swing";

const SOUNDS_DIR: &str = "sounds/";
const SOUND_EXTENSION: &str = ".wav";

/// Capacity of a cue resource path
pub const CUE_PATH_CAPACITY: usize = 24;

/// Sound cues known to the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    PowerOn,
    PowerOff,
    /// Background hum, played in a loop while armed
    Idle,
    Hit,
    Swing,
}

/// Mixer voice of the audio backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Voice {
    /// Background hum, kept running under the effects
    Hum,
    /// Power transitions and gesture reactions
    Effect,
}

impl Cue {
    /// Voice the cue plays on
    pub const fn voice(self) -> Voice {
        match self {
            Self::Idle => Voice::Hum,
            _ => Voice::Effect,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PowerOn => CUE_NAME_POWER_ON,
            Self::PowerOff => CUE_NAME_POWER_OFF,
            Self::Idle => CUE_NAME_IDLE,
            Self::Hit => CUE_NAME_HIT,
            Self::Swing => CUE_NAME_SWING,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            CUE_NAME_POWER_ON => Some(Self::PowerOn),
            CUE_NAME_POWER_OFF => Some(Self::PowerOff),
            CUE_NAME_IDLE => Some(Self::Idle),
            CUE_NAME_HIT => Some(Self::Hit),
            CUE_NAME_SWING => Some(Self::Swing),
            _ => None,
        }
    }

    /// Resource path of the cue, e.g. `sounds/hit.wav`
    pub fn file_path(self) -> String<CUE_PATH_CAPACITY> {
        let mut path = String::new();
        // Longest name is 5 bytes, the capacity always fits.
        let _ = write!(path, "{SOUNDS_DIR}{}{SOUND_EXTENSION}", self.as_str());
        path
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by an [`AudioCue`] backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// Sound resource for the cue is missing or unreadable
    MissingCue(Cue),
    /// Playback channel is not available
    Unavailable,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCue(cue) => write!(f, "missing sound for cue `{cue}`"),
            Self::Unavailable => f.write_str("audio output unavailable"),
        }
    }
}

/// Audio playback running alongside the control thread
pub trait AudioCue {
    /// Start playing `cue` on [`Cue::voice`], replacing whatever that voice
    /// was playing
    ///
    /// Looping cues repeat until stopped or replaced. The other voice keeps
    /// playing.
    fn play(&mut self, cue: Cue, looping: bool) -> Result<(), AudioError>;

    /// Whether `voice` is still audible
    fn is_playing(&self, voice: Voice) -> bool;

    /// Stop playback on `voice`
    fn stop(&mut self, voice: Voice);

    /// Set the mix level of `voice` (0-255 = 0.0-1.0)
    fn set_level(&mut self, _voice: Voice, _level: u8) {}
}

/// Start `cue`, carrying on without sound if the backend fails
///
/// A missing sound never aborts the visuals. The failure is logged and
/// dropped here on purpose, so every call site degrades the same way.
pub fn play_cue_or_skip<A: AudioCue>(audio: &mut A, cue: Cue, looping: bool) {
    if let Err(err) = audio.play(cue, looping) {
        crate::log!("[audio] skipping cue {}: {}", cue, err);
    }
}
