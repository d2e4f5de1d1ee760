//! Voicing Engine
//!
//! Turns a chord and a tuning into one fret position per string so that, as
//! far as possible, every chord tone sounds somewhere.
//!
//! The engine works in two steps. Placement puts every string on the nearest
//! chord tone at or above the scanning position. Repair then looks for chord
//! tones nobody plays and moves the finger closest (going up the neck) to the
//! missing tone onto it, at most once per string. Fingers only ever move up.

use crate::chord::Chord;
use crate::instrument::{Finger, Fingering, Instrument};
use crate::pitch::{Pitch, PitchClass, PitchError};
use log::{debug, trace};
use thiserror::Error;

/// Errors when computing a fingering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoicingError {
    /// A finger would sound outside the representable pitch range.
    #[error(transparent)]
    Pitch(#[from] PitchError),

    /// The instrument has no strings; keyboard layout does not go through the engine.
    #[error("instrument `{instrument}` has no strings to voice")]
    NotStringed {
        /// Name of the instrument.
        instrument: String,
    },

    /// An invalid argument was provided to a voicing function.
    #[error("invalid argument `{arg}`: {msg}")]
    InvalidArgument {
        /// The name of the invalid argument.
        arg: &'static str,
        /// A description of the invalid argument.
        msg: String,
    },

    /// An error occurred while configuring the engine.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// How a repair run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Every chord tone sounds.
    Complete {
        /// Fingers moved to get there.
        passes: usize,
    },
    /// The pass limit ran out with a tone still missing. The fingering is
    /// kept as a best effort.
    Exhausted {
        /// Fingers moved; equal to the pass limit.
        passes: usize,
        /// First chord tone still not played.
        missing: PitchClass,
    },
}

impl RepairOutcome {
    /// Whether every chord tone sounds.
    pub fn is_complete(&self) -> bool {
        matches!(self, RepairOutcome::Complete { .. })
    }

    /// Fingers moved during repair.
    pub fn passes(&self) -> usize {
        match *self {
            RepairOutcome::Complete { passes } | RepairOutcome::Exhausted { passes, .. } => passes,
        }
    }
}

/// A fingering together with how its repair ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voicing {
    /// One finger per string, in string order.
    pub fingering: Fingering,
    /// Result of the repair loop.
    pub outcome: RepairOutcome,
}

/// Builder for `VoicingEngine`.
pub struct VoicingEngineBuilder {
    repair_limit: Option<usize>,
    fret_window: Option<u8>,
}

impl VoicingEngineBuilder {
    /// Start with default parameters:
    /// repair_limit = one pass per string, no fret window.
    pub fn new() -> Self {
        VoicingEngineBuilder {
            repair_limit: None,
            fret_window: None,
        }
    }

    /// Cap the number of repair passes instead of using the string count.
    pub fn repair_limit(mut self, passes: usize) -> Self {
        self.repair_limit = Some(passes);
        self
    }

    /// Reject scan positions beyond `frets`. Without a window any position
    /// is accepted and only the pitch range limits it.
    pub fn fret_window(mut self, frets: u8) -> Self {
        self.fret_window = Some(frets);
        self
    }

    /// Finalize and create the engine.
    pub fn build(self) -> Result<VoicingEngine, VoicingError> {
        if self.repair_limit == Some(0) {
            return Err(VoicingError::Configuration(
                "repair_limit cannot be zero".into(),
            ));
        }
        if self.fret_window == Some(0) {
            return Err(VoicingError::Configuration(
                "fret_window cannot be zero".into(),
            ));
        }
        Ok(VoicingEngine {
            repair_limit: self.repair_limit,
            fret_window: self.fret_window,
        })
    }
}

impl Default for VoicingEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes fingerings. Holds configuration only; every call is pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicingEngine {
    repair_limit: Option<usize>,
    fret_window: Option<u8>,
}

impl VoicingEngine {
    /// Return a builder to customize the engine.
    pub fn builder() -> VoicingEngineBuilder {
        VoicingEngineBuilder::new()
    }

    /// Create an engine with default settings.
    pub fn new() -> Self {
        VoicingEngine {
            repair_limit: None,
            fret_window: None,
        }
    }

    /// Frets a scan may start within, if limited.
    pub fn fret_window(&self) -> Option<u8> {
        self.fret_window
    }

    /// Fingering of `chord` on `instrument` with the playing window starting
    /// at fret `position`.
    ///
    /// Returns:
    /// - `Err(NotStringed)` for a keyboard.
    /// - `Err(InvalidArgument)` if a fret window is configured and `position`
    ///   is beyond it.
    /// - `Err(Pitch)` if a finger would leave the pitch range.
    ///
    /// An incomplete voicing is not an error; see [`VoicingEngine::voice`].
    pub fn fingerings(
        &self,
        instrument: &Instrument,
        chord: &Chord,
        position: u8,
    ) -> Result<Fingering, VoicingError> {
        let strings = instrument.strings().ok_or_else(|| VoicingError::NotStringed {
            instrument: instrument.name().to_string(),
        })?;
        Ok(self.voice(strings, chord, position)?.fingering)
    }

    /// Place and repair on a raw tuning, reporting how repair ended.
    pub fn voice(
        &self,
        strings: &[Pitch],
        chord: &Chord,
        position: u8,
    ) -> Result<Voicing, VoicingError> {
        if let Some(window) = self.fret_window.filter(|&w| position > w) {
            return Err(VoicingError::InvalidArgument {
                arg: "position",
                msg: format!("must be <= {window}"),
            });
        }
        let mut fingering = self.place(strings, chord, position)?;
        let outcome = self.repair(&mut fingering, chord)?;
        Ok(Voicing { fingering, outcome })
    }

    /// Put each string on its nearest chord tone at or above `position`.
    ///
    /// Strings may share a tone and some tones may be absent. With an empty
    /// chord every string stays at `position`.
    pub fn place(
        &self,
        strings: &[Pitch],
        chord: &Chord,
        position: u8,
    ) -> Result<Fingering, VoicingError> {
        strings
            .iter()
            .map(|&string| -> Result<Finger, VoicingError> {
                let start = string.transpose(position as i32)?.class();
                let offset = chord
                    .keys()
                    .iter()
                    .map(|&key| start.distance_to(key))
                    .min()
                    .unwrap_or(0);
                trace!("string {string}: {start} + {offset} at scan {position}");
                Ok(Finger::new(string, position + offset)?)
            })
            .collect()
    }

    /// First chord tone, in chord order, that no finger plays.
    pub fn missing(fingering: &[Finger], chord: &Chord) -> Option<PitchClass> {
        chord
            .keys()
            .iter()
            .copied()
            .find(|&key| !fingering.iter().any(|f| f.note().class() == key))
    }

    /// Move fingers up onto missing chord tones until none are missing or the
    /// pass limit (one pass per string unless configured) runs out.
    ///
    /// Each pass takes the finger with the smallest forward distance to the
    /// missing tone (lowest index on ties) and moves it up by that distance.
    /// Running this on a complete fingering changes nothing.
    pub fn repair(
        &self,
        fingering: &mut Fingering,
        chord: &Chord,
    ) -> Result<RepairOutcome, VoicingError> {
        if fingering.is_empty() {
            return Ok(RepairOutcome::Complete { passes: 0 });
        }
        let limit = self.repair_limit.unwrap_or(fingering.len());

        let mut passes = 0;
        while passes < limit {
            let Some(missing) = Self::missing(fingering, chord) else {
                return Ok(RepairOutcome::Complete { passes });
            };

            let Some((frets, candidate)) = fingering
                .iter()
                .map(|f| (f.note().class().distance_to(missing), *f))
                .min_by_key(|&(frets, _)| frets)
            else {
                break;
            };

            let replacement = candidate.advanced(frets)?;
            debug!(
                "repair pass {}: {missing} missing, moving {} from fret {} to {}",
                passes + 1,
                candidate.string(),
                candidate.position(),
                replacement.position()
            );
            apply_replacement(fingering, replacement);
            passes += 1;
        }

        match Self::missing(fingering, chord) {
            None => Ok(RepairOutcome::Complete { passes }),
            Some(missing) => {
                debug!("gave up after {passes} passes with {missing} missing");
                Ok(RepairOutcome::Exhausted { passes, missing })
            }
        }
    }
}

impl Default for VoicingEngine {
    fn default() -> Self {
        VoicingEngine::new()
    }
}

/// Put `replacement` back into the slot it belongs to, matched by open
/// string pitch. Duplicate strings are resolved in this order: the last slot,
/// then the first slot, then the last slot whose string matches. Does nothing
/// if no slot matches.
pub fn apply_replacement(fingering: &mut [Finger], replacement: Finger) {
    let string = replacement.string();
    let slot = match (fingering.first(), fingering.last()) {
        (_, Some(last)) if last.string() == string => Some(fingering.len() - 1),
        (Some(first), _) if first.string() == string => Some(0),
        _ => fingering.iter().rposition(|f| f.string() == string),
    };
    if let Some(slot) = slot {
        fingering[slot] = replacement;
    }
}

impl Instrument {
    /// Fingering with the default engine. See [`VoicingEngine::fingerings`].
    pub fn fingerings(&self, chord: &Chord, position: u8) -> Result<Fingering, VoicingError> {
        VoicingEngine::new().fingerings(self, chord, position)
    }
}
