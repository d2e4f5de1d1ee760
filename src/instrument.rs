//! Instrument
//!
//! Stringed and keyboard instruments, and the finger assignments a voicing
//! is made of.

use crate::pitch::{Pitch, PitchError};
use std::fmt::Display;

/// One string stopped at a fret.
///
/// `note` is derived from `string` and `position` and validated on
/// construction, so it is always in range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Finger {
    position: u8,
    string: Pitch,
}

impl Finger {
    /// Stop the string tuned to `string` at fret `position`.
    pub fn new(string: Pitch, position: u8) -> Result<Self, PitchError> {
        string.transpose(position as i32)?;
        Ok(Finger { position, string })
    }

    /// Fret offset from the open string.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Open pitch of the string this finger is on.
    pub fn string(&self) -> Pitch {
        self.string
    }

    /// Pitch that sounds.
    pub fn note(&self) -> Pitch {
        Pitch(self.string.0 + self.position)
    }

    /// The same string stopped `frets` higher.
    pub fn advanced(&self, frets: u8) -> Result<Self, PitchError> {
        let position = self.position as i32 + frets as i32;
        let position = u8::try_from(position).map_err(|_| PitchError::OutOfRange {
            value: self.string.0 as i32 + position,
            min: Pitch::MIN.0,
            max: Pitch::MAX.0,
        })?;
        Finger::new(self.string, position)
    }
}

/// One finger per string, in the instrument's string order.
pub type Fingering = Vec<Finger>;

/// An instrument the chord can be shown on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    /// Fretted or fingerboard instrument with a fixed tuning. Order and
    /// duplicate open pitches are significant.
    Stringed {
        /// Display name, also the instrument's identity.
        name: String,
        /// Open-string pitches, in diagram order.
        strings: Vec<Pitch>,
    },
    /// Keyboard; no strings, never voiced.
    Keyboard {
        /// Display name, also the instrument's identity.
        name: String,
    },
}

const fn p(midi: u8) -> Pitch {
    Pitch(midi)
}

/// (name, open strings) for the stringed presets, in picker order.
const STRINGED_PRESETS: &[(&str, &[Pitch])] = &[
    ("Guitar", &[p(40), p(45), p(50), p(55), p(59), p(64)]),
    ("Ukulele", &[p(67), p(60), p(64), p(81)]),
    ("Baritone Ukulele", &[p(50), p(55), p(59), p(64)]),
    ("Banjo", &[p(50), p(55), p(71), p(62)]),
    ("Mandolin", &[p(55), p(62), p(81), p(76)]),
    ("Bass", &[p(28), p(33), p(38), p(43)]),
    ("Violin", &[p(55), p(62), p(81), p(76)]),
    ("Viola", &[p(48), p(55), p(62), p(81)]),
    ("Cello", &[p(36), p(43), p(50), p(69)]),
    ("Dulcimer (DAA)", &[p(69), p(69), p(50)]),
    ("Dulcimer (DAD)", &[p(62), p(69), p(50)]),
    ("Lute", &[p(40), p(45), p(50), p(54), p(59), p(64)]),
    ("Balalaika", &[p(64), p(64), p(69)]),
];

const PIANO: &str = "Piano";

impl Instrument {
    /// A stringed instrument with the given tuning.
    pub fn stringed(name: impl Into<String>, strings: Vec<Pitch>) -> Self {
        Instrument::Stringed {
            name: name.into(),
            strings,
        }
    }

    /// A keyboard instrument.
    pub fn keyboard(name: impl Into<String>) -> Self {
        Instrument::Keyboard { name: name.into() }
    }

    /// Built-in instruments, in picker order; the piano comes last.
    pub fn presets() -> Vec<Instrument> {
        STRINGED_PRESETS
            .iter()
            .map(|&(name, strings)| Instrument::stringed(name, strings.to_vec()))
            .chain(std::iter::once(Instrument::keyboard(PIANO)))
            .collect()
    }

    /// Look a preset up by name.
    pub fn preset(name: &str) -> Option<Instrument> {
        Self::presets().into_iter().find(|i| i.name() == name)
    }

    /// Look a preset up by name, falling back to the first preset (guitar)
    /// for a stale or unknown stored name.
    pub fn preset_or_default(name: &str) -> Instrument {
        Self::preset(name).unwrap_or_default()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Instrument::Stringed { name, .. } | Instrument::Keyboard { name } => name,
        }
    }

    /// Identity used for caching and settings; the name.
    pub fn id(&self) -> &str {
        self.name()
    }

    /// Open strings, or `None` for a keyboard.
    pub fn strings(&self) -> Option<&[Pitch]> {
        match self {
            Instrument::Stringed { strings, .. } => Some(strings),
            Instrument::Keyboard { .. } => None,
        }
    }

    /// Number of strings; zero for a keyboard.
    pub fn string_count(&self) -> usize {
        self.strings().map_or(0, <[Pitch]>::len)
    }

    /// Largest chord this instrument can sound in full, `None` if unbounded.
    pub fn voice_limit(&self) -> Option<usize> {
        match self {
            Instrument::Stringed { strings, .. } => Some(strings.len()),
            Instrument::Keyboard { .. } => None,
        }
    }
}

impl Default for Instrument {
    fn default() -> Self {
        let (name, strings) = STRINGED_PRESETS[0];
        Instrument::stringed(name, strings.to_vec())
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
