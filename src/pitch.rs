//! Pitch
//!
//! Pitch classes, absolute pitches and the distance arithmetic the voicing
//! engine and keyboard layout are built on.

use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Number of pitch classes in an octave.
pub const SEMITONES: u8 = 12;

/// Sharp-preferring spelling of each pitch class, indexed by class.
const SHARP_NAMES: [&str; SEMITONES as usize] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat-preferring spelling of each pitch class, indexed by class.
const FLAT_NAMES: [&str; SEMITONES as usize] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Pitch classes of the natural (white key) notes.
const NATURALS: [bool; SEMITONES as usize] = [
    true, false, true, false, true, true, false, true, false, true, false, true,
];

/// Errors from pitch construction, arithmetic and parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PitchError {
    /// A pitch computation left the representable range.
    #[error("pitch {value} is outside the representable range {min}..={max}")]
    OutOfRange {
        /// The value that was computed.
        value: i32,
        /// Lowest representable pitch.
        min: u8,
        /// Highest representable pitch.
        max: u8,
    },

    /// A note name could not be parsed.
    #[error("cannot parse `{input}` as a note name: {msg}")]
    Parse {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        msg: &'static str,
    },
}

/// Spelling preference for notes that sit on a black key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accidental {
    /// No accidental.
    Natural,
    /// Spell black keys as sharps (C#, D#, ...).
    #[default]
    Sharp,
    /// Spell black keys as flats (Db, Eb, ...).
    Flat,
}

/// A note name without octave, one of 12 values.
///
/// Spelling is a display concern: `C#` and `Db` are the same `PitchClass`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct PitchClass(u8);

impl PitchClass {
    /// C
    pub const C: PitchClass = PitchClass(0);
    /// C sharp / D flat
    pub const CS: PitchClass = PitchClass(1);
    /// D
    pub const D: PitchClass = PitchClass(2);
    /// D sharp / E flat
    pub const DS: PitchClass = PitchClass(3);
    /// E
    pub const E: PitchClass = PitchClass(4);
    /// F
    pub const F: PitchClass = PitchClass(5);
    /// F sharp / G flat
    pub const FS: PitchClass = PitchClass(6);
    /// G
    pub const G: PitchClass = PitchClass(7);
    /// G sharp / A flat
    pub const GS: PitchClass = PitchClass(8);
    /// A
    pub const A: PitchClass = PitchClass(9);
    /// A sharp / B flat
    pub const AS: PitchClass = PitchClass(10);
    /// B
    pub const B: PitchClass = PitchClass(11);

    /// All twelve classes starting from C.
    pub const ALL: [PitchClass; SEMITONES as usize] = [
        Self::C, Self::CS, Self::D, Self::DS, Self::E, Self::F,
        Self::FS, Self::G, Self::GS, Self::A, Self::AS, Self::B,
    ];

    /// Reduce any integer to its pitch class.
    pub const fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(SEMITONES as i32) as u8)
    }

    /// The class as a number in `0..12`, C = 0.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Forward distance in semitones: how far to move *up* from `self` to
    /// reach `to`, wrapping at the octave. Always in `0..12`.
    pub const fn distance_to(self, to: PitchClass) -> u8 {
        (to.0 + SEMITONES - self.0) % SEMITONES
    }

    /// Whether this class is a natural (white key) note.
    pub const fn is_natural(self) -> bool {
        NATURALS[self.0 as usize]
    }

    /// Number of natural classes passed moving up from `self` to `to`,
    /// counting `self` but not `to`.
    pub fn whole_distance(self, to: PitchClass) -> u8 {
        (0..self.distance_to(to))
            .filter(|&step| PitchClass::new((self.0 + step) as i32).is_natural())
            .count() as u8
    }

    /// The class moved up by `semitones`, wrapping at the octave.
    pub const fn transpose(self, semitones: u8) -> PitchClass {
        PitchClass((self.0 + semitones % SEMITONES) % SEMITONES)
    }

    /// Name of the class under a spelling preference. `Natural` falls back to
    /// sharps for black keys.
    pub fn spelled(self, accidental: Accidental) -> &'static str {
        match accidental {
            Accidental::Flat => FLAT_NAMES[self.0 as usize],
            Accidental::Sharp | Accidental::Natural => SHARP_NAMES[self.0 as usize],
        }
    }

    /// The accidental this class carries when spelled with `preference`.
    pub fn accidental(self, preference: Accidental) -> Accidental {
        if self.is_natural() {
            Accidental::Natural
        } else if preference == Accidental::Flat {
            Accidental::Flat
        } else {
            Accidental::Sharp
        }
    }

    /// The twelve classes spelled with `accidental`, as a key picker shows them.
    pub fn names(accidental: Accidental) -> [&'static str; SEMITONES as usize] {
        match accidental {
            Accidental::Flat => FLAT_NAMES,
            Accidental::Sharp | Accidental::Natural => SHARP_NAMES,
        }
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spelled(Accidental::Sharp))
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = PitchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < SEMITONES {
            Ok(PitchClass(value))
        } else {
            Err(PitchError::OutOfRange {
                value: value as i32,
                min: 0,
                max: SEMITONES - 1,
            })
        }
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl FromStr for PitchClass {
    type Err = PitchError;

    /// Parse `C`, `c`, `F#`, `Bb`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (class, rest) = parse_class(s)?;
        if !rest.is_empty() {
            return Err(PitchError::Parse {
                input: s.to_string(),
                msg: "unexpected characters after the note name",
            });
        }
        Ok(class)
    }
}

/// Parse a leading letter plus accidentals, returning the class and the
/// unconsumed remainder.
fn parse_class(s: &str) -> Result<(PitchClass, &str), PitchError> {
    let mut chars = s.chars();
    let base: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        Some(_) => {
            return Err(PitchError::Parse {
                input: s.to_string(),
                msg: "note letter must be one of A-G",
            })
        }
        None => {
            return Err(PitchError::Parse {
                input: s.to_string(),
                msg: "empty note name",
            })
        }
    };

    let mut shift = 0;
    let mut rest = chars.as_str();
    loop {
        if let Some(r) = rest.strip_prefix('#') {
            shift += 1;
            rest = r;
        } else if let Some(r) = rest.strip_prefix('b') {
            shift -= 1;
            rest = r;
        } else {
            break;
        }
    }
    Ok((PitchClass::new(base + shift), rest))
}

/// An absolute pitch: a MIDI note number, C4 = 60, A0 = 21.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Pitch(pub(crate) u8);

impl Pitch {
    /// Lowest representable pitch (C-1).
    pub const MIN: Pitch = Pitch(0);
    /// Highest representable pitch (G9).
    pub const MAX: Pitch = Pitch(127);

    /// Build a pitch from a note number, failing outside `0..=127`.
    pub fn new(value: i32) -> Result<Self, PitchError> {
        if (Self::MIN.0 as i32..=Self::MAX.0 as i32).contains(&value) {
            Ok(Pitch(value as u8))
        } else {
            Err(PitchError::OutOfRange {
                value,
                min: Self::MIN.0,
                max: Self::MAX.0,
            })
        }
    }

    /// The note number.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Pitch class of this pitch.
    pub const fn class(self) -> PitchClass {
        PitchClass(self.0 % SEMITONES)
    }

    /// Octave number in scientific pitch notation (C4 is middle C).
    pub const fn octave(self) -> i8 {
        (self.0 / SEMITONES) as i8 - 1
    }

    /// Move by `semitones` (either direction). Never wraps.
    pub fn transpose(self, semitones: i32) -> Result<Pitch, PitchError> {
        Pitch::new(self.0 as i32 + semitones)
    }

    /// Signed chromatic distance from `self` to `other`.
    pub const fn interval_to(self, other: Pitch) -> i32 {
        other.0 as i32 - self.0 as i32
    }

    /// Number of natural pitches in `[self, other)`; negative when `other`
    /// is below `self`.
    ///
    /// ```
    /// use chord_voicing::Pitch;
    ///
    /// let a0: Pitch = "A0".parse().unwrap();
    /// assert_eq!(a0.whole_distance("E1".parse().unwrap()), 4);
    /// assert_eq!(a0.whole_distance("C#1".parse().unwrap()), 3);
    /// ```
    pub fn whole_distance(self, other: Pitch) -> i32 {
        let count = |lo: u8, hi: u8| {
            (lo..hi).filter(|&p| Pitch(p).class().is_natural()).count() as i32
        };
        if other >= self {
            count(self.0, other.0)
        } else {
            -count(other.0, self.0)
        }
    }

    /// Name with octave under a spelling preference, e.g. `Db4`.
    pub fn spelled(self, accidental: Accidental) -> String {
        format!("{}{}", self.class().spelled(accidental), self.octave())
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.class(), self.octave())
    }
}

impl TryFrom<u8> for Pitch {
    type Error = PitchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Pitch::new(value as i32)
    }
}

impl From<Pitch> for u8 {
    fn from(p: Pitch) -> u8 {
        p.0
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    /// Parse scientific pitch notation: `E2`, `F#3`, `Bb-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (class, rest) = parse_class(s)?;
        let octave: i8 = rest.parse().map_err(|_| PitchError::Parse {
            input: s.to_string(),
            msg: "expected an octave number from -128 to 127 after the note name",
        })?;
        let octave = octave as i32;
        // Cb and B# cross the octave boundary relative to their letter.
        let letter_octave_shift = match (s.as_bytes()[0].to_ascii_uppercase(), class) {
            (b'C', PitchClass::B) | (b'C', PitchClass::AS) => -1,
            (b'B', PitchClass::C) | (b'B', PitchClass::CS) => 1,
            _ => 0,
        };
        Pitch::new((octave + 1 + letter_octave_shift) * SEMITONES as i32 + class.0 as i32)
    }
}
