//! Chord
//!
//! Chord qualities and the member pitch classes they imply for a root.

use crate::pitch::{Accidental, PitchClass};
use std::fmt::Display;

/// Quality of the third.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordThird {
    /// Major third, 4 semitones.
    #[default]
    Major,
    /// Minor third, 3 semitones.
    Minor,
}

/// Quality of the fifth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordFifth {
    /// Perfect fifth, 7 semitones.
    #[default]
    Perfect,
    /// Augmented fifth, 8 semitones.
    Augmented,
    /// Diminished fifth, 6 semitones.
    Diminished,
}

/// Quality of the seventh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordSeventh {
    /// Major seventh, 11 semitones.
    Major,
    /// Minor (dominant) seventh, 10 semitones.
    Dominant,
    /// Diminished seventh, 9 semitones.
    Diminished,
}

/// Suspension replacing the third.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordSuspended {
    /// Major second instead of the third.
    Sus2,
    /// Perfect fourth instead of the third.
    Sus4,
}

/// Semitones above the root for the sixth.
const SIXTH_INTERVAL: u8 = 9;

/// (third, label, interval)
const THIRD_TABLE: [(ChordThird, &str, u8); 2] = [
    (ChordThird::Major, "Major", 4),
    (ChordThird::Minor, "Minor", 3),
];

/// (fifth, label, interval)
const FIFTH_TABLE: [(ChordFifth, &str, u8); 3] = [
    (ChordFifth::Perfect, "⊘", 7),
    (ChordFifth::Augmented, "Aug", 8),
    (ChordFifth::Diminished, "Dim", 6),
];

/// (seventh, label, interval)
const SEVENTH_TABLE: [(ChordSeventh, &str, u8); 3] = [
    (ChordSeventh::Major, "Maj7", 11),
    (ChordSeventh::Dominant, "7", 10),
    (ChordSeventh::Diminished, "Dim7", 9),
];

/// (suspension, label, interval)
const SUSPENDED_TABLE: [(ChordSuspended, &str, u8); 2] = [
    (ChordSuspended::Sus2, "Sus 2", 2),
    (ChordSuspended::Sus4, "Sus 4", 5),
];

macro_rules! table_lookup {
    ($ty:ty, $table:ident, $n:expr) => {
        impl $ty {
            /// Every variant, in picker order.
            pub const ALL: [$ty; $n] = {
                let mut all = [$table[0].0; $n];
                let mut i = 0;
                while i < $n {
                    all[i] = $table[i].0;
                    i += 1;
                }
                all
            };

            /// Short label for pickers.
            pub fn label(self) -> &'static str {
                $table[self as usize].1
            }

            /// Semitones above the root.
            pub fn interval(self) -> u8 {
                $table[self as usize].2
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

table_lookup!(ChordThird, THIRD_TABLE, 2);
table_lookup!(ChordFifth, FIFTH_TABLE, 3);
table_lookup!(ChordSeventh, SEVENTH_TABLE, 3);
table_lookup!(ChordSuspended, SUSPENDED_TABLE, 2);

/// Full chord quality: a third (or suspension), a fifth, and optional
/// sixth and seventh.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordType {
    /// Third quality; ignored when `suspended` is set.
    pub third: ChordThird,
    /// Fifth quality.
    pub fifth: ChordFifth,
    /// Whether the major sixth is added.
    pub sixth: bool,
    /// Optional seventh.
    pub seventh: Option<ChordSeventh>,
    /// Optional suspension replacing the third.
    pub suspended: Option<ChordSuspended>,
}

impl ChordType {
    /// Plain triad with the given third and fifth.
    pub fn triad(third: ChordThird, fifth: ChordFifth) -> Self {
        ChordType {
            third,
            fifth,
            ..Default::default()
        }
    }

    /// Semitone offsets above the root, in chord-definition order:
    /// root, third (or suspension), fifth, sixth, seventh.
    pub fn intervals(&self) -> Vec<u8> {
        let mut intervals = vec![0];
        intervals.push(match self.suspended {
            Some(sus) => sus.interval(),
            None => self.third.interval(),
        });
        intervals.push(self.fifth.interval());
        if self.sixth {
            intervals.push(SIXTH_INTERVAL);
        }
        if let Some(seventh) = self.seventh {
            intervals.push(seventh.interval());
        }
        intervals
    }

    /// Number of distinct tones this quality produces.
    pub fn note_count(&self) -> usize {
        Chord::new(PitchClass::C, *self).keys().len()
    }

    /// Drop the extensions (sixth, seventh, suspension) when the chord has
    /// more tones than an instrument with `string_count` strings can sound.
    pub fn fit_to(self, string_count: usize) -> ChordType {
        if self.note_count() > string_count {
            ChordType::triad(self.third, self.fifth)
        } else {
            self
        }
    }

    /// Chord-symbol suffix, e.g. `m7`, `maj7`, `dim`, `6sus4`.
    pub fn suffix(&self) -> String {
        let mut out = String::new();
        let third = match self.suspended {
            Some(_) => ChordThird::Major,
            None => self.third,
        };
        let diminished_triad = third == ChordThird::Minor && self.fifth == ChordFifth::Diminished;
        out.push_str(match (third, self.fifth) {
            (ChordThird::Major, ChordFifth::Perfect) => "",
            (ChordThird::Minor, ChordFifth::Perfect) => "m",
            (ChordThird::Major, ChordFifth::Augmented) => "aug",
            (ChordThird::Minor, ChordFifth::Augmented) => "m#5",
            (ChordThird::Major, ChordFifth::Diminished) => "b5",
            (ChordThird::Minor, ChordFifth::Diminished) => "dim",
        });
        if self.sixth {
            out.push('6');
        }
        match self.seventh {
            Some(ChordSeventh::Major) => out.push_str("maj7"),
            Some(ChordSeventh::Dominant) => out.push('7'),
            Some(ChordSeventh::Diminished) if diminished_triad => out.push('7'),
            Some(ChordSeventh::Diminished) => out.push_str("dim7"),
            None => {}
        }
        match self.suspended {
            Some(ChordSuspended::Sus2) => out.push_str("sus2"),
            Some(ChordSuspended::Sus4) => out.push_str("sus4"),
            None => {}
        }
        out
    }
}

/// A root plus the ordered, distinct pitch classes that make up the chord.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    root: PitchClass,
    keys: Vec<PitchClass>,
}

impl Chord {
    /// Build the chord of `kind` on `root`.
    pub fn new(root: PitchClass, kind: ChordType) -> Self {
        let keys = kind
            .intervals()
            .into_iter()
            .map(|interval| root.transpose(interval));
        Self::from_keys(root, keys)
    }

    /// Build a chord from an explicit member list. Duplicates are dropped,
    /// first occurrence wins.
    pub fn from_keys(root: PitchClass, keys: impl IntoIterator<Item = PitchClass>) -> Self {
        let mut distinct: Vec<PitchClass> = Vec::new();
        for key in keys {
            if !distinct.contains(&key) {
                distinct.push(key);
            }
        }
        Chord {
            root,
            keys: distinct,
        }
    }

    /// Root of the chord.
    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Member pitch classes in chord-definition order.
    pub fn keys(&self) -> &[PitchClass] {
        &self.keys
    }

    /// Whether `class` is a chord tone.
    pub fn contains(&self, class: PitchClass) -> bool {
        self.keys.contains(&class)
    }

    /// Chord symbol for `kind` on this root under a spelling preference.
    pub fn notation(&self, kind: &ChordType, accidental: Accidental) -> String {
        format!("{}{}", self.root.spelled(accidental), kind.suffix())
    }
}
