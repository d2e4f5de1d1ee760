//! Keyboard
//!
//! Where chord tones land on a piano keyboard. Rows count white keys from the
//! bottom of the keyboard; black keys sit on the boundary just above the row
//! they are given.

use crate::chord::Chord;
use crate::pitch::{Accidental, Pitch, PitchClass};

/// Lowest key of an 88-key piano (A0).
pub const PIANO_BASE: Pitch = Pitch(21);

/// Keys on a full piano.
pub const PIANO_KEYS: u8 = 88;

/// Color of a piano key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyColor {
    /// Natural note.
    White,
    /// Sharp or flat.
    Black,
}

impl KeyColor {
    /// Color of the key for `class`.
    pub fn of(class: PitchClass) -> Self {
        if class.is_natural() {
            KeyColor::White
        } else {
            KeyColor::Black
        }
    }
}

/// A chord tone placed on the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPlacement {
    /// The chord tone.
    pub key: PitchClass,
    /// Label under the configured spelling.
    pub label: &'static str,
    /// White keys between the base key and this one.
    pub row: u8,
    /// Key color.
    pub color: KeyColor,
}

/// A physical key of the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PianoKey {
    /// Pitch of the key.
    pub pitch: Pitch,
    /// Key color.
    pub color: KeyColor,
}

/// Place each chord tone within the octave starting at `base`, in chord
/// order.
pub fn place_keys(chord: &Chord, base: PitchClass, accidental: Accidental) -> Vec<KeyPlacement> {
    chord
        .keys()
        .iter()
        .map(|&key| KeyPlacement {
            key,
            label: key.spelled(accidental),
            row: base.whole_distance(key),
            color: KeyColor::of(key),
        })
        .collect()
}

/// The keys of a full piano, lowest first.
pub fn piano_keys() -> impl Iterator<Item = PianoKey> {
    (0..PIANO_KEYS).map(|offset| {
        let pitch = Pitch(PIANO_BASE.0 + offset);
        PianoKey {
            pitch,
            color: KeyColor::of(pitch.class()),
        }
    })
}

/// Number of white keys on a full piano.
pub fn white_key_count() -> usize {
    piano_keys().filter(|k| k.color == KeyColor::White).count()
}
