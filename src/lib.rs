//! # chord_voicing
//!
//! Turn a chord into something you can play: one fret per string on a
//! stringed instrument, or key positions on a piano.
//!
//! ## Example
//! ```rust
//! use chord_voicing::{Chord, ChordThird, ChordType, Instrument, PitchClass, VoicingEngine};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Pick an instrument and a chord
//!     let uke = Instrument::preset_or_default("Ukulele");
//!     let chord = Chord::new(PitchClass::A, ChordType::triad(ChordThird::Minor, Default::default()));
//!
//!     // 2) Build an engine (or use VoicingEngine::new())
//!     let engine = VoicingEngine::builder()
//!         .fret_window(12)
//!         .build()?;
//!
//!     // 3) Voice it with the playing window at the nut
//!     for finger in engine.fingerings(&uke, &chord, 0)? {
//!         println!("{} string: fret {} ({})", finger.string(), finger.position(), finger.note());
//!     }
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```
//!
//! ## Features
//! - `serde`: `Serialize`/`Deserialize` for pitches, chord types and instruments

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Pitch arithmetic.
pub use pitch::{Accidental, Pitch, PitchClass, PitchError, SEMITONES};

/// Chord model.
pub use chord::{Chord, ChordFifth, ChordSeventh, ChordSuspended, ChordThird, ChordType};

/// Instruments and fingerings.
pub use instrument::{Finger, Fingering, Instrument};

/// Voicing engine.
pub use voicing::{
    apply_replacement, RepairOutcome, Voicing, VoicingEngine, VoicingEngineBuilder, VoicingError,
};

/// Fingering cache.
pub use cache::FingeringCache;

/// Pitch classes, pitches and distances.
pub mod pitch;

/// Chord qualities and members.
pub mod chord;

/// Stringed and keyboard instruments.
pub mod instrument;

/// Fingering computation.
pub mod voicing;

/// Piano key placement.
pub mod keyboard;

/// Caller-owned fingering cache.
pub mod cache;
