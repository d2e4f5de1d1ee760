//! Fingering Cache
//!
//! Caller-owned memoization for fingerings. The engine itself keeps no state;
//! a UI that recomputes on every frame can hold one of these instead.

use crate::chord::Chord;
use crate::instrument::{Fingering, Instrument};
use crate::pitch::PitchClass;
use crate::voicing::{VoicingEngine, VoicingError};
use log::trace;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    instrument: Instrument,
    root: PitchClass,
    keys: Vec<PitchClass>,
    position: u8,
}

/// Fingerings keyed by instrument, chord and scan position.
///
/// The key holds the whole instrument, tuning included, so two custom
/// instruments sharing a name never share entries.
///
/// Entries are only valid for the engine configuration they were computed
/// with; call [`FingeringCache::clear`] after switching engines.
#[derive(Debug, Default)]
pub struct FingeringCache {
    entries: HashMap<CacheKey, Fingering>,
}

impl FingeringCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached fingering, computing and storing it on a miss.
    /// Errors are not cached.
    pub fn get_or_compute(
        &mut self,
        engine: &VoicingEngine,
        instrument: &Instrument,
        chord: &Chord,
        position: u8,
    ) -> Result<&Fingering, VoicingError> {
        let key = CacheKey {
            instrument: instrument.clone(),
            root: chord.root(),
            keys: chord.keys().to_vec(),
            position,
        };
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                trace!("fingering cache miss for {instrument} at {position}");
                let fingering = engine.fingerings(instrument, chord, position)?;
                Ok(&*entry.insert(fingering))
            }
        }
    }

    /// Number of cached fingerings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
