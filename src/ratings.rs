//! Rating store: the append-only event log plus the per-slot cached value.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{FieldError, FieldResult};
use crate::layout::WordSlot;

/// A rating in 1..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> FieldResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FieldError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = FieldError;

    fn try_from(value: u8) -> FieldResult<Self> {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatingEvent {
    pub word: String,
    pub rating: Rating,
    /// Milliseconds since the Unix epoch.
    pub ts: f64,
}

#[derive(Clone, Debug, Default)]
pub struct RatingStore {
    events: Vec<RatingEvent>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and refresh the cached rating of every slot showing `word`.
    pub fn submit(
        &mut self,
        slots: &mut [WordSlot],
        word: &str,
        rating: Rating,
        ts: f64,
    ) -> &RatingEvent {
        self.events.push(RatingEvent {
            word: word.to_owned(),
            rating,
            ts,
        });
        set_cached(slots, word, Some(rating));
        log::debug!("rating saved: {word} = {}", rating.get());
        &self.events[self.events.len() - 1]
    }

    /// Drop the cached rating for `word`. The log is untouched.
    pub fn clear(&self, slots: &mut [WordSlot], word: &str) {
        set_cached(slots, word, None);
    }

    pub fn events(&self) -> &[RatingEvent] {
        &self.events
    }

    /// Most recent logged rating for `word`, if any.
    pub fn latest(&self, word: &str) -> Option<Rating> {
        self.events
            .iter()
            .rev()
            .find(|e| e.word == word)
            .map(|e| e.rating)
    }

    pub fn to_json(&self) -> crate::FieldResult<String> {
        Ok(serde_json::to_string(&self.events)?)
    }
}

fn set_cached(slots: &mut [WordSlot], word: &str, rating: Option<Rating>) {
    for slot in slots.iter_mut().filter(|s| s.text == word) {
        slot.rating = rating;
    }
}

/// Copy cached ratings from `old` slots onto `new` slots with the same text.
/// Slot identity does not survive a relayout, so the text is the only key.
pub fn carry_over(old: &[WordSlot], new: &mut [WordSlot]) {
    let by_text: HashMap<&str, Rating> = old
        .iter()
        .filter_map(|s| s.rating.map(|r| (s.text.as_str(), r)))
        .collect();
    if by_text.is_empty() {
        return;
    }
    for slot in new.iter_mut() {
        slot.rating = by_text.get(slot.text.as_str()).copied();
    }
}
