//! Weekly availability of one instructor.
//!
//! Stored as a JSONB object keyed by weekday name:
//! `{"Monday": [{"start": "09:00", "end": "17:00"}], ...}`.
//!
//! Windows are addressed by their position in the day's list. Removing a
//! window shifts the later ones down, so an index is only meaningful against
//! the list it was read from. Overlapping windows are currently accepted
//! as-is; nothing here rejects them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::{BookingError, BookingResult, Day, TimeWindow};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(BTreeMap<Day, Vec<TimeWindow>>);

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Windows for a day, in insertion order
    pub fn windows(&self, day: Day) -> &[TimeWindow] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = (Day, &[TimeWindow])> {
        self.0.iter().map(|(day, windows)| (*day, windows.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Builder-style append, handy for fixtures
    pub fn with(mut self, day: Day, window: TimeWindow) -> Self {
        self.append(day, [window]);
        self
    }

    pub fn append(&mut self, day: Day, windows: impl IntoIterator<Item = TimeWindow>) {
        self.0.entry(day).or_default().extend(windows);
    }

    pub fn edit(&mut self, day: Day, index: usize, window: TimeWindow) -> BookingResult<()> {
        let slot = self
            .0
            .get_mut(&day)
            .and_then(|windows| windows.get_mut(index))
            .ok_or(BookingError::SlotNotFound)?;
        *slot = window;
        Ok(())
    }

    pub fn remove(&mut self, day: Day, index: usize) -> BookingResult<TimeWindow> {
        let windows = self.0.get_mut(&day).ok_or(BookingError::SlotNotFound)?;
        if index >= windows.len() {
            return Err(BookingError::SlotNotFound);
        }
        let removed = windows.remove(index);
        if windows.is_empty() {
            self.0.remove(&day);
        }
        Ok(removed)
    }

    /// True when a single window on `day` fully contains `requested`.
    pub fn covers(&self, day: Day, requested: &TimeWindow) -> bool {
        self.windows(day).iter().any(|w| w.contains(requested))
    }
}
