//! Study session engine.
//!
//! A [`Session`] owns the deck for the active dataset together with the review
//! queue, the cursor, the flip state and the known/unknown classification. All
//! mutation goes through its methods; the presentation layer only reads.
//!
//! The queue holds deck indices. Every index appears exactly once after a
//! reset; marking a card unknown with repeats enabled inserts a duplicate
//! further down the queue.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::export::ExportSnapshot;
use crate::input::{Command, Key};
use crate::repeat::RepeatPolicy;
use crate::types::{CurrentCard, Position, Record, SessionConfig};

/// Review session over a deck of records.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    deck: Vec<Record>,
    queue: Vec<usize>,
    cursor: usize,
    known: Vec<usize>,
    unknown: Vec<usize>,
    started: bool,
    flipped: bool,
    config: SessionConfig,
    policy: RepeatPolicy,
    rng: R,
}

impl Session<StdRng> {
    /// Create an empty session seeded from the operating system.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: RngCore> Session<R> {
    /// Create an empty session drawing shuffles and jitter from `rng`.
    pub fn with_rng(config: SessionConfig, rng: R) -> Self {
        Self {
            deck: Vec::new(),
            queue: Vec::new(),
            cursor: 0,
            known: Vec::new(),
            unknown: Vec::new(),
            started: false,
            flipped: false,
            config,
            policy: RepeatPolicy::default(),
            rng,
        }
    }

    /// Replace the repeat policy.
    pub fn with_policy(mut self, policy: RepeatPolicy) -> Self {
        self.policy = policy;
        self
    }

    // === Lifecycle ===

    /// Replace the deck wholesale and start a fresh session over it.
    pub fn load(&mut self, records: Vec<Record>) {
        self.deck = records;
        self.reset_session();
    }

    /// Rebuild the queue for the current deck and clear all session state.
    pub fn reset_session(&mut self) {
        self.queue = (0..self.deck.len()).collect();
        if self.config.shuffle_enabled {
            self.queue.shuffle(&mut self.rng);
        }
        self.cursor = 0;
        self.flipped = false;
        self.known.clear();
        self.unknown.clear();
        self.started = false;
    }

    /// Begin the session. Refused for an empty deck.
    pub fn start(&mut self) -> bool {
        if !self.deck.is_empty() {
            self.started = true;
        }
        self.started
    }

    // === Navigation ===

    /// Advance to the next queue slot. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if !self.started || self.cursor + 1 >= self.queue.len() {
            return false;
        }
        self.cursor += 1;
        self.flipped = false;
        true
    }

    /// Step back to the previous queue slot. Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        if !self.started || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.flipped = false;
        true
    }

    pub fn toggle_flip(&mut self) {
        if self.started {
            self.flipped = !self.flipped;
        }
    }

    // === Classification ===

    /// Classify the current card as known and advance.
    ///
    /// With repeats enabled this also clears a pending unknown mark.
    pub fn mark_known(&mut self) {
        let Some(index) = self.active_index() else {
            return;
        };
        insert_unique(&mut self.known, index);
        if self.config.repeat_unknown_enabled {
            self.unknown.retain(|&i| i != index);
        }
        self.next();
    }

    /// Classify the current card as unknown and advance.
    ///
    /// With repeats enabled a duplicate of the card is queued later in the
    /// session before advancing.
    pub fn mark_unknown(&mut self) {
        let Some(index) = self.active_index() else {
            return;
        };
        insert_unique(&mut self.unknown, index);
        if self.config.repeat_unknown_enabled {
            let jitter = self.rng.random_range(0..=self.policy.max_jitter);
            let at = self
                .policy
                .insertion_point(self.cursor, self.queue.len(), jitter);
            self.queue.insert(at, index);
        }
        self.next();
    }

    // === Dispatch ===

    /// Apply the operation bound to `key`, if any.
    ///
    /// Inert until the session has started. Returns the applied command.
    pub fn dispatch(&mut self, key: Key) -> Option<Command> {
        if !self.started {
            return None;
        }
        let command = Command::from_key(key)?;
        self.apply(command);
        Some(command)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleFlip => self.toggle_flip(),
            Command::Next => {
                self.next();
            }
            Command::Prev => {
                self.prev();
            }
            Command::MarkKnown => self.mark_known(),
            Command::MarkUnknown => self.mark_unknown(),
        }
    }

    // === Configuration ===

    /// Changing the shuffle setting invalidates the queue and resets the session.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.config.shuffle_enabled != enabled {
            self.config.shuffle_enabled = enabled;
            self.reset_session();
        }
    }

    pub fn set_repeat_unknown(&mut self, enabled: bool) {
        self.config.repeat_unknown_enabled = enabled;
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.config.reversed = reversed;
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    // === Derived state ===

    /// Deck index under the cursor, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.queue.get(self.cursor).copied()
    }

    /// The card under the cursor, oriented according to `reversed`.
    pub fn current_card(&self) -> Option<CurrentCard<'_>> {
        let index = self.current_index()?;
        let record = self.deck.get(index)?;
        let (question, answer) = if self.config.reversed {
            (record.answer.as_str(), record.question.as_str())
        } else {
            (record.question.as_str(), record.answer.as_str())
        };
        Some(CurrentCard {
            index,
            question,
            answer,
        })
    }

    /// Position-based progress, `round(cursor / len * 100)`.
    ///
    /// Stays below 100 on the last card.
    pub fn progress_percent(&self) -> u8 {
        if self.queue.is_empty() {
            return 0;
        }
        (self.cursor as f64 / self.queue.len() as f64 * 100.0).round() as u8
    }

    pub fn position(&self) -> Position {
        Position {
            current: if self.started { self.cursor + 1 } else { 0 },
            total: self.queue.len(),
        }
    }

    /// True once the cursor rests on the final queue slot of a started session.
    pub fn is_at_end(&self) -> bool {
        self.started && !self.queue.is_empty() && self.cursor == self.queue.len() - 1
    }

    pub fn records(&self) -> &[Record] {
        &self.deck
    }

    pub fn queue(&self) -> &[usize] {
        &self.queue
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn known(&self) -> &[usize] {
        &self.known
    }

    pub fn unknown(&self) -> &[usize] {
        &self.unknown
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    pub fn unknown_count(&self) -> usize {
        self.unknown.len()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Snapshot of the classification for export.
    pub fn export_snapshot(&self, now: DateTime<Utc>) -> ExportSnapshot {
        ExportSnapshot {
            known: self.known.clone(),
            unknown: self.unknown.clone(),
            total: self.deck.len(),
            timestamp: now,
        }
    }

    fn active_index(&self) -> Option<usize> {
        if !self.started {
            return None;
        }
        self.current_index()
    }
}

fn insert_unique(set: &mut Vec<usize>, index: usize) {
    if !set.contains(&index) {
        set.push(index);
    }
}
