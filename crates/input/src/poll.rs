//! Per-tick intent collection.
//!
//! [`TerminalInput::poll_tick`] doubles as the tick sleep: it waits out the
//! whole budget, folding every key press that arrives meanwhile into one
//! [`IntentSet`].

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::trace;

use crate::map::intent_for_key;
use crate::types::IntentSet;

/// Events drained in one tick before the rest are left for the next.
const MAX_EVENTS_PER_TICK: usize = 64;

/// Where terminal events come from.
pub trait EventSource {
    /// Wait up to `timeout` for an event; `true` if one is ready.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;
    fn read(&mut self) -> Result<Event>;
}

/// The process terminal, through `crossterm::event`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

#[derive(Debug)]
pub struct TerminalInput<E: EventSource = TerminalEvents> {
    events: E,
    resized: bool,
}

impl TerminalInput<TerminalEvents> {
    pub fn new() -> Self {
        Self::with_source(TerminalEvents)
    }
}

impl Default for TerminalInput<TerminalEvents> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventSource> TerminalInput<E> {
    pub fn with_source(events: E) -> Self {
        Self {
            events,
            resized: false,
        }
    }

    /// Collect intents until `budget` has elapsed.
    ///
    /// Returns early only if the event stream is flooded; an empty set means
    /// no mapped key was pressed.
    pub fn poll_tick(&mut self, budget: Duration) -> Result<IntentSet> {
        let deadline = Instant::now() + budget;
        let mut intents = IntentSet::empty();

        for _ in 0..MAX_EVENTS_PER_TICK {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !self.events.poll(remaining)? {
                break;
            }
            match self.events.read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(intent) = intent_for_key(key) {
                        trace!(?intent, "key");
                        intents.insert(intent);
                    }
                }
                Event::Resize(..) => self.resized = true,
                _ => {}
            }
        }
        Ok(intents)
    }

    /// Whether the terminal was resized since the last call.
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Intent;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl EventSource for Scripted {
        fn poll(&mut self, _timeout: Duration) -> Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no event"))
        }
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn input(events: Vec<Event>) -> TerminalInput<Scripted> {
        TerminalInput::with_source(Scripted(events.into()))
    }

    #[test]
    fn test_presses_fold_into_one_set() {
        let mut input = input(vec![
            key(KeyCode::Left, KeyEventKind::Press),
            key(KeyCode::Char('s'), KeyEventKind::Press),
            key(KeyCode::Up, KeyEventKind::Press),
        ]);
        let intents = input.poll_tick(Duration::ZERO).unwrap();
        assert!(intents.contains(Intent::MoveLeft));
        assert!(intents.contains(Intent::Rotate));
        assert!(!intents.contains(Intent::MoveDown));
    }

    #[test]
    fn test_repeat_and_release_are_ignored() {
        let mut input = input(vec![
            key(KeyCode::Right, KeyEventKind::Repeat),
            key(KeyCode::Down, KeyEventKind::Release),
        ]);
        assert!(input.poll_tick(Duration::ZERO).unwrap().is_empty());
    }

    #[test]
    fn test_no_events_is_empty_set() {
        let mut input = input(Vec::new());
        assert!(input.poll_tick(Duration::from_millis(1)).unwrap().is_empty());
    }

    #[test]
    fn test_resize_is_reported_once() {
        let mut input = input(vec![Event::Resize(80, 24)]);
        input.poll_tick(Duration::ZERO).unwrap();
        assert!(input.take_resized());
        assert!(!input.take_resized());
    }

    #[test]
    fn test_flood_is_capped_per_tick() {
        let events = (0..MAX_EVENTS_PER_TICK + 5)
            .map(|_| key(KeyCode::Char('x'), KeyEventKind::Press))
            .chain(std::iter::once(key(KeyCode::Char('q'), KeyEventKind::Press)))
            .collect();
        let mut input = input(events);
        assert!(!input.poll_tick(Duration::ZERO).unwrap().contains(Intent::Quit));
        assert!(input.poll_tick(Duration::ZERO).unwrap().contains(Intent::Quit));
    }
}
