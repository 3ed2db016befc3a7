//! Virtual time for timer-driven components.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use wisata_core::Subscription;

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: u64,
        callback: Box<dyn FnMut()>,
    },
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_id: u64,
    /// Keyed by (due time, id) so equal deadlines fire in scheduling order.
    queue: BTreeMap<(u64, u64), Task>,
    /// Interval whose callback is executing, out of the queue meanwhile.
    running: Option<u64>,
    /// Intervals cancelled from inside their own callback.
    cancelled: HashSet<u64>,
}

impl ClockState {
    fn cancel(&mut self, id: u64) {
        let key = self.queue.keys().find(|(_, tid)| *tid == id).copied();
        match key {
            Some(key) => {
                self.queue.remove(&key);
            }
            // Already fired, or a repeat that is mid-callback.
            None if self.running == Some(id) => {
                self.cancelled.insert(id);
            }
            None => {}
        }
    }
}

/// A clock that only moves when told to. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    pub fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription {
        self.schedule(u64::from(delay_ms), Task::Once(callback))
    }

    pub fn schedule_repeat(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        let period = u64::from(period_ms).max(1);
        self.schedule(period, Task::Repeat { period, callback })
    }

    fn schedule(&self, delay: u64, task: Task) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            let due = state.now + delay;
            state.queue.insert((due, id), task);
            id
        };
        let state = Rc::clone(&self.state);
        Subscription::new(move || state.borrow_mut().cancel(id))
    }

    /// Move time forward by `ms`, running every callback that falls due,
    /// including ones scheduled by callbacks along the way.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.queue.keys().next().copied() {
                    Some(key) if key.0 <= target => {
                        state.now = key.0;
                        state.queue.remove(&key).map(|task| (key, task))
                    }
                    _ => None,
                }
            };
            let Some(((due, id), task)) = next else {
                break;
            };

            match task {
                Task::Once(callback) => callback(),
                Task::Repeat {
                    period,
                    mut callback,
                } => {
                    self.state.borrow_mut().running = Some(id);
                    callback();
                    let mut state = self.state.borrow_mut();
                    state.running = None;
                    if !state.cancelled.remove(&id) {
                        state
                            .queue
                            .insert((due + period, id), Task::Repeat { period, callback });
                    }
                }
            }
        }
        self.state.borrow_mut().now = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_timeout_fires_at_deadline() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        clock.schedule_once(1500, Box::new(move || f.set(true))).detach();

        clock.advance(1499);
        assert!(!fired.get());
        clock.advance(1);
        assert!(fired.get());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_cancelled_timeout_never_fires() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let sub = clock.schedule_once(10, Box::new(move || f.set(true)));
        sub.cancel();
        clock.advance(100);
        assert!(!fired.get());
    }

    #[test]
    fn test_interval_repeats_until_cancelled() {
        let clock = ManualClock::new();
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        let sub = clock.schedule_repeat(5000, Box::new(move || t.set(t.get() + 1)));

        clock.advance(15_000);
        assert_eq!(ticks.get(), 3);

        sub.cancel();
        clock.advance(15_000);
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_cancelling_a_fired_timeout_leaves_no_residue() {
        let clock = ManualClock::new();
        let sub = clock.schedule_once(10, Box::new(|| {}));
        clock.advance(10);

        sub.cancel();
        assert!(clock.state.borrow().cancelled.is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_interval_cancelled_from_its_own_callback() {
        let clock = ManualClock::new();
        let ticks = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let (t, s) = (ticks.clone(), slot.clone());
        let sub = clock.schedule_repeat(
            100,
            Box::new(move || {
                t.set(t.get() + 1);
                if let Some(sub) = s.borrow_mut().take() {
                    sub.cancel();
                }
            }),
        );
        *slot.borrow_mut() = Some(sub);

        clock.advance(1000);
        assert_eq!(ticks.get(), 1);
        assert_eq!(clock.pending(), 0);
        assert!(clock.state.borrow().cancelled.is_empty());
    }

    #[test]
    fn test_nested_schedule_runs_within_same_advance() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(0u64));
        let (c, f) = (clock.clone(), fired.clone());
        clock
            .schedule_once(
                5000,
                Box::new(move || {
                    let f2 = f.clone();
                    let c2 = c.clone();
                    c.schedule_once(300, Box::new(move || f2.set(c2.now())))
                        .detach();
                }),
            )
            .detach();

        clock.advance(6000);
        assert_eq!(fired.get(), 5300);
    }
}
