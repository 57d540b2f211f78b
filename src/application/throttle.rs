use crate::config::ThrottleConfig;
use crate::domain::field::Field;
use std::ops::Add;
use std::time::Duration;

/// Trailing debounce for a single input.
///
/// Each push restarts the quiet period and replaces the pending value; the
/// value is released once the period elapses without another push. A zero
/// interval releases every value immediately.
///
/// Generic over the instant type so the live session can run on tokio's
/// clock while replays use plain `Duration` offsets.
#[derive(Debug)]
pub struct Debouncer<T, I> {
    interval: Duration,
    pending: Option<(T, I)>,
}

impl<T, I> Debouncer<T, I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Returns the value right away when debouncing is disabled.
    pub fn push(&mut self, value: T, now: I) -> Option<T> {
        if self.interval.is_zero() {
            self.pending = None;
            return Some(value);
        }
        self.pending = Some((value, now + self.interval));
        None
    }

    pub fn deadline(&self) -> Option<I> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn poll(&mut self, now: I) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.flush(),
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// One debouncer per form field.
#[derive(Debug)]
pub struct FieldThrottle<I> {
    debouncers: [Debouncer<String, I>; 3],
}

impl<I> FieldThrottle<I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            debouncers: Field::ALL.map(|field| Debouncer::new(config.interval_for(field))),
        }
    }

    pub fn push(&mut self, field: Field, text: String, now: I) -> Option<String> {
        self.debouncers[field.index()].push(text, now)
    }

    pub fn next_deadline(&self) -> Option<I> {
        self.debouncers.iter().filter_map(Debouncer::deadline).min()
    }

    /// Releases every value whose quiet period has elapsed, earliest first.
    pub fn poll_due(&mut self, now: I) -> Vec<(I, Field, String)> {
        self.drain(|deadline| deadline <= now)
    }

    /// Releases everything still pending, earliest first.
    pub fn flush_all(&mut self) -> Vec<(I, Field, String)> {
        self.drain(|_| true)
    }

    fn drain(&mut self, due: impl Fn(I) -> bool) -> Vec<(I, Field, String)> {
        let mut released: Vec<_> = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let debouncer = &mut self.debouncers[field.index()];
                let deadline = debouncer.deadline().filter(|deadline| due(*deadline))?;
                debouncer.flush().map(|text| (deadline, field, text))
            })
            .collect();
        released.sort_by_key(|(deadline, _, _)| *deadline);
        released
    }
}
