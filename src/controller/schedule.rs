use std::time::Duration;

/// Handle to a scheduled solve. Pass it to [`Scheduler::cancel`] to drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TimerHandle,
    due: Duration,
}

/// One-shot timers on a clock advanced explicitly by the caller.
///
/// The clock and due times saturate at [`Duration::MAX`].
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: self.now.saturating_add(delay),
        });
        handle
    }

    /// Returns `false` when the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending timer is due.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Moves the clock forward and returns the timers that came due, earliest
    /// first. Timers due at the same instant fire in scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|p| (p.due, p.handle));
        due.into_iter().map(|p| p.handle).collect()
    }
}
