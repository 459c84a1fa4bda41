// Cooperative task scheduler
//
// Replaces "wait, then continue" loops with explicit scheduled tasks. A task
// is plain data (`T`) describing which process to resume; the owner of the
// scheduler pops due tasks and dispatches them to the object that owns the
// process. Tasks can run once after a delay or repeat at a fixed interval,
// and every scheduled task can be cancelled through its [`TaskHandle`].
//
// Time only moves when the driver advances it, which keeps every process
// deterministic under the fixed-timestep game loop and in tests.
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Handle identifying a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Get the raw id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    handle: TaskHandle,
    interval: Option<Duration>,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap pops the earliest (due, seq) first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Tick-driven scheduler for one kind of task
#[derive(Debug)]
pub struct Scheduler<T> {
    /// Current scheduler time
    now: Duration,
    /// Pending tasks ordered by due time, then insertion order
    queue: BinaryHeap<Entry<T>>,
    next_handle: u64,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            queue: BinaryHeap::new(),
            next_handle: 0,
            next_seq: 0,
        }
    }

    /// Current scheduler time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Check whether a task is still scheduled
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.queue.iter().any(|entry| entry.handle == handle)
    }

    /// Run `task` once, `delay` after the current time
    pub fn run_after(&mut self, delay: Duration, task: T) -> TaskHandle {
        self.push(delay, None, task)
    }

    /// Run `task` after `first_delay`, then every `interval` until cancelled
    pub fn repeat_every(&mut self, first_delay: Duration, interval: Duration, task: T) -> TaskHandle {
        // A zero interval would never let time move forward
        let interval = interval.max(Duration::from_nanos(1));
        self.push(first_delay, Some(interval), task)
    }

    /// Cancel a scheduled task. Returns true if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|entry| entry.handle != handle);
        before != self.queue.len()
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    fn push(&mut self, delay: Duration, interval: Option<Duration>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.enqueue(self.now + delay, handle, interval, task);
        handle
    }

    fn enqueue(&mut self, due: Duration, handle: TaskHandle, interval: Option<Duration>, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due,
            seq,
            handle,
            interval,
            task,
        });
    }

    /// Move time forward to `until` once every due task has been popped
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Pop the earliest task due at or before `until`
    ///
    /// Advances the scheduler time to the task's due time, so tasks scheduled
    /// by the dispatcher are timed relative to the moment the task fired.
    /// Repeating tasks are re-queued before being returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, T)> {
        if self.queue.peek()?.due > until {
            return None;
        }

        let entry = self.queue.pop()?;
        self.now = self.now.max(entry.due);

        let task = match entry.interval {
            Some(interval) => {
                let task = entry.task.clone();
                self.enqueue(entry.due + interval, entry.handle, Some(interval), entry.task);
                task
            }
            None => entry.task,
        };

        Some((entry.handle, task))
    }

    /// Advance time by `dt`, dispatching every task that becomes due
    ///
    /// The dispatcher may schedule or cancel tasks; anything it schedules
    /// inside the window is dispatched in the same call.
    pub fn advance<F>(&mut self, dt: Duration, mut dispatch: F)
    where
        F: FnMut(&mut Self, TaskHandle, T),
    {
        let until = self.now + dt;
        while let Some((handle, task)) = self.pop_due(until) {
            dispatch(self, handle, task);
        }
        self.settle(until);
    }
}
