/*
 * parallel.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Cartolina, a minimal asynchronous HTTP client.
 *
 * Cartolina is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Cartolina is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Cartolina.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Fan-out/join coordinator: an ordered group of independent tasks.
//!
//! `join` is wait-for-all — one member's failure never cancels its
//! siblings — and results come back in submission order regardless of
//! completion order. `drain` is a bounded-iteration mode for deterministic
//! tests only: it processes one unit of work per iteration up to a ceiling
//! and stops early when nothing is ready, leaving a partial result set.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

type BoxedTask<T> = Pin<Box<dyn Future<Output = T> + Send>>;

struct Slot<T> {
    task: Option<BoxedTask<T>>,
    result: Option<T>,
}

/// Outcome of a bounded drain pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainStatus {
    /// Single-task polls performed.
    pub iterations: usize,
    /// Tasks still unfinished when draining stopped.
    pub pending: usize,
}

impl DrainStatus {
    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }
}

/// Waker that records wake-ups so the drain loop can tell "nothing is
/// ready" apart from "poll again".
struct WakeFlag(AtomicBool);

impl Wake for WakeFlag {
    fn wake(self: Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// An ordered collection of independent tasks submitted together.
///
/// The group exclusively owns its tasks until join time; results are moved
/// out to the caller in original submission order.
pub struct TaskGroup<T> {
    slots: Vec<Slot<T>>,
}

impl<T> TaskGroup<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Add a task. Position in the group fixes its position in the results.
    pub fn push(&mut self, task: impl Future<Output = T> + Send + 'static) {
        self.slots.push(Slot {
            task: Some(Box::pin(task)),
            result: None,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Tasks that have not yet produced a result.
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.task.is_some()).count()
    }

    /// Wait for every task to finish and return all results in submission
    /// order. All members are polled concurrently; none is cancelled.
    pub async fn join(mut self) -> Vec<T> {
        std::future::poll_fn(|cx| {
            let mut all_done = true;
            for slot in &mut self.slots {
                if let Some(task) = slot.task.as_mut() {
                    match task.as_mut().poll(cx) {
                        Poll::Ready(value) => {
                            slot.result = Some(value);
                            slot.task = None;
                        }
                        Poll::Pending => all_done = false,
                    }
                }
            }
            if all_done {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
        self.slots.into_iter().filter_map(|s| s.result).collect()
    }

    /// Bounded draining, for deterministic tests only. Each iteration polls
    /// one pending task; draining stops at the ceiling, when everything is
    /// done, or early when a full pass made no progress and no wake-up
    /// arrived. Production callers must use `join`.
    pub fn drain(&mut self, max_iterations: usize) -> DrainStatus {
        let flag = Arc::new(WakeFlag(AtomicBool::new(false)));
        let waker = Waker::from(flag.clone());
        let mut cx = Context::from_waker(&waker);

        let mut iterations = 0;
        'outer: while self.pending() > 0 && iterations < max_iterations {
            let mut progressed = false;
            for slot in &mut self.slots {
                if iterations >= max_iterations {
                    break;
                }
                if let Some(task) = slot.task.as_mut() {
                    iterations += 1;
                    if let Poll::Ready(value) = task.as_mut().poll(&mut cx) {
                        slot.result = Some(value);
                        slot.task = None;
                        progressed = true;
                    }
                }
            }
            if !progressed && !flag.0.swap(false, Ordering::SeqCst) {
                // No task completed and nothing asked to be polled again.
                break 'outer;
            }
        }
        DrainStatus {
            iterations,
            pending: self.pending(),
        }
    }

    /// Move out whatever results exist so far, in submission order;
    /// unfinished members yield `None`. Pairs with `drain`.
    pub fn take_results(&mut self) -> Vec<Option<T>> {
        self.slots.iter_mut().map(|s| s.result.take()).collect()
    }
}

impl<T> Default for TaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}
