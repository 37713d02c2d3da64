//! Bounded queue of in-flight transmissions.
//!
//! Built on `critical-section` and `heapless::Deque` so a channel driver can
//! enqueue from task context and retire transfers from its completion
//! interrupt through a shared reference.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Returned by [`TxQueue::try_push`] when every slot is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// A bounded FIFO of pending transmissions.
///
/// `DEPTH` is the hardware queue depth: at most `DEPTH` transmissions can be
/// outstanding on one channel, and they complete in push order.
pub struct TxQueue<T, const DEPTH: usize> {
    inner: Mutex<RefCell<Deque<T, DEPTH>>>,
}

impl<T, const DEPTH: usize> TxQueue<T, DEPTH> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Try to enqueue a transmission.
    ///
    /// Returns `Err(QueueFull(value))` if `DEPTH` transmissions are pending.
    pub fn try_push(&self, value: T) -> Result<(), QueueFull<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(QueueFull)
        })
    }

    /// Retire the oldest transmission
    pub fn pop(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Inspect the oldest transmission without retiring it
    pub fn peek<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().front().map(f))
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_full())
    }

    /// Drop every pending entry
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }

    pub const fn capacity(&self) -> usize {
        DEPTH
    }
}

impl<T, const DEPTH: usize> Default for TxQueue<T, DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
