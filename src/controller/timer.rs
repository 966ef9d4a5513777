//! Cancellable delayed transitions.
//!
//! A [`TimerSlot`] holds at most one pending task. Re-arming replaces (and
//! aborts) the previous task; every arming gets a fresh [`Ticket`] so a signal
//! that was already queued by a replaced task is recognised as stale.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::Signal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

/// Spawned task that is aborted when dropped.
#[derive(Debug)]
pub(crate) struct AbortOnDrop(JoinHandle<()>);

impl AbortOnDrop {
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    issued: u64,
    pending: Option<(Ticket, AbortOnDrop)>,
}

impl TimerSlot {
    /// Schedule `signal` to be sent after `delay`, replacing any pending one.
    pub(crate) fn arm(
        &mut self,
        delay: Duration,
        signals: &UnboundedSender<Signal>,
        signal: fn(Ticket) -> Signal,
    ) {
        self.issued = self.issued.wrapping_add(1);
        let ticket = Ticket(self.issued);
        let signals = signals.clone();
        let task = AbortOnDrop::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = signals.send(signal(ticket));
        });
        self.pending = Some((ticket, task));
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consume a fired ticket; `false` when it was cancelled or replaced.
    pub(crate) fn fire(&mut self, ticket: Ticket) -> bool {
        match &self.pending {
            Some((pending, _)) if *pending == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
