use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Orders responses for one render target.
///
/// Requests may resolve in any order. A response is applied only if no
/// newer request for the same target has been applied already.
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        Ticket(next)
    }

    /// Returns false for a stale ticket; true marks it as the newest applied.
    pub fn accept(&self, ticket: Ticket) -> bool {
        if ticket.0 <= self.applied.get() {
            return false;
        }
        self.applied.set(ticket.0);
        true
    }
}
