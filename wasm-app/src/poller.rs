use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::debug;
use pixelwar::{Poller, Uid};

/// Owns at most one running interval; arming again replaces it.
pub struct IntervalPoller {
    period_ms: u32,
    on_tick: Rc<dyn Fn(Uid)>,
    interval: RefCell<Option<Interval>>,
}

impl IntervalPoller {
    pub fn new(period_ms: u32, on_tick: Rc<dyn Fn(Uid)>) -> Self {
        IntervalPoller {
            period_ms,
            on_tick,
            interval: RefCell::new(None),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.borrow().is_some()
    }
}

impl Poller for IntervalPoller {
    fn arm(&self, uid: Uid) {
        let on_tick = Rc::clone(&self.on_tick);
        let interval = Interval::new(self.period_ms, move || on_tick(uid.clone()));
        // Dropping the previous interval clears it.
        if self.interval.borrow_mut().replace(interval).is_some() {
            debug!("replaced running cooldown poller");
        }
    }

    fn disarm(&self) {
        if self.interval.borrow_mut().take().is_some() {
            debug!("cooldown poller stopped");
        }
    }
}
