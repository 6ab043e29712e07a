/// Shown instead of a countdown once a pixel may be placed.
pub const READY_LABEL: &str = "You can modify a pixel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownPhase {
    #[default]
    Idle,
    /// `remaining_ms` is the last value the server reported since the
    /// most recent arm, `None` until the first report arrives.
    Waiting {
        remaining_ms: Option<u64>,
    },
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownUpdate {
    pub phase: CooldownPhase,
    pub label: String,
    /// A countdown reported after the latest arm has now run out.
    pub expired: bool,
}

/// Client view of the server-side cooldown.
///
/// The remaining time is never computed locally; it only moves when the
/// server reports a value through [`Cooldown::observe`].
#[derive(Debug, Default)]
pub struct Cooldown {
    phase: CooldownPhase,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CooldownPhase {
        self.phase
    }

    /// Starts a new wait. Readings taken before this call cannot expire it.
    pub fn arm(&mut self) {
        self.phase = CooldownPhase::Waiting { remaining_ms: None };
    }

    pub fn observe(&mut self, remaining_ms: u64) -> CooldownUpdate {
        let counting_down = matches!(
            self.phase,
            CooldownPhase::Waiting { remaining_ms: Some(_) }
        );
        let expired = remaining_ms == 0 && counting_down;
        self.phase = if remaining_ms > 0 {
            CooldownPhase::Waiting {
                remaining_ms: Some(remaining_ms),
            }
        } else {
            CooldownPhase::Ready
        };
        CooldownUpdate {
            phase: self.phase,
            label: wait_label(remaining_ms),
            expired,
        }
    }
}

/// Whole seconds left, or [`READY_LABEL`] when under one second.
pub fn wait_label(remaining_ms: u64) -> String {
    match remaining_ms / 1000 {
        0 => READY_LABEL.to_string(),
        secs => format!("{secs} sec"),
    }
}
