//! Vertical rule state machine.
//!
//! Ruled tables (`border:line`) are drawn with vertical rules that have to
//! be opened before the first row, tied into horizontal rules between rows
//! and closed after the last row. The machine tracks where the table is:
//!
//! ```text
//!            Start              text line
//!  Waiting ──────────► Ready ─────────────► Running ◄──┐
//!     ▲                  │                   │  ▲      │ text line
//!     │      Stop        │          `---`    │  │      │
//!     └──────────────────┘                   ▼  │      │
//!     ▲                                   Horizontal ──┘
//!     │       Stop / `===` / end of document   │
//!     └────────────────────────────────────────┘
//! ```
//!
//! [`RuleMachine::apply`] returns the drawing effects a transition needs;
//! turning them into sink calls is up to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleState {
    /// No rules open
    #[default]
    Waiting,
    /// Rules requested, first row not printed yet
    Ready,
    /// Rows are being drawn between rules
    Running,
    /// A horizontal rule is pending before the next row
    Horizontal,
}

/// Inputs to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEvent {
    /// Border switched to `line`
    Start,
    /// Border switched away from `line`
    Stop,
    /// A text line is about to print
    Text,
    /// `---`
    HorizontalRule,
    /// `===`
    Cut,
    /// End of document
    End,
}

/// Drawing needed for a transition, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    /// Open rules above the coming line
    Open,
    /// Horizontal rule joining the previous line's rules to the coming line's
    TieIn,
    /// Close the rules of the last printed line
    Close,
    /// Free-standing horizontal rule
    Divider,
    /// Paper cut
    Cut,
}

/// Position and column widths of the last ruled line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGeometry {
    pub left: usize,
    pub width: usize,
    pub right: usize,
    pub widths: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMachine {
    pub state: RuleState,
    pub geometry: RuleGeometry,
}

const NONE: &[RuleEffect] = &[];
const OPEN: &[RuleEffect] = &[RuleEffect::Open];
const TIE_IN: &[RuleEffect] = &[RuleEffect::TieIn];
const CLOSE: &[RuleEffect] = &[RuleEffect::Close];
const DIVIDER: &[RuleEffect] = &[RuleEffect::Divider];
const CUT: &[RuleEffect] = &[RuleEffect::Cut];
const CLOSE_CUT: &[RuleEffect] = &[RuleEffect::Close, RuleEffect::Cut];

/// Pure transition function.
pub fn transition(state: RuleState, event: RuleEvent) -> (RuleState, &'static [RuleEffect]) {
    use RuleEvent as Ev;
    use RuleState::*;

    match (state, event) {
        (_, Ev::Start) => (Ready, NONE),

        (Waiting | Ready, Ev::Stop) => (Waiting, NONE),
        (Running | Horizontal, Ev::Stop) => (Waiting, CLOSE),

        (Waiting, Ev::Text) => (Waiting, NONE),
        (Ready, Ev::Text) => (Running, OPEN),
        (Running, Ev::Text) => (Running, NONE),
        (Horizontal, Ev::Text) => (Running, TIE_IN),

        (Waiting, Ev::HorizontalRule) => (Waiting, DIVIDER),
        (Ready, Ev::HorizontalRule) => (Ready, NONE),
        (Running | Horizontal, Ev::HorizontalRule) => (Horizontal, NONE),

        (Waiting, Ev::Cut) => (Waiting, CUT),
        (Ready, Ev::Cut) => (Ready, CUT),
        (Running | Horizontal, Ev::Cut) => (Waiting, CLOSE_CUT),

        (Waiting | Ready, Ev::End) => (Waiting, NONE),
        (Running | Horizontal, Ev::End) => (Waiting, CLOSE),
    }
}

impl RuleMachine {
    /// Advance the machine and return the effects to draw.
    pub fn apply(&mut self, event: RuleEvent) -> &'static [RuleEffect] {
        let (next, effects) = transition(self.state, event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?event, "rule transition");
        }
        self.state = next;
        effects
    }

    pub fn is_running(&self) -> bool {
        self.state == RuleState::Running
    }
}
