//! Flip-open animation of a card.
//!
//! ```text
//! Closed --click--> Opening --settle--> Open
//! Open   --click--> Opening --settle--> Closed
//! ```
//!
//! Clicks while `Opening` are ignored. The settle signal comes from a
//! [`Scheduler`] after the configured delay, so the machine itself never
//! touches a clock.

use std::time::Duration;

/// Default time spent in `Opening` before settling.
pub const DEFAULT_FLIP_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipState {
    #[default]
    Closed,
    Opening,
    Open,
}

/// Which side of the card faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Front,
    Message,
}

impl FlipState {
    pub fn face(self) -> CardFace {
        match self {
            FlipState::Closed | FlipState::Opening => CardFace::Front,
            FlipState::Open => CardFace::Message,
        }
    }

    /// Y-axis rotation of the card in degrees.
    pub fn rotation_deg(self) -> i32 {
        match self {
            FlipState::Closed => 0,
            FlipState::Opening => -15,
            FlipState::Open => -180,
        }
    }

    /// CSS transform for the card body.
    pub fn css_transform(self) -> String {
        format!("perspective(1200px) rotateY({}deg)", self.rotation_deg())
    }
}

/// Identifies one pending settle. A token from an earlier transition is
/// stale and will be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettleToken(u64);

/// Something that can call back after a delay.
pub trait Scheduler {
    fn schedule(&mut self, after: Duration, token: SettleToken);
}

/// The flip controller shared by the preview and recipient screens.
#[derive(Debug, Clone)]
pub struct FlipCard {
    state: FlipState,
    /// Where `Opening` will land, if a transition is in flight.
    target: Option<FlipState>,
    generation: u64,
    delay: Duration,
}

impl Default for FlipCard {
    fn default() -> Self {
        Self::new(DEFAULT_FLIP_DELAY)
    }
}

impl FlipCard {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: FlipState::Closed,
            target: None,
            generation: 0,
            delay,
        }
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Handle a click. Returns the settle token the caller must deliver back
    /// via [`FlipCard::settle`] after [`FlipCard::delay`], or `None` if the
    /// click was ignored.
    pub fn click(&mut self) -> Option<SettleToken> {
        let target = match self.state {
            FlipState::Closed => FlipState::Open,
            FlipState::Open => FlipState::Closed,
            FlipState::Opening => return None,
        };
        self.generation += 1;
        self.state = FlipState::Opening;
        self.target = Some(target);
        Some(SettleToken(self.generation))
    }

    /// Click and hand the settle to `scheduler`.
    pub fn click_with<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.click() {
            Some(token) => {
                scheduler.schedule(self.delay, token);
                true
            }
            None => false,
        }
    }

    /// Finish the in-flight transition. Returns whether the state changed.
    pub fn settle(&mut self, token: SettleToken) -> bool {
        if token.0 != self.generation {
            return false;
        }
        match self.target.take() {
            Some(target) if self.state == FlipState::Opening => {
                self.state = target;
                true
            }
            _ => false,
        }
    }
}

/// Scheduler driven by hand; time only moves when [`ManualScheduler::advance`]
/// is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<(Duration, SettleToken)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move time forward by `by` and return the tokens that came due, in
    /// deadline order.
    pub fn advance(&mut self, by: Duration) -> Vec<SettleToken> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<_> = self.pending.iter().copied().filter(|(at, _)| *at <= now).collect();
        self.pending.retain(|(at, _)| *at > now);
        due.sort();
        due.into_iter().map(|(_, token)| token).collect()
    }

    /// Advance and deliver every due token to `card`.
    pub fn advance_card(&mut self, card: &mut FlipCard, by: Duration) {
        for token in self.advance(by) {
            card.settle(token);
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, after: Duration, token: SettleToken) {
        self.pending.push((self.now + after, token));
    }
}
