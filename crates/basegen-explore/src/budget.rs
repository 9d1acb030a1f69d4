//! Retry and wall-clock budgets for the redraw loops.
//!
//! Random set/dict filling and random augmentation redraw on collision.
//! These budgets turn a domain too small for the request into an error
//! instead of a hang.

use std::time::{Duration, Instant};

/// Counts failed attempts against a fixed allowance.
#[derive(Debug, Clone)]
pub struct RetryBudget {
    limit: u64,
    spent: u64,
}

impl RetryBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit, spent: 0 }
    }

    /// Record one failed attempt. Returns false once the allowance is used up.
    pub fn charge(&mut self) -> bool {
        self.spent += 1;
        self.spent <= self.limit
    }

    /// Forget earlier failures (progress was made).
    pub fn reset(&mut self) {
        self.spent = 0;
    }

    pub fn spent(&self) -> u64 {
        self.spent
    }
}

/// Optional wall-clock deadline, started at construction.
#[derive(Debug, Clone)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn start(max_wall_millis: Option<u64>) -> Self {
        Self {
            start: Instant::now(),
            limit: max_wall_millis.map(Duration::from_millis),
        }
    }

    pub fn exceeded(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
