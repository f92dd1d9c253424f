/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next tick.
    Idle,
    /// Running a regular flush.
    Flushing,
    /// Running the final flush after shutdown.
    Draining,
    Stopped,
}

impl SchedulerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerState::Idle => "idle",
            SchedulerState::Flushing => "flushing",
            SchedulerState::Draining => "draining",
            SchedulerState::Stopped => "stopped",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => SchedulerState::Idle,
            1 => SchedulerState::Flushing,
            2 => SchedulerState::Draining,
            _ => SchedulerState::Stopped,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            SchedulerState::Idle => 0,
            SchedulerState::Flushing => 1,
            SchedulerState::Draining => 2,
            SchedulerState::Stopped => 3,
        }
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(super) struct StateCell(AtomicU8);

impl StateCell {
    pub(super) fn new() -> Self {
        StateCell(AtomicU8::new(SchedulerState::Idle.as_u8()))
    }

    pub(super) fn get(&self) -> SchedulerState {
        SchedulerState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(super) fn set(&self, state: SchedulerState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell() {
        let cell = StateCell::new();
        assert_eq!(cell.get(), SchedulerState::Idle);
        for state in [
            SchedulerState::Flushing,
            SchedulerState::Draining,
            SchedulerState::Stopped,
            SchedulerState::Idle,
        ] {
            cell.set(state);
            assert_eq!(cell.get(), state);
        }
        assert_eq!(SchedulerState::Draining.to_string(), "draining");
    }
}
