// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Round arithmetic. Round 1 is emitted at genesis time, round 0 is the genesis seed.

use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seconds {
    value: u32,
}

impl Seconds {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn get_value(&self) -> u32 {
        self.value
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.value)
    }
}

/// Calculates the active round at `now`. Returns 0 before genesis.
pub fn current_round(now: u64, period: u32, genesis: u64) -> u64 {
    if now < genesis || period == 0 {
        return 0;
    }
    let (next_round, _) = next_round(now, period, genesis);
    next_round - 1
}

/// Returns the next upcoming round and its UNIX time given the genesis
/// time and the period.
pub fn next_round(now: u64, period: u32, genesis: u64) -> (u64, u64) {
    if now < genesis || period == 0 {
        return (1, genesis);
    }
    let from_genesis = now - genesis;
    // Periods elapsed since genesis, +1 as round 1 starts at genesis.
    let current = from_genesis / u64::from(period) + 1;
    let next_time = genesis.saturating_add(current.saturating_mul(u64::from(period)));

    (current + 1, next_time)
}

/// Returns the time the `round` should happen.
pub fn time_of_round(period: u32, genesis: u64, round: u64) -> u64 {
    if round == 0 {
        return genesis;
    }

    // - 1 because genesis time is for 1st round already.
    let delta = (round - 1).saturating_mul(u64::from(period));
    genesis.saturating_add(delta)
}

/// Returns current Unix time as duration.
pub fn time_now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn time_basic() {
        let period = 3;
        let round = 22;

        assert_eq!(round, current_round(1745308647, period, 1745308582));
        assert_eq!(round, current_round(1745308824, period, 1745308759));
        assert_eq!(round, current_round(1745309210, period, 1745309145));
        assert_eq!(1745308675, time_of_round(period, 1745308582, round + 10));
        assert_eq!(1745308852, time_of_round(period, 1745308759, round + 10));
        assert_eq!(1745309238, time_of_round(period, 1745309145, round + 10));
    }

    #[test]
    fn test_chain_next_round() {
        let period = 2;
        let mut now = time_now().as_secs();
        let genesis = now + 1;

        assert_eq!(current_round(now, period, genesis), 0);
        assert_eq!(next_round(now, period, genesis), (1, genesis));

        // Move to genesis round
        now += 1;
        let (round, round_time) = next_round(now, period, genesis);
        assert_eq!(round, 2);
        let exp_time = genesis + u64::from(period);
        assert_eq!(exp_time, round_time);
        assert_eq!(exp_time, time_of_round(period, genesis, 2));
        assert_eq!(current_round(now, period, genesis), 1);

        // Move to one second
        now += 1;
        let (nround, nround_time) = next_round(now, period, genesis);
        assert_eq!(round, nround);
        assert_eq!(round_time, nround_time);

        // Move to next round
        now += 1;
        let (round, round_time) = next_round(now, period, genesis);
        let exp_time = genesis + u64::from(period) * 2;
        assert_eq!(round, 3);
        assert_eq!(round_time, exp_time);
        assert_eq!(exp_time, time_of_round(period, genesis, 3));
    }

    #[test]
    fn mainnet_rounds() {
        let (period, genesis) = (30, 1595431050);
        assert_eq!(time_of_round(period, genesis, 0), genesis);
        assert_eq!(time_of_round(period, genesis, 1), genesis);
        assert_eq!(current_round(genesis + 29, period, genesis), 1);
        assert_eq!(current_round(genesis + 30, period, genesis), 2);
        assert_eq!(time_of_round(period, genesis, u64::MAX), u64::MAX);
    }

    #[test]
    fn seconds_display() {
        assert_eq!(Seconds::new(3).to_string(), "3s");
        assert_eq!(Seconds::default().get_value(), 0);
    }
}
