//! Round clock: pure mapping from wall-clock time to round/phase decisions.
//!
//! The clock is polling-driven. There is no background scheduler; whichever
//! call touches the session next asks the clock what should happen given
//! `now`. The trade-off is accepted staleness between polls, and callers must
//! never assume uniform tick spacing.
//!
//! Every decision here is pure; applying it (mutating the session) happens in
//! [`crate::GameSession`] while the session's exclusive lock is held, so a
//! round boundary observed by many concurrent pollers advances exactly once.

use types::{EpochSecs, Phase, ROUND_SECS, SubPhase};

/// Prices move only while the remaining time is below this threshold; the
/// first seconds of each round are a news/reaction window.
pub const MARKET_OPEN_BELOW: u32 = 30;

/// What a poll at `now` should do to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStep {
    /// Clock not running (pre-match or finished); nothing to apply.
    Idle,
    /// Round in progress: set the remaining time, advance the market once if
    /// it is open.
    Running { remaining: u32, market_open: bool },
    /// Round expired with rounds left: advance the market one final step,
    /// then start the next round at `now`.
    NextRound,
    /// Final round expired: advance the market one final step, then finish
    /// the match.
    MatchOver,
}

/// Decide what a poll at `now` means for a session's clock state.
///
/// At most one market step per poll is ever requested, no matter how much
/// wall time passed since the previous poll. Sparse polling therefore
/// under-advances the market relative to elapsed time; that is deliberate.
pub fn step(
    phase: Phase,
    round_start: Option<EpochSecs>,
    current_round: u32,
    max_rounds: u32,
    now: EpochSecs,
) -> ClockStep {
    let start = match (phase, round_start) {
        (Phase::Playing, Some(start)) => start,
        _ => return ClockStep::Idle,
    };

    let remaining = time_remaining(start, now);
    if remaining > 0 {
        ClockStep::Running { remaining, market_open: remaining < MARKET_OPEN_BELOW }
    } else if current_round < max_rounds {
        ClockStep::NextRound
    } else {
        ClockStep::MatchOver
    }
}

/// Seconds left in the round that started at `round_start`, floored to whole
/// seconds and clamped at zero.
pub fn time_remaining(round_start: EpochSecs, now: EpochSecs) -> u32 {
    let elapsed = (now - round_start).floor() as i64;
    (ROUND_SECS as i64 - elapsed).max(0) as u32
}

/// Derive the UI sub-phase from the top-level phase and remaining time.
pub fn sub_phase(phase: Phase, remaining: u32) -> SubPhase {
    match phase {
        Phase::PreMatch => SubPhase::Intro,
        Phase::Finished => SubPhase::Results,
        Phase::Playing => {
            if remaining >= MARKET_OPEN_BELOW {
                SubPhase::News
            } else {
                SubPhase::Trading
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_outside_playing() {
        assert_eq!(step(Phase::PreMatch, None, 0, 5, 100.0), ClockStep::Idle);
        assert_eq!(step(Phase::Finished, None, 5, 5, 100.0), ClockStep::Idle);
        // Playing without a round start is also idle.
        assert_eq!(step(Phase::Playing, None, 1, 5, 100.0), ClockStep::Idle);
    }

    #[test]
    fn test_news_window_market_closed() {
        // 2 seconds in: 33 remaining, still in the news window.
        let step = step(Phase::Playing, Some(1000.0), 1, 5, 1002.0);
        assert_eq!(step, ClockStep::Running { remaining: 33, market_open: false });
    }

    #[test]
    fn test_market_opens_below_threshold() {
        // 6 seconds in: 29 remaining, market open.
        let step = step(Phase::Playing, Some(1000.0), 1, 5, 1006.0);
        assert_eq!(step, ClockStep::Running { remaining: 29, market_open: true });
    }

    #[test]
    fn test_round_boundary_decisions() {
        assert_eq!(step(Phase::Playing, Some(1000.0), 1, 5, 1035.0), ClockStep::NextRound);
        assert_eq!(step(Phase::Playing, Some(1000.0), 4, 5, 1040.0), ClockStep::NextRound);
        assert_eq!(step(Phase::Playing, Some(1000.0), 5, 5, 1035.0), ClockStep::MatchOver);
    }

    #[test]
    fn test_time_remaining_floors_and_clamps() {
        assert_eq!(time_remaining(1000.0, 1000.0), 35);
        assert_eq!(time_remaining(1000.0, 1000.9), 35);
        assert_eq!(time_remaining(1000.0, 1001.0), 34);
        assert_eq!(time_remaining(1000.0, 1034.5), 1);
        assert_eq!(time_remaining(1000.0, 1035.0), 0);
        // Arbitrarily late polls clamp at zero rather than going negative.
        assert_eq!(time_remaining(1000.0, 9999.0), 0);
    }

    #[test]
    fn test_sub_phase_derivation() {
        assert_eq!(sub_phase(Phase::PreMatch, 0), SubPhase::Intro);
        assert_eq!(sub_phase(Phase::Playing, 35), SubPhase::News);
        assert_eq!(sub_phase(Phase::Playing, 30), SubPhase::News);
        assert_eq!(sub_phase(Phase::Playing, 29), SubPhase::Trading);
        assert_eq!(sub_phase(Phase::Finished, 0), SubPhase::Results);
    }
}
