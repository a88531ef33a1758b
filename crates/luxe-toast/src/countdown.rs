//! Progress countdown of auto-dismissing notifications.
//!
//! The countdown starts at 100 % and loses `100 / (duration_ms / 100)` every
//! 100 ms tick. Values are accumulated by repeated subtraction, so rounding
//! decides the exact tick a notification expires on.

use std::time::Duration;

/// Interval between countdown steps.
pub const TICK: Duration = Duration::from_millis(100);

const TICK_MS: u64 = 100;

/// Above this many ticks the countdown is computed in closed form.
const MAX_SIMULATED_TICKS: u64 = 1_000_000;

/// Percentage removed on every tick.
pub fn step(duration_ms: u64) -> f64 {
    100.0 / (duration_ms as f64 / TICK_MS as f64)
}

/// Runs at most `max_ticks` ticks, stopping at the first one that reaches
/// zero. Returns the ticks run and the remaining percentage.
fn simulate(step: f64, max_ticks: u64) -> (u64, f64) {
    let mut remaining = 100.0;
    let mut ticks = 0;
    while ticks < max_ticks {
        ticks += 1;
        remaining -= step;
        if remaining <= 0.0 {
            break;
        }
    }
    (ticks, remaining)
}

/// Tick on which a countdown of `duration_ms` expires, or `None` for sticky
/// notifications.
pub fn expiry_tick(duration_ms: u64) -> Option<u64> {
    if duration_ms == 0 {
        return None;
    }

    let nominal = duration_ms.div_ceil(TICK_MS);
    if nominal > MAX_SIMULATED_TICKS {
        return Some(nominal);
    }
    // accumulated rounding moves expiry by at most one tick
    Some(simulate(step(duration_ms), nominal + 1).0)
}

/// Time from the start of a countdown until the notification is removed.
pub fn lifetime(duration_ms: u64) -> Option<Duration> {
    expiry_tick(duration_ms).map(|ticks| TICK.saturating_mul(ticks.min(u32::MAX as u64) as u32))
}

/// Percentage left after `elapsed`, clamped to `0.0..=100.0`. Sticky
/// notifications stay at 100.
pub fn remaining_percent(duration_ms: u64, elapsed: Duration) -> f64 {
    if duration_ms == 0 {
        return 100.0;
    }

    let ticks = (elapsed.as_millis() / TICK_MS as u128).min(u64::MAX as u128) as u64;
    let step = step(duration_ms);
    let remaining = if ticks > MAX_SIMULATED_TICKS {
        100.0 - step * ticks as f64
    } else {
        simulate(step, ticks).1
    };

    remaining.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_seconds_is_fifty_ticks() {
        assert_eq!(step(5000), 2.0);
        assert_eq!(expiry_tick(5000), Some(50));
        assert_eq!(lifetime(5000), Some(Duration::from_millis(5000)));
    }

    #[test]
    fn halfway_leaves_half() {
        assert_eq!(remaining_percent(5000, Duration::from_millis(2500)), 50.0);
        assert_eq!(remaining_percent(5000, Duration::from_millis(2599)), 50.0);
        assert_eq!(remaining_percent(5000, Duration::from_millis(5000)), 0.0);
        assert_eq!(remaining_percent(5000, Duration::from_secs(60)), 0.0);
    }

    #[test]
    fn sticky_countdown_never_expires() {
        assert_eq!(expiry_tick(0), None);
        assert_eq!(lifetime(0), None);
        assert_eq!(remaining_percent(0, Duration::from_secs(3600)), 100.0);
    }

    #[test]
    fn default_durations_expire_on_their_nominal_tick() {
        for duration in [5000, 6000, 7000] {
            let tick = expiry_tick(duration).unwrap();
            assert!(
                tick == duration / 100 || tick == duration / 100 + 1,
                "{duration}: {tick}"
            );
        }
    }

    #[test]
    fn short_durations_expire_on_the_first_tick() {
        assert_eq!(expiry_tick(1), Some(1));
        assert_eq!(expiry_tick(100), Some(1));
        assert_eq!(expiry_tick(150), Some(2));
    }

    #[test]
    fn huge_durations_do_not_simulate_forever() {
        assert_eq!(expiry_tick(u64::MAX), Some(u64::MAX.div_ceil(100)));
        assert!(remaining_percent(u64::MAX, Duration::from_secs(1)) > 99.0);
    }
}
