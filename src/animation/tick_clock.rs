// src/animation/tick_clock.rs
//
// Tracks incoming ticks: how many arrive per second, which ones are stale,
// and how long a single move may take as a result.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// First time this tick number is seen
    New,
    /// Same tick number as the latest one
    Repeat,
    /// Older than a tick already received
    Stale,
}

#[derive(Debug, Clone)]
pub struct TickClock {
    current_second: Option<i64>,
    ticks_this_second: u32,
    ticks_last_second: Option<u32>,
    highest_tick: Option<u64>,
    duration_perc: f64,
    fallback_tick_ms: f64,
}

impl TickClock {
    pub fn new(duration_perc: f64, fallback_tick_ms: f64) -> Self {
        Self {
            current_second: None,
            ticks_this_second: 0,
            ticks_last_second: None,
            highest_tick: None,
            duration_perc: duration_perc.clamp(0.001, 1.0),
            fallback_tick_ms: fallback_tick_ms.max(0.0),
        }
    }

    /// Records the arrival of `tick` at `now_ms`. Only new ticks count
    /// toward the tick rate.
    pub fn register_tick(&mut self, tick: u64, now_ms: f64) -> TickStatus {
        let status = match self.highest_tick {
            Some(highest) if tick < highest => TickStatus::Stale,
            Some(highest) if tick == highest => TickStatus::Repeat,
            _ => TickStatus::New,
        };

        if status == TickStatus::New {
            self.highest_tick = Some(tick);
            self.count_tick(now_ms);
        }
        status
    }

    fn count_tick(&mut self, now_ms: f64) {
        let second = (now_ms / 1000.0).floor() as i64;
        match self.current_second {
            Some(current) if current == second => self.ticks_this_second += 1,
            Some(_) => {
                self.ticks_last_second = Some(self.ticks_this_second);
                self.current_second = Some(second);
                self.ticks_this_second = 1;
            }
            None => {
                self.current_second = Some(second);
                self.ticks_this_second = 1;
            }
        }
    }

    pub fn ticks_per_second(&self) -> Option<u32> {
        self.ticks_last_second
    }

    pub fn highest_tick(&self) -> Option<u64> {
        self.highest_tick
    }

    /// Milliseconds one move may take: the measured interval between ticks
    /// scaled by the duration percentage.
    pub fn time_per_move(&self) -> f64 {
        let tick_ms = match self.ticks_last_second {
            Some(n) if n > 0 => 1000.0 / n as f64,
            _ => self.fallback_tick_ms,
        };
        tick_ms * self.duration_perc
    }

    /// Forget tick history, e.g. after the simulation restarted at tick 0.
    pub fn reset(&mut self) {
        *self = Self::new(self.duration_perc, self.fallback_tick_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_before_measurement() {
        let mut clock = TickClock::new(1.0, 200.0);
        assert_eq!(clock.time_per_move(), 200.0);
        clock.register_tick(0, 0.0);
        clock.register_tick(1, 200.0);
        assert_eq!(clock.ticks_per_second(), None);
        assert_eq!(clock.time_per_move(), 200.0);
    }

    #[test]
    fn test_measured_rate() {
        let mut clock = TickClock::new(1.0, 200.0);
        for tick in 0..4 {
            clock.register_tick(tick, tick as f64 * 250.0);
        }
        // tick 4 opens the next second, closing a second of 4 ticks
        clock.register_tick(4, 1000.0);
        assert_eq!(clock.ticks_per_second(), Some(4));
        assert_eq!(clock.time_per_move(), 250.0);
    }

    #[test]
    fn test_duration_percentage() {
        let mut clock = TickClock::new(0.5, 200.0);
        assert_eq!(clock.time_per_move(), 100.0);
        clock.register_tick(0, 0.0);
        clock.register_tick(1, 500.0);
        clock.register_tick(2, 1000.0);
        assert_eq!(clock.time_per_move(), 250.0);
    }

    #[test]
    fn test_duration_percentage_is_clamped() {
        assert_eq!(TickClock::new(3.0, 100.0).time_per_move(), 100.0);
        assert!((TickClock::new(0.0, 100.0).time_per_move() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_stale_and_repeated_ticks() {
        let mut clock = TickClock::new(1.0, 200.0);
        assert_eq!(clock.register_tick(5, 0.0), TickStatus::New);
        assert_eq!(clock.register_tick(5, 10.0), TickStatus::Repeat);
        assert_eq!(clock.register_tick(3, 20.0), TickStatus::Stale);
        assert_eq!(clock.register_tick(6, 30.0), TickStatus::New);
        assert_eq!(clock.highest_tick(), Some(6));

        clock.reset();
        assert_eq!(clock.register_tick(0, 40.0), TickStatus::New);
    }
}
