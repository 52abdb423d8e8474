use crate::domain::AnimationSpeed;
use std::time::Duration;

/// Event loop tick in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Counts loop ticks and advances the animation frame at the mood's pace
#[derive(Debug, Default, Clone)]
pub struct AnimationClock {
    ticks: u32,
    frame: usize,
}

impl AnimationClock {
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Returns true when the frame advanced
    pub fn tick(&mut self, speed: AnimationSpeed) -> bool {
        self.ticks += 1;
        if self.ticks >= speed.ticks_per_frame() {
            self.ticks = 0;
            self.frame = self.frame.wrapping_add(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_frame_pace_follows_speed() {
        let mut fast = AnimationClock::default();
        assert!(fast.tick(AnimationSpeed::VeryFast));
        assert_eq!(fast.frame(), 1);

        let mut slow = AnimationClock::default();
        let advanced = (0..8).filter(|_| slow.tick(AnimationSpeed::VerySlow)).count();
        assert_eq!(advanced, 1);
        assert_eq!(slow.frame(), 1);
    }
}
