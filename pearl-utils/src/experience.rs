//! Vanilla experience curve and level/point bookkeeping.
//!
//! Experience is stored as a whole number of points inside the current level
//! rather than vanilla's `experienceProgress` float, so giving and then taking
//! back the same amount of points always restores the same level and progress.
//!
//! Vanilla: `Player.getXpNeededForNextLevel`, `giveExperiencePoints`,
//! `ServerPlayer.setExperiencePoints`.

/// Points required to go from `level` to `level + 1`.
#[must_use]
pub const fn xp_needed_for_level(level: i32) -> i32 {
    if level >= 30 {
        112 + (level - 30) * 9
    } else if level >= 15 {
        37 + (level - 15) * 5
    } else {
        7 + level * 2
    }
}

/// A player's experience: level plus whole points collected toward the next level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Experience {
    level: i32,
    points: i32,
}

impl Experience {
    /// No experience at all.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: 0,
            points: 0,
        }
    }

    /// Experience at `level` with `points` inside that level (clamped below the next level).
    #[must_use]
    pub fn with_level(level: i32, points: i32) -> Self {
        let mut xp = Self::new();
        xp.set_level(level);
        xp.set_points(points);
        xp
    }

    /// The current level.
    #[must_use]
    pub const fn level(&self) -> i32 {
        self.level
    }

    /// Whole points inside the current level.
    #[must_use]
    pub const fn points(&self) -> i32 {
        self.points
    }

    /// Points required for the next level.
    #[must_use]
    pub const fn xp_needed_for_next_level(&self) -> i32 {
        xp_needed_for_level(self.level)
    }

    /// Fraction of the bar filled, in `[0, 1)`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.points as f32 / self.xp_needed_for_next_level() as f32
    }

    /// Adds (or with a negative value, removes) points, rolling levels over in
    /// both directions. Dropping below level 0 clamps to an empty bar.
    pub fn give_points(&mut self, amount: i32) {
        let mut points = i64::from(self.points) + i64::from(amount);
        while points < 0 {
            if self.level > 0 {
                self.level -= 1;
                points += i64::from(self.xp_needed_for_next_level());
            } else {
                self.level = 0;
                points = 0;
            }
        }
        while points >= i64::from(self.xp_needed_for_next_level()) {
            points -= i64::from(self.xp_needed_for_next_level());
            self.level += 1;
        }
        self.points = points as i32;
    }

    /// Sets the level, keeping the filled fraction of the bar.
    /// A negative level empties everything, as vanilla does.
    pub fn set_level(&mut self, level: i32) {
        if level < 0 {
            *self = Self::new();
            return;
        }
        let progress = self.progress();
        self.level = level;
        self.points = (progress * self.xp_needed_for_next_level() as f32) as i32;
    }

    /// Sets the points inside the current level, clamped to `[0, needed - 1]`.
    pub fn set_points(&mut self, points: i32) {
        self.points = points.clamp(0, self.xp_needed_for_next_level() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_matches_vanilla_brackets() {
        assert_eq!(xp_needed_for_level(0), 7);
        assert_eq!(xp_needed_for_level(14), 35);
        assert_eq!(xp_needed_for_level(15), 37);
        assert_eq!(xp_needed_for_level(29), 107);
        assert_eq!(xp_needed_for_level(30), 112);
        assert_eq!(xp_needed_for_level(31), 121);
    }

    #[test]
    fn giving_points_rolls_levels_up() {
        let mut xp = Experience::new();
        xp.give_points(7 + 9 + 3);
        assert_eq!(xp.level(), 2);
        assert_eq!(xp.points(), 3);
    }

    #[test]
    fn taking_points_rolls_levels_down() {
        let mut xp = Experience::with_level(5, 2);
        xp.give_points(-4);
        assert_eq!(xp.level(), 4);
        assert_eq!(xp.points(), xp_needed_for_level(4) - 2);
    }

    #[test]
    fn give_then_take_is_symmetric() {
        let start = Experience::with_level(12, 17);
        for amount in [1, 5, 31, 64, 200] {
            let mut xp = start;
            xp.give_points(-amount);
            xp.give_points(amount);
            assert_eq!((xp.level(), xp.points()), (start.level(), start.points()));
        }
    }

    #[test]
    fn cannot_go_below_zero() {
        let mut xp = Experience::with_level(0, 3);
        xp.give_points(-10);
        assert_eq!((xp.level(), xp.points()), (0, 0));
    }

    #[test]
    fn set_points_clamps_below_next_level() {
        let mut xp = Experience::with_level(3, 0);
        xp.set_points(xp.xp_needed_for_next_level());
        assert_eq!(xp.points(), xp_needed_for_level(3) - 1);
        assert_eq!(xp.level(), 3);
    }
}
