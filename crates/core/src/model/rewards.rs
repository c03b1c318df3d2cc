use std::fmt;

/// Medal tiers unlocked by lifetime points.
///
/// Badge ownership is decided server-side; these tiers are the client's
/// display derivation for dashboards and leaderboard rows, kept in lockstep
/// with the backend's thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MedalTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Crown,
}

impl MedalTier {
    pub const ALL: [MedalTier; 6] = [
        MedalTier::Bronze,
        MedalTier::Silver,
        MedalTier::Gold,
        MedalTier::Platinum,
        MedalTier::Diamond,
        MedalTier::Crown,
    ];

    /// Point total at which this tier unlocks.
    #[must_use]
    pub fn threshold(self) -> u64 {
        match self {
            MedalTier::Bronze => 70,
            MedalTier::Silver => 180,
            MedalTier::Gold => 350,
            MedalTier::Platinum => 600,
            MedalTier::Diamond => 900,
            MedalTier::Crown => 1300,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MedalTier::Bronze => "Bronze",
            MedalTier::Silver => "Silver",
            MedalTier::Gold => "Gold",
            MedalTier::Platinum => "Platinum",
            MedalTier::Diamond => "Diamond",
            MedalTier::Crown => "Crown",
        }
    }

    /// The highest tier unlocked at the given point total, if any.
    #[must_use]
    pub fn highest_for(points: u64) -> Option<MedalTier> {
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| points >= tier.threshold())
    }
}

impl fmt::Display for MedalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of medal tiers unlocked at the given point total.
#[must_use]
pub fn medal_count(points: u64) -> usize {
    MedalTier::ALL
        .into_iter()
        .filter(|tier| points >= tier.threshold())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(medal_count(0), 0);
        assert_eq!(medal_count(69), 0);
        assert_eq!(medal_count(70), 1);
        assert_eq!(medal_count(180), 2);
        assert_eq!(medal_count(349), 2);
        assert_eq!(medal_count(600), 4);
        assert_eq!(medal_count(1299), 5);
        assert_eq!(medal_count(1300), 6);
        assert_eq!(medal_count(10_000), 6);
    }

    #[test]
    fn highest_tier_tracks_thresholds() {
        assert_eq!(MedalTier::highest_for(0), None);
        assert_eq!(MedalTier::highest_for(70), Some(MedalTier::Bronze));
        assert_eq!(MedalTier::highest_for(899), Some(MedalTier::Platinum));
        assert_eq!(MedalTier::highest_for(2000), Some(MedalTier::Crown));
    }
}
