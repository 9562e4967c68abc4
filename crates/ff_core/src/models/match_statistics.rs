use serde::{Deserialize, Serialize};

use super::Side;

/// Cumulative per-side counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TeamStats {
    pub shots: u16,
    pub shots_on_target: u16,
    pub corners: u16,
    pub fouls: u16,
    pub yellow_cards: u16,
    pub red_cards: u16,
    pub saves: u16,
    pub passes: u32,
    pub tackles: u16,
    pub interceptions: u16,
    pub clearances: u16,
    pub offsides: u16,
    /// Percentage, one decimal place.
    pub possession: f32,
}

impl TeamStats {
    pub fn cards(&self) -> u16 {
        self.yellow_cards + self.red_cards
    }
}

/// Both sides' counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchStats {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl Default for MatchStats {
    fn default() -> Self {
        let even = TeamStats { possession: 50.0, ..TeamStats::default() };
        Self { home: even.clone(), away: even }
    }
}

impl MatchStats {
    pub fn side(&self, side: Side) -> &TeamStats {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut TeamStats {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Recompute possession from minutes held; the two sides always sum to 100.
    pub fn update_possession(&mut self, home_minutes: u32, away_minutes: u32) {
        let total = home_minutes + away_minutes;
        if total == 0 {
            self.home.possession = 50.0;
            self.away.possession = 50.0;
            return;
        }
        let home = (home_minutes as f32 * 1000.0 / total as f32).round() / 10.0;
        self.home.possession = home;
        self.away.possession = ((100.0 - home) * 10.0).round() / 10.0;
    }
}

/// Running score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Home => self.home = self.home.saturating_add(1),
            Side::Away => self.away = self.away.saturating_add(1),
        }
    }

    /// Winning side, `None` for a draw.
    pub fn winner(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_possession_sums_to_hundred() {
        let mut stats = MatchStats::default();
        stats.update_possession(31, 17);
        assert!((stats.home.possession - 64.6).abs() < 0.01);
        assert!((stats.home.possession + stats.away.possession - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_possession_without_minutes_is_even() {
        let mut stats = MatchStats::default();
        stats.update_possession(0, 0);
        assert_eq!(stats.home.possession, 50.0);
        assert_eq!(stats.away.possession, 50.0);
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::default();
        assert_eq!(score.winner(), None);
        score.increment(Side::Away);
        assert_eq!(score.get(Side::Away), 1);
        assert_eq!(score.winner(), Some(Side::Away));
    }
}
