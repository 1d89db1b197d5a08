//! Party topologies: who controls which color, and who counts as a friend.
//!
//! Four colors are always in play. Two parties each drive a diagonal pair,
//! three parties own one color each and rotate the fourth between them,
//! four parties map one-to-one.

use crate::board::{Color, NUM_COLORS};

/// The color that rotates between parties in three-party games.
pub const NEUTRAL_COLOR: Color = 3;

/// How the four colors map onto controlling parties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMode {
    /// Two parties, each playing a diagonal pair of colors.
    TwoParty,
    /// Three parties owning colors 0..2; color 3 is neutral and rotates.
    ThreeParty,
    /// Four independent parties.
    FourParty,
}

impl PlayerMode {
    pub fn from_party_count(parties: usize) -> Option<PlayerMode> {
        match parties {
            2 => Some(PlayerMode::TwoParty),
            3 => Some(PlayerMode::ThreeParty),
            4 => Some(PlayerMode::FourParty),
            _ => None,
        }
    }

    pub fn party_count(self) -> usize {
        match self {
            PlayerMode::TwoParty => 2,
            PlayerMode::ThreeParty => 3,
            PlayerMode::FourParty => 4,
        }
    }

    /// Party that plays `color` right now. For the rotating neutral color
    /// this is whichever party currently holds it.
    pub fn controlling_party(self, color: Color, neutral_holder: u8) -> u8 {
        match self {
            PlayerMode::TwoParty => color % 2,
            PlayerMode::ThreeParty => {
                if color == NEUTRAL_COLOR {
                    neutral_holder
                } else {
                    color
                }
            }
            PlayerMode::FourParty => color,
        }
    }

    /// Colors a party permanently owns. The three-party neutral color is
    /// owned by nobody and never appears here.
    pub fn colors_of_party(self, party: u8) -> Vec<Color> {
        match self {
            PlayerMode::TwoParty => vec![party, party + 2],
            PlayerMode::ThreeParty | PlayerMode::FourParty => vec![party],
        }
    }

    /// Colors allied with `color`, including itself.
    pub fn ally_colors(self, color: Color, neutral_holder: u8) -> Vec<Color> {
        match self {
            PlayerMode::TwoParty => vec![color % 2, color % 2 + 2],
            PlayerMode::ThreeParty => {
                let party = self.controlling_party(color, neutral_holder);
                let mut allies = vec![party];
                if neutral_holder == party {
                    allies.push(NEUTRAL_COLOR);
                }
                allies
            }
            PlayerMode::FourParty => vec![color],
        }
    }

    /// Colors opposing `color`: everything not allied.
    pub fn opponent_colors(self, color: Color, neutral_holder: u8) -> Vec<Color> {
        let allies = self.ally_colors(color, neutral_holder);
        (0..NUM_COLORS as Color)
            .filter(|c| !allies.contains(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_party_diagonal_pairs() {
        let mode = PlayerMode::TwoParty;
        assert_eq!(mode.ally_colors(0, 0), vec![0, 2]);
        assert_eq!(mode.ally_colors(2, 0), vec![0, 2]);
        assert_eq!(mode.ally_colors(3, 0), vec![1, 3]);
        assert_eq!(mode.opponent_colors(0, 0), vec![1, 3]);
        assert_eq!(mode.colors_of_party(1), vec![1, 3]);
    }

    #[test]
    fn test_three_party_neutral_follows_holder() {
        let mode = PlayerMode::ThreeParty;
        assert_eq!(mode.ally_colors(0, 0), vec![0, 3]);
        assert_eq!(mode.ally_colors(0, 1), vec![0]);
        assert_eq!(mode.ally_colors(3, 1), vec![1, 3]);
        assert_eq!(mode.opponent_colors(0, 1), vec![1, 2, 3]);
        assert_eq!(mode.opponent_colors(3, 1), vec![0, 2]);
        assert_eq!(mode.controlling_party(3, 2), 2);
        assert_eq!(mode.colors_of_party(2), vec![2]);
    }

    #[test]
    fn test_four_party_everyone_alone() {
        let mode = PlayerMode::FourParty;
        assert_eq!(mode.ally_colors(2, 0), vec![2]);
        assert_eq!(mode.opponent_colors(2, 0), vec![0, 1, 3]);
    }

    #[test]
    fn test_party_count_round_trip() {
        for n in 2..=4 {
            assert_eq!(
                PlayerMode::from_party_count(n).unwrap().party_count(),
                n
            );
        }
        assert_eq!(PlayerMode::from_party_count(5), None);
    }
}
