//! Winner resolution at the end of a round.

use super::player::Player;
use serde::Serialize;

/// A player's final placing in a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub name: String,
    pub max_value: f64,
}

/// Rank players by maximum force, strongest first.
///
/// A winner only exists when more than one player competed, so zero or one
/// player yields an empty ranking. Ties keep connection order.
pub fn resolve_winners(players: &[Player]) -> Vec<Standing> {
    rank(
        players
            .iter()
            .map(|p| Standing {
                name: p.name().to_string(),
                max_value: p.max_value(),
            })
            .collect(),
    )
}

/// Sort standings by `max_value` descending (stable).
pub fn rank(mut standings: Vec<Standing>) -> Vec<Standing> {
    if standings.len() <= 1 {
        return Vec::new();
    }
    standings.sort_by(|a, b| b.max_value.total_cmp(&a.max_value));
    standings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings(values: &[f64]) -> Vec<Standing> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Standing {
                name: format!("player {}", i + 1),
                max_value: *v,
            })
            .collect()
    }

    fn maxima(ranked: &[Standing]) -> Vec<f64> {
        ranked.iter().map(|s| s.max_value).collect()
    }

    #[test]
    fn test_sorted_descending() {
        let ranked = rank(standings(&[3.0, 7.0, 5.0]));
        assert_eq!(maxima(&ranked), vec![7.0, 5.0, 3.0]);
        assert_eq!(ranked[0].name, "player 2");
    }

    #[test]
    fn test_single_or_no_player_has_no_winner() {
        assert!(rank(standings(&[7.0])).is_empty());
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_ties_keep_connection_order() {
        let ranked = rank(standings(&[5.0, 9.0, 5.0, 5.0]));
        let names: Vec<_> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["player 2", "player 1", "player 3", "player 4"]);
    }
}
