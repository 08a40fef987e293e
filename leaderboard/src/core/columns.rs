use crate::core::entry::SessionType;
use serde::Serialize;
use std::collections::BTreeSet;

/// Leaderboard columns. Only some of them are subject to visibility rules, the others are always
/// shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Position,
    Driver,
    Delta,
    CurrentLap,
    LastLap,
    BestLap,
    Tyre,
    PitRejoin,
    Fuel,
    WearPrediction,
    WingDamage,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Position,
        Column::Driver,
        Column::Delta,
        Column::CurrentLap,
        Column::LastLap,
        Column::BestLap,
        Column::Tyre,
        Column::PitRejoin,
        Column::Fuel,
        Column::WearPrediction,
        Column::WingDamage,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Position => "Pos",
            Column::Driver => "Driver",
            Column::Delta => "Gap",
            Column::CurrentLap => "Lap",
            Column::LastLap => "Last",
            Column::BestLap => "Best",
            Column::Tyre => "Tyre",
            Column::PitRejoin => "Pit",
            Column::Fuel => "Fuel",
            Column::WearPrediction => "Wear",
            Column::WingDamage => "Wing",
        }
    }

    /// is_hidden evaluates the rule of this column alone. No rule reads the state of another
    /// column.
    pub fn is_hidden(self, is_live: bool, session_type: SessionType) -> bool {
        let is_race = session_type.is_race();
        match self {
            Column::Delta => is_live,
            Column::Fuel => !(is_live && is_race),
            Column::CurrentLap => !(is_live && !is_race),
            Column::WearPrediction => !(is_live && is_race),
            Column::WingDamage => !is_race,
            _ => false,
        }
    }
}

/// compute_hidden_columns returns the columns to hide for the given live flag and session type.
pub fn compute_hidden_columns(is_live: bool, session_type: SessionType) -> BTreeSet<Column> {
    Column::ALL
        .iter()
        .copied()
        .filter(|column| column.is_hidden(is_live, session_type))
        .collect()
}

/// visible_columns returns the complement of `hidden` in display order.
pub fn visible_columns(hidden: &BTreeSet<Column>) -> Vec<Column> {
    Column::ALL
        .iter()
        .copied()
        .filter(|column| !hidden.contains(column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden(is_live: bool, session_type: SessionType) -> Vec<Column> {
        compute_hidden_columns(is_live, session_type)
            .into_iter()
            .collect()
    }

    #[test]
    fn live_race() {
        assert_eq!(
            hidden(true, SessionType::Race),
            vec![Column::Delta, Column::CurrentLap]
        );
    }

    #[test]
    fn live_qualifying() {
        assert_eq!(
            hidden(true, SessionType::Qualifying),
            vec![Column::Delta, Column::Fuel, Column::WearPrediction, Column::WingDamage]
        );
        assert_eq!(
            hidden(true, SessionType::TimeTrial),
            hidden(true, SessionType::Practice)
        );
    }

    #[test]
    fn replay_race() {
        assert_eq!(
            hidden(false, SessionType::Race),
            vec![Column::CurrentLap, Column::Fuel, Column::WearPrediction]
        );
    }

    #[test]
    fn replay_practice() {
        assert_eq!(
            hidden(false, SessionType::Practice),
            vec![
                Column::CurrentLap,
                Column::Fuel,
                Column::WearPrediction,
                Column::WingDamage
            ]
        );
    }

    #[test]
    fn always_shown_columns() {
        for &is_live in &[true, false] {
            for &session_type in &[
                SessionType::Practice,
                SessionType::Qualifying,
                SessionType::Race,
                SessionType::TimeTrial,
                SessionType::Unknown,
            ] {
                let hidden = compute_hidden_columns(is_live, session_type);
                for column in [Column::Position, Column::Driver, Column::LastLap, Column::BestLap] {
                    assert!(!hidden.contains(&column));
                }
            }
        }
    }

    #[test]
    fn visible_is_the_complement() {
        let hidden = compute_hidden_columns(true, SessionType::Race);
        let visible = visible_columns(&hidden);
        assert_eq!(visible.len() + hidden.len(), Column::ALL.len());
        assert!(visible.contains(&Column::Fuel));
        assert!(!visible.contains(&Column::Delta));
    }
}
