use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Textual form of every date field in snapshots.
pub const SNAPSHOT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Forward,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown player position {0:?}")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

impl TryFrom<String> for Position {
    type Error = UnknownPosition;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub founded: i32,
    pub stadium: String,
    pub points: i32,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub position: Position,
    pub goals: i32,
    pub team_id: i64,
    pub photo_url: Option<String>,
    pub is_starter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(serialize_with = "serialize_snapshot_date")]
    pub date: NaiveDateTime,
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct GoalRow {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub minute: i32,
}

fn serialize_snapshot_date<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(SNAPSHOT_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn position_parses_display_names() {
        assert_eq!("Forward".parse::<Position>(), Ok(Position::Forward));
        assert_eq!(" goalkeeper ".parse::<Position>(), Ok(Position::Goalkeeper));
        assert_eq!(
            "Winger".parse::<Position>(),
            Err(UnknownPosition("Winger".to_string()))
        );
    }

    #[test]
    fn match_row_serializes_date_in_snapshot_format() {
        let row = MatchRow {
            id: 1,
            home_team_id: 1,
            away_team_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 7, 5)
                .and_then(|d| d.and_hms_opt(18, 30, 0))
                .unwrap(),
            home_score: 2,
            away_score: 1,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["date"], json!("2024-07-05 18:30:00"));
        assert_eq!(value["home_score"], json!(2));
    }

    #[test]
    fn player_row_serializes_position_as_text() {
        let row = PlayerRow {
            id: 7,
            name: "Malcom".into(),
            position: Position::Forward,
            goals: 8,
            team_id: 1,
            photo_url: None,
            is_starter: true,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["position"], json!("Forward"));
        assert_eq!(value["photo_url"], json!(null));
    }
}
