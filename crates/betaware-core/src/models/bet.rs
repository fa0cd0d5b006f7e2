//! Bet model

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a bet. Client-created bets use the creation time in Unix ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(i64);

impl BetId {
    /// Create an ID from a raw value
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Create a client-side ID from the current time
    #[must_use]
    pub fn now() -> Self {
        Self(crate::util::unix_timestamp_millis_now())
    }

    /// Get the raw value of this ID
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a bet ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "GANHOU")]
    Won,
    #[serde(rename = "PERDEU")]
    Lost,
}

impl Outcome {
    /// Wire representation used by the REST API and the local mirror
    #[must_use]
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Won => "GANHOU",
            Self::Lost => "PERDEU",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => f.write_str("won"),
            Self::Lost => f.write_str("lost"),
        }
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "won" | "win" | "ganhou" => Ok(Self::Won),
            "lost" | "loss" | "perdeu" => Ok(Self::Lost),
            other => Err(format!("unknown outcome '{other}' (expected won or lost)")),
        }
    }
}

/// A recorded bet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "jogo")]
    pub game: String,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "resultado")]
    pub outcome: Outcome,
    #[serde(rename = "data")]
    pub created_at: DateTime<Utc>,
}

/// A bet as submitted by the user, before an ID and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBet {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "jogo")]
    pub game: String,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "resultado")]
    pub outcome: Outcome,
}

impl NewBet {
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        game: impl Into<String>,
        amount: Decimal,
        outcome: Outcome,
    ) -> Self {
        Self {
            category: category.into(),
            game: game.into(),
            amount,
            outcome,
        }
    }

    /// Trim text fields and reject blank names or negative amounts.
    pub fn normalized(self) -> Result<Self, String> {
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err("Bet category cannot be empty".to_string());
        }
        let game = self.game.trim().to_string();
        if game.is_empty() {
            return Err("Bet game cannot be empty".to_string());
        }
        if self.amount < Decimal::ZERO {
            return Err("Bet amount cannot be negative".to_string());
        }
        Ok(Self {
            category,
            game,
            amount: self.amount,
            outcome: self.outcome,
        })
    }

    /// Materialize the bet with a client-assigned ID and timestamp
    #[must_use]
    pub fn into_bet(self, id: BetId, created_at: DateTime<Utc>) -> Bet {
        Bet {
            id,
            category: self.category,
            game: self.game,
            amount: self.amount,
            outcome: self.outcome,
            created_at,
        }
    }
}

/// Inclusive time window used to filter bets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The window covering the last `days` days up to `now`.
    ///
    /// Returns `None` when the start would fall outside the representable
    /// date range.
    #[must_use]
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Option<Self> {
        let start = now.checked_sub_signed(TimeDelta::try_days(days)?)?;
        Some(Self { start, end: now })
    }

    /// Both bounds are inclusive
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    /// ISO-8601 bounds as sent in `inicio`/`fim` query parameters
    #[must_use]
    pub fn query_bounds(&self) -> (String, String) {
        (
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

/// Keep only bets created inside `range`
#[must_use]
pub fn filter_by_range(bets: Vec<Bet>, range: &DateRange) -> Vec<Bet> {
    bets.into_iter()
        .filter(|bet| range.contains(bet.created_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn bet(id: i64, day: u32) -> Bet {
        NewBet::new("Futebol", "Flamengo x Vasco", Decimal::new(1050, 2), Outcome::Won)
            .into_bet(BetId::new(id), at(day))
    }

    #[test]
    fn bet_uses_wire_field_names() {
        let json = serde_json::to_value(bet(1, 1)).unwrap();
        assert_eq!(json["categoria"], "Futebol");
        assert_eq!(json["jogo"], "Flamengo x Vasco");
        assert_eq!(json["valor"], 10.5);
        assert_eq!(json["resultado"], "GANHOU");
        assert_eq!(json["id"], 1);
        assert!(json["data"].as_str().unwrap().starts_with("2024-03-01T12:00:00"));
    }

    #[test]
    fn bet_parses_server_payload() {
        let payload = r#"{
            "id": 42,
            "categoria": "Basquete",
            "jogo": "Lakers x Warriors",
            "valor": 25,
            "resultado": "PERDEU",
            "data": "2024-03-05T08:30:00.000Z"
        }"#;
        let parsed: Bet = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.id, BetId::new(42));
        assert_eq!(parsed.amount, Decimal::new(25, 0));
        assert_eq!(parsed.outcome, Outcome::Lost);
        assert_eq!(parsed.created_at, Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap());
    }

    #[test]
    fn outcome_parses_english_and_wire_names() {
        assert_eq!("won".parse::<Outcome>().unwrap(), Outcome::Won);
        assert_eq!("GANHOU".parse::<Outcome>().unwrap(), Outcome::Won);
        assert_eq!(" Lost ".parse::<Outcome>().unwrap(), Outcome::Lost);
        assert_eq!("perdeu".parse::<Outcome>().unwrap(), Outcome::Lost);
        assert!("draw".parse::<Outcome>().is_err());
    }

    #[test]
    fn new_bet_normalization_rejects_invalid_values() {
        let blank = NewBet::new("  ", "game", Decimal::ONE, Outcome::Won);
        assert!(blank.normalized().unwrap_err().contains("category"));

        let no_game = NewBet::new("Tênis", " ", Decimal::ONE, Outcome::Won);
        assert!(no_game.normalized().unwrap_err().contains("game"));

        let negative = NewBet::new("Tênis", "Nadal x Medvedev", Decimal::new(-1, 0), Outcome::Lost);
        assert!(negative.normalized().unwrap_err().contains("negative"));
    }

    #[test]
    fn new_bet_normalization_trims_and_allows_zero() {
        let bet = NewBet::new(" Tênis ", " Djokovic x Alcaraz ", Decimal::ZERO, Outcome::Lost)
            .normalized()
            .unwrap();
        assert_eq!(bet.category, "Tênis");
        assert_eq!(bet.game, "Djokovic x Alcaraz");
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = DateRange::new(at(2), at(4));
        assert!(!range.contains(at(1)));
        assert!(range.contains(at(2)));
        assert!(range.contains(at(3)));
        assert!(range.contains(at(4)));
        assert!(!range.contains(at(5)));
    }

    #[test]
    fn filter_by_range_keeps_bets_inside_window() {
        let bets = vec![bet(1, 1), bet(2, 2), bet(3, 3), bet(4, 4), bet(5, 5)];
        let ids: Vec<i64> = filter_by_range(bets, &DateRange::new(at(2), at(4)))
            .iter()
            .map(|bet| bet.id.value())
            .collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn query_bounds_use_millisecond_utc_format() {
        let range = DateRange::new(at(1), at(2));
        let (start, end) = range.query_bounds();
        assert_eq!(start, "2024-03-01T12:00:00.000Z");
        assert_eq!(end, "2024-03-02T12:00:00.000Z");
    }

    #[test]
    fn last_days_ends_at_now() {
        let now = at(10);
        let range = DateRange::last_days(7, now).unwrap();
        assert_eq!(range.end, now);
        assert_eq!(range.start, at(3));
    }

    #[test]
    fn last_days_out_of_range_is_none() {
        let now = at(10);
        assert_eq!(DateRange::last_days(i64::MAX, now), None);
        assert_eq!(DateRange::last_days(10_000_000_000_000, now), None);
        assert_eq!(DateRange::last_days(1_000_000_000, now), None);
    }
}
