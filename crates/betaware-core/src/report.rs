//! Summary statistics over a list of bets.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Bet, DateRange, Outcome};

/// Number of bets the dashboard shows
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// History filter. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BetFilter {
    pub range: Option<DateRange>,
    pub outcome: Option<Outcome>,
}

impl BetFilter {
    pub fn matches(&self, bet: &Bet) -> bool {
        self.range.is_none_or(|range| range.contains(bet.created_at))
            && self.outcome.is_none_or(|outcome| outcome == bet.outcome)
    }

    pub fn apply(&self, bets: Vec<Bet>) -> Vec<Bet> {
        bets.into_iter().filter(|bet| self.matches(bet)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BetReport {
    pub total_bets: usize,
    pub total_staked: Decimal,
    pub total_won: Decimal,
    pub total_lost: Decimal,
    /// `total_won - total_lost`
    pub net: Decimal,
    /// Share of won bets, as a percentage rounded to one decimal place
    pub win_rate: Decimal,
    pub staked_by_game: BTreeMap<String, Decimal>,
}

impl BetReport {
    pub fn from_bets(bets: &[Bet]) -> Self {
        let mut report = Self {
            total_bets: bets.len(),
            ..Self::default()
        };
        let mut won_count = 0_usize;

        for bet in bets {
            report.total_staked += bet.amount;
            match bet.outcome {
                Outcome::Won => {
                    report.total_won += bet.amount;
                    won_count += 1;
                }
                Outcome::Lost => report.total_lost += bet.amount,
            }
            *report
                .staked_by_game
                .entry(bet.game.clone())
                .or_insert(Decimal::ZERO) += bet.amount;
        }

        report.net = report.total_won - report.total_lost;
        if report.total_bets > 0 {
            report.win_rate = (Decimal::from(won_count) * Decimal::ONE_HUNDRED
                / Decimal::from(report.total_bets))
            .round_dp(1);
        }
        report
    }
}

/// The `count` newest bets, newest first.
pub fn recent(bets: &[Bet], count: usize) -> Vec<Bet> {
    let mut sorted = bets.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    sorted.truncate(count);
    sorted
}
