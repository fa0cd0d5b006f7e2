use betaware_core::report::BetReport;
use chrono::Utc;

use crate::commands::common::{last_days_range, CliGateway};
use crate::error::CliError;

pub async fn run_report(
    gateway: &CliGateway,
    last_days: Option<i64>,
    as_json: bool,
) -> Result<(), CliError> {
    let bets = match last_days {
        Some(days) => {
            let range = last_days_range(days, Utc::now())?;
            gateway.list_bets_by_range(&range).await?
        }
        None => gateway.list_bets().await?,
    };
    let report = BetReport::from_bets(&bets);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_report_lines(&report) {
            println!("{line}");
        }
    }
    Ok(())
}

pub fn format_report_lines(report: &BetReport) -> Vec<String> {
    let mut lines = vec![
        format!("Total bets:   {}", report.total_bets),
        format!("Total staked: R$ {:.2}", report.total_staked),
        format!("Total won:    R$ {:.2}", report.total_won),
        format!("Total lost:   R$ {:.2}", report.total_lost),
        format!("Net result:   R$ {:.2}", report.net),
        format!("Win rate:     {:.1}%", report.win_rate),
    ];

    if !report.staked_by_game.is_empty() {
        lines.push(String::new());
        lines.push("Staked per game:".to_string());
        for (game, amount) in &report.staked_by_game {
            lines.push(format!("  {game:<28} R$ {amount:.2}"));
        }
    }
    lines
}
