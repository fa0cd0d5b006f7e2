use betaware_core::report::{recent, BetFilter};
use betaware_core::{NewBet, Outcome};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::cli::{BetCommands, ListArgs};
use crate::commands::common::{
    bet_to_list_item, format_bet_lines, outcome_label, resolve_range, BetListItem, CliGateway,
};
use crate::error::CliError;

pub async fn run_bet(gateway: &CliGateway, command: BetCommands) -> Result<(), CliError> {
    match command {
        BetCommands::Add {
            category,
            game,
            amount,
            outcome,
        } => run_add(gateway, category, game, amount, outcome).await,
        BetCommands::List(args) => run_list(gateway, &args).await,
    }
}

async fn run_add(
    gateway: &CliGateway,
    category: String,
    game: String,
    amount: Decimal,
    outcome: Outcome,
) -> Result<(), CliError> {
    let bet = gateway
        .create_bet(NewBet::new(category, game, amount, outcome))
        .await?;
    println!(
        "Recorded bet {}: {} / {} R$ {:.2} {}",
        bet.id,
        bet.category,
        bet.game,
        bet.amount,
        outcome_label(bet.outcome)
    );
    Ok(())
}

async fn run_list(gateway: &CliGateway, args: &ListArgs) -> Result<(), CliError> {
    let range = resolve_range(args, Utc::now())?;
    let bets = match &range {
        Some(range) => gateway.list_bets_by_range(range).await?,
        None => gateway.list_bets().await?,
    };

    let filter = BetFilter {
        range: None,
        outcome: args.outcome,
    };
    let mut bets = filter.apply(bets);
    if let Some(limit) = args.limit {
        bets = recent(&bets, limit);
    }

    if args.json {
        let items = bets.iter().map(bet_to_list_item).collect::<Vec<BetListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_bet_lines(&bets) {
            println!("{line}");
        }
    }
    Ok(())
}
