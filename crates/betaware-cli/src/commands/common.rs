use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use betaware_core::config::{default_config_path, ClientConfig};
use betaware_core::face::{FaceAuthClient, FaceImage};
use betaware_core::remote::HttpRemoteApi;
use betaware_core::store::LibSqlKeyValueStore;
use betaware_core::util::normalize_text_option;
use betaware_core::{Bet, DateRange, Gateway, HealthState, Outcome};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::cli::{GlobalArgs, ListArgs};
use crate::error::CliError;

pub type CliGateway = Gateway<HttpRemoteApi, LibSqlKeyValueStore>;

#[derive(Debug, Serialize)]
pub struct BetListItem {
    pub id: i64,
    pub category: String,
    pub game: String,
    pub amount: String,
    pub outcome: String,
    pub created_at: String,
}

/// Config file, then environment, then command-line flags.
pub fn resolve_config(global: &GlobalArgs) -> Result<ClientConfig, CliError> {
    let mut config = match global.config.as_deref() {
        Some(path) => ClientConfig::load_from_path(path)?,
        None => match default_config_path() {
            Some(path) => ClientConfig::load_from_path(&path)?,
            None => ClientConfig::default(),
        },
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    apply_flags(&mut config, global)?;
    Ok(config)
}

pub fn apply_flags(config: &mut ClientConfig, global: &GlobalArgs) -> Result<(), CliError> {
    let mut overrides = Vec::new();
    if let Some(url) = normalize_text_option(global.api_url.clone()) {
        overrides.push((betaware_core::config::ENV_API_URL, url));
    }
    if let Some(url) = normalize_text_option(global.face_api_url.clone()) {
        overrides.push((betaware_core::config::ENV_FACE_API_URL, url));
    }
    if let Some(dir) = &global.data_dir {
        overrides.push((
            betaware_core::config::ENV_DATA_DIR,
            dir.display().to_string(),
        ));
    }

    // Flags go through the same validation as environment variables
    config.apply_env(|key| {
        overrides
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.clone())
    })?;
    Ok(())
}

/// Open the local mirror and the API client. Unless `offline` is set, the
/// API is probed once so the command is routed on a fresh availability flag.
pub async fn open_gateway(config: &ClientConfig, offline: bool) -> Result<CliGateway, CliError> {
    let remote = HttpRemoteApi::new(&config.api_base_url, config.request_timeout())?;
    let store = LibSqlKeyValueStore::open_path(config.database_path()?).await?;
    let gateway = Gateway::new(remote, store, HealthState::new(!offline));

    if offline {
        tracing::debug!("Offline mode forced, skipping health probe");
    } else {
        gateway.monitor().check_now().await;
    }
    Ok(gateway)
}

pub fn face_client(config: &ClientConfig) -> Result<FaceAuthClient, CliError> {
    Ok(FaceAuthClient::new(
        &config.face_api_base_url,
        config.request_timeout(),
    )?)
}

pub fn read_face_image(path: &Path) -> Result<FaceImage, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ImageRead {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map_or_else(|| "face.jpg".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(FaceImage::from_file_name(bytes, file_name))
}

/// Use the given password, or read one line from stdin.
pub fn resolve_password(password: Option<String>) -> Result<String, CliError> {
    if let Some(password) = password {
        return normalize_password(&password);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    normalize_password(&line)
}

pub fn normalize_password(raw: &str) -> Result<String, CliError> {
    let password = raw.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        Err(CliError::EmptyPassword)
    } else {
        Ok(password.to_string())
    }
}

/// The period selected by `--from/--to` or `--last-days`, if any.
pub fn resolve_range(args: &ListArgs, now: DateTime<Utc>) -> Result<Option<DateRange>, CliError> {
    if let Some(days) = args.last_days {
        return last_days_range(days, now).map(Some);
    }

    match (args.from, args.to) {
        (None, None) => Ok(None),
        (from, to) => {
            let start = from.map_or_else(DateTime::<Utc>::default, start_of_day);
            let end = to.map_or(now, end_of_day);
            if start > end {
                return Err(CliError::InvalidPeriod(
                    "--from must not be after --to".to_string(),
                ));
            }
            Ok(Some(DateRange::new(start, end)))
        }
    }
}

pub fn last_days_range(days: i64, now: DateTime<Utc>) -> Result<DateRange, CliError> {
    if days <= 0 {
        return Err(CliError::InvalidPeriod(
            "--last-days must be greater than zero".to_string(),
        ));
    }
    DateRange::last_days(days, now)
        .ok_or_else(|| CliError::InvalidPeriod("--last-days is too large".to_string()))
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map_or_else(|| start_of_day(date), |end| end.and_utc())
}

pub fn format_bet_lines(bets: &[Bet]) -> Vec<String> {
    if bets.is_empty() {
        return vec!["No bets found.".to_string()];
    }

    bets.iter()
        .map(|bet| {
            let amount = format!("{:.2}", bet.amount);
            format!(
                "{}  {}  {:<10} {:<28} R$ {:>10}  {}",
                bet.id,
                bet.created_at.format("%Y-%m-%d %H:%M"),
                bet.category,
                bet.game,
                amount,
                outcome_label(bet.outcome),
            )
        })
        .collect()
}

pub fn bet_to_list_item(bet: &Bet) -> BetListItem {
    BetListItem {
        id: bet.id.value(),
        category: bet.category.clone(),
        game: bet.game.clone(),
        amount: format!("{:.2}", bet.amount),
        outcome: bet.outcome.to_string(),
        created_at: bet.created_at.to_rfc3339(),
    }
}

pub const fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => "WON",
        Outcome::Lost => "LOST",
    }
}

pub const fn availability_label(available: bool) -> &'static str {
    if available {
        "online"
    } else {
        "offline (using local data)"
    }
}
