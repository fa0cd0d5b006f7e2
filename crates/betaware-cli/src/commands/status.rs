use std::time::Duration;

use betaware_core::health::IntervalSchedule;

use crate::commands::common::{availability_label, CliGateway};
use crate::error::CliError;

const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub async fn run_status(
    gateway: &CliGateway,
    watch: bool,
    check_interval: Duration,
) -> Result<(), CliError> {
    println!("API: {}", gateway.remote().base_url());
    println!("Availability: {}", availability_label(gateway.health().is_available()));

    let authenticated = gateway.is_authenticated().await;
    match gateway.current_session().await? {
        Some(session) if authenticated => {
            let mode = if session.is_offline() { " (offline session)" } else { "" };
            println!("Logged in as {} ({}){mode}", session.username, session.full_name);
        }
        _ => println!("Not logged in."),
    }

    if watch {
        watch_availability(gateway, check_interval).await?;
    }
    Ok(())
}

async fn watch_availability(gateway: &CliGateway, check_interval: Duration) -> Result<(), CliError> {
    println!(
        "Watching availability every {}s, press Ctrl+C to stop.",
        check_interval.as_secs()
    );
    let monitor = gateway
        .monitor()
        .spawn(IntervalSchedule::every(check_interval));
    let mut last = gateway.health().is_available();
    let mut poll = tokio::time::interval(WATCH_POLL_INTERVAL);

    let result = loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => break signal,
            _ = poll.tick() => {
                let available = gateway.health().is_available();
                if available != last {
                    println!(
                        "{}  {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        availability_label(available)
                    );
                    last = available;
                }
            }
        }
    };

    monitor.abort();
    result?;
    Ok(())
}
