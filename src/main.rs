use std::fs::File;

use bet_slip::slip::{self, BetType, Money, Registry, SlipSession};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// The size of the channel for feeding slip commands.
const CHANNEL_SIZE: usize = 100;

/// One row of the report written to stdout. The final row carries the totals.
#[derive(Serialize)]
struct ReportRow<'a> {
    number: &'a str,
    bet_type: Option<BetType>,
    stake: Money,
    payout: Option<Money>,
    potential_win: Money,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "bet_slip=info".into()),
        )
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    if !(2..=3).contains(&args.len()) {
        eprintln!("Usage: {} <slip_csv_file> [registry_csv_file]", args[0]);
        std::process::exit(1);
    }
    let input_file = &args[1];

    let registry = match args.get(2) {
        Some(path) => Registry::from_path(path).expect("Failed to load bet-type registry"),
        None => Registry::default(),
    };
    info!(bet_types = registry.bet_types().count(), "Registry ready");

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut session = SlipSession::new(registry, receiver);

    let handle = tokio::spawn(async move {
        session.run().await;
        session
    });

    let file = File::open(input_file).expect("Failed to open slip CSV file");
    for command in slip::read_commands(file) {
        match command {
            Ok(command) => {
                if let Err(err) = sender.send(command).await {
                    warn!(%err, "Session stopped accepting commands");
                    break;
                }
            }
            Err(err) => warn!(%err, "Skipping command row"),
        }
    }

    drop(sender); // Close the sender to signal no more commands will be sent
    let session = handle
        .await
        .expect("Failed to join the slip session task");

    let slip = session.into_slip();
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for line in slip.lines() {
        let row = ReportRow {
            number: line.get_number(),
            bet_type: Some(line.get_bet_type()),
            stake: line.get_stake(),
            payout: Some(line.get_payout()),
            potential_win: line.potential_win(),
        };
        if let Err(err) = writer.serialize(row) {
            eprintln!("Error writing line: {err}");
        }
    }

    let totals = slip.totals();
    let summary = ReportRow {
        number: "total",
        bet_type: None,
        stake: totals.total_stake,
        payout: None,
        potential_win: totals.total_potential_win,
    };
    if let Err(err) = writer.serialize(summary) {
        eprintln!("Error writing totals: {err}");
    }
    info!(lines = totals.line_count, "Slip processed");
}
