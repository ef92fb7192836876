mod accounts;
mod amounts;
mod bank;
mod cli;
mod clock;
mod confirmation_code;
mod errors;
mod interest_rate;
mod session;
mod timezone;
mod transaction_id;
mod vault;

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::ledger_operation;

fn main() -> ExitCode {
    // Logs go to stderr so the report on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    ledger_operation()
}
