// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator tool to inspect the default access policy, resolve effective access and manage
//! per-user overrides in a SQLite database.
use std::io::stdout;

use clap::Parser;
use hub_access_store::SqliteStoreBuilder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::commands::{Args, Command, print_matrix, run};

mod commands;

pub fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let args = Args::parse();

    // Printing the static table doesn't need a database.
    if let Command::Matrix = args.command {
        return print_matrix(&mut stdout());
    }

    let store = SqliteStoreBuilder::new()
        .database_url(&args.database_url)
        .max_connections(args.max_connections)
        .build()
        .await?;

    run(&args.command, &store, &mut stdout()).await
}
