/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, Write};

use arbiter::{Cli, Engine};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Initialize logging. The session itself owns stdout.
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    let mut engine = Engine::new(cli.config());

    if let Err(e) = engine.run(io::stdin().lock(), io::stdout().lock()) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
    }
}
