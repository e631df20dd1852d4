mod cli;
mod error;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use futures::StreamExt;
use geobatch_core::{address_stream, GeoBatch};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let addresses = if cli.addresses.is_empty() {
        read_stdin_addresses()?
    } else {
        cli.addresses.clone()
    };

    let batch = GeoBatch::new(cli.to_config())?;
    let mut records = std::pin::pin!(batch.geocode(address_stream(addresses)));

    // Records are rendered as NDJSON the moment they resolve; a failed
    // address is reported on stderr without aborting the rest of the run.
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    while let Some(item) = records.next().await {
        match item {
            Ok(record) => {
                serde_json::to_writer(&mut out, &record)?;
                out.write_all(b"\n")?;
            }
            Err(failure) => {
                failed += 1;
                eprintln!("error: {failure}");
            }
        }
    }
    out.flush()?;

    if failed > 0 {
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}

fn read_stdin_addresses() -> Result<Vec<String>, CliError> {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let mut addresses = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            addresses.push(trimmed.to_owned());
        }
    }

    Ok(addresses)
}
