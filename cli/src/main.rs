//! `auditgate` entry point.

use std::io::Write;

use clap::Parser;

fn init_tracing() {
    // Diagnostics go to stderr; stdout is reserved for the report itself so
    // `auditgate --json | jq` stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = auditgate_cli::Cli::parse();

    match auditgate_cli::run(cli).await {
        Ok(verdict) => {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(verdict.output.as_bytes());
            let _ = stdout.flush();
            std::process::exit(verdict.exit.code());
        }
        Err(err) => {
            eprintln!("auditgate: {err:#}");
            std::process::exit(1);
        }
    }
}
