use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use summarmuse::client::{ExportFormat, Phase, SelectedFile, Session, SummarizeClient};
use summarmuse::core::models::LengthTier;
use summarmuse::render;
use url::Url;

/// Summarize a PDF or image through a running summarmuse server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// PDF, PNG or JPEG file to summarize
    file: PathBuf,

    /// Summary length: short, medium or long
    #[arg(short, long, default_value_t = LengthTier::Medium, value_parser = parse_length)]
    length: LengthTier,

    /// Base URL of the server
    #[arg(long, env = "SUMMARMUSE_SERVER", default_value = "http://localhost:5000")]
    server: Url,

    /// Also save the summary as a download
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,

    /// Directory for the exported file
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn parse_length(raw: &str) -> Result<LengthTier, String> {
    raw.parse().map_err(|e: summarmuse::SummarizeError| e.user_message())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let client = SummarizeClient::new(&cli.server)?;

    let mut session = Session::new();
    session.set_length(cli.length);
    session.select_file(SelectedFile::from_path(&cli.file)?);

    let Some(request) = session.begin_request() else {
        eprintln!("{}", session.error().unwrap_or("Nothing to summarize."));
        return Ok(ExitCode::FAILURE);
    };

    eprintln!("Reading your document...");
    let outcome = client.upload(&request).await;
    session.finish(outcome);

    match session.phase() {
        Phase::Success { summary, .. } => {
            println!("{}", render::to_terminal(&render::render(summary)));
            if let Some(format) = cli.export
                && let Some(export) = session.export(format)
            {
                let saved = export.save_in(&cli.out).await?;
                eprintln!("Saved {}", saved.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            eprintln!("{}", session.error().unwrap_or("Failed to generate summary."));
            Ok(ExitCode::FAILURE)
        }
    }
}
