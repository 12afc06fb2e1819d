use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use photo_report::{ConsoleNotifier, Notifier, ReportClient, ReportSession, Severity};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOGO_MISSING_NOTICE: &str = "Logo not found. Add it at assets/logo.png";

#[derive(Parser)]
#[command(
    name = "photoreport",
    about = "Assemble photo reports and have the render server turn them into PDFs",
    version
)]
struct Cli {
    /// Base URL of the render server
    #[arg(
        long,
        global = true,
        env = "PHOTO_REPORT_SERVER",
        default_value = "http://localhost:5000"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a report from photo files and render it to PDF
    Generate(GenerateArgs),

    /// Check the render server's status
    Check,
}

#[derive(Args)]
struct GenerateArgs {
    /// Photo files, in report order
    photos: Vec<PathBuf>,

    /// Report title
    #[arg(short, long)]
    title: String,

    /// Location the report covers
    #[arg(short, long)]
    location: String,

    /// System reference shown in the report header
    #[arg(short, long)]
    system_ref: String,

    /// Report date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Issuer named in the report footer
    #[arg(short, long)]
    issued_by: String,

    /// Caption for each photo, applied in photo order
    #[arg(short, long)]
    captions: Vec<String>,

    /// Where to save the PDF (defaults to the generated name in the
    /// current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photo_report=info,photo_report_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = ReportClient::new(cli.server);

    match cli.command {
        Commands::Generate(args) => generate(&client, args).await,
        Commands::Check => check(&client).await,
    }
}

async fn generate(client: &ReportClient, args: GenerateArgs) -> Result<()> {
    let notifier = Arc::new(ConsoleNotifier);
    startup_health_notice(client, notifier.as_ref()).await;

    let mut session = ReportSession::with_notifier(notifier);
    let fields = session.fields_mut();
    fields.title = args.title;
    fields.location = args.location;
    fields.system_reference = args.system_ref;
    fields.issued_by = args.issued_by;
    if let Some(date) = args.date {
        fields.date = date;
    }

    let summary = match session.ingest_paths(&args.photos).await {
        Ok(summary) => summary,
        // already reported through the notifier
        Err(_) => std::process::exit(1),
    };

    if args.captions.len() > summary.added.len() {
        warn!(
            captions = args.captions.len(),
            photos = summary.added.len(),
            "more captions than ingested photos, extras ignored"
        );
    }
    for (id, caption) in summary.added.iter().zip(&args.captions) {
        session.edit_caption(*id, caption);
    }

    let report = match session.submit(client).await {
        Ok(report) => report,
        Err(_) => std::process::exit(1),
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&report.file_name));
    tokio::fs::write(&output, &report.content).await?;
    println!("✓ Report saved to {}", output.display());

    Ok(())
}

/// Best-effort status probe before assembling: surfaces the missing-logo
/// notice, logs transport failures without surfacing or blocking anything.
async fn startup_health_notice(client: &ReportClient, notifier: &dyn Notifier) {
    match client.health().await {
        Ok(status) if !status.logo_exists => {
            notifier.notify(Severity::Info, LOGO_MISSING_NOTICE);
        }
        Ok(_) => {}
        Err(err) => {
            warn!(error = %err, "health check failed");
        }
    }
}

async fn check(client: &ReportClient) -> Result<()> {
    let status = client.health().await.map_err(|err| {
        anyhow::anyhow!("Failed to reach server at {}: {err}", client.base_url())
    })?;

    println!("✓ Server at {}: status {}", client.base_url(), status.status);
    if status.logo_exists {
        println!("✓ Branding logo present");
    } else {
        println!("ℹ {LOGO_MISSING_NOTICE}");
    }

    Ok(())
}
