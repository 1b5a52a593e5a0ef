//! CLI binary for devis2pdf.
//!
//! A thin shim over the library crate: `serve` runs the HTTP service,
//! `render` generates a single PDF from a request file without starting a
//! server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use devis2pdf::{build_markup, generate_pdf, serve, DocumentRequest, RenderConfig, DEFAULT_PORT};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the HTTP service on the default port (3000)
  devis2pdf serve

  # Run on a specific port
  PORT=8080 devis2pdf serve
  devis2pdf serve --port 8080

  # One-shot: render a request file to a PDF, no server involved
  devis2pdf render request.json -o devis.pdf

  # Inspect the synthesized markup without a browser installed
  devis2pdf render request.json --markup-only -o devis.html

THE REQUEST FILE:
  The same JSON body `POST /generate-pdf` accepts, e.g.:
    {
      "client_nom": "Dupont",
      "type_document": "DEVIS",
      "total_ht": 300,
      "tva": 20,
      "prestations": [
        {"libelle": "Peinture\nMurs et plafond",
         "quantite": 2, "prix_unitaire": 150, "total_ht": 300}
      ]
    }

ENVIRONMENT VARIABLES:
  PORT                 Listen port for `serve` (default 3000)
  DEVIS2PDF_BROWSER    Path to the Chrome/Chromium executable to drive
  RUST_LOG             Log filter override (default: info)
"#;

/// Render quote/invoice JSON into paginated A4 PDFs via headless Chromium.
#[derive(Parser, Debug)]
#[command(
    name = "devis2pdf",
    version,
    about = "Render quote/invoice JSON into paginated A4 PDFs via headless Chromium",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (POST /generate-pdf).
    Serve {
        /// Listen port.
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Render deadline per request, in seconds.
        #[arg(long, env = "DEVIS2PDF_RENDER_TIMEOUT", default_value_t = 90)]
        render_timeout: u64,

        /// Maximum browser engines alive at once.
        #[arg(long, env = "DEVIS2PDF_MAX_RENDERS", default_value_t = 2)]
        max_concurrent_renders: usize,

        /// Browser executable (auto-detected when unset).
        #[arg(long, env = "DEVIS2PDF_BROWSER")]
        browser: Option<PathBuf>,

        /// Run the engine with its sandbox enabled (off by default for
        /// containerized hosts).
        #[arg(long)]
        sandbox: bool,
    },

    /// Render one request file and exit.
    Render {
        /// Path to the request JSON file.
        input: PathBuf,

        /// Output path (defaults to the input name with .pdf/.html).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the synthesized HTML instead of printing a PDF.
        #[arg(long)]
        markup_only: bool,

        /// Browser executable (auto-detected when unset).
        #[arg(long, env = "DEVIS2PDF_BROWSER")]
        browser: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            port,
            render_timeout,
            max_concurrent_renders,
            browser,
            sandbox,
        } => {
            let mut builder = RenderConfig::builder()
                .render_timeout_secs(render_timeout)
                .max_concurrent_renders(max_concurrent_renders)
                .sandbox(sandbox);
            if let Some(path) = browser {
                builder = builder.browser_path(path);
            }
            let config = builder.build().context("Invalid configuration")?;

            serve(port, config).await.context("Service failed")?;
        }

        Command::Render {
            input,
            output,
            markup_only,
            browser,
        } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read '{}'", input.display()))?;
            let req: DocumentRequest =
                serde_json::from_str(&raw).context("Request file is not valid JSON")?;

            let mut builder = RenderConfig::builder();
            if let Some(path) = browser {
                builder = builder.browser_path(path);
            }
            let config = builder.build().context("Invalid configuration")?;

            let client = reqwest::Client::builder()
                .build()
                .context("Failed to build the HTTP client")?;

            if markup_only {
                let markup = build_markup(&req, &config, &client).await?;
                let path = output.unwrap_or_else(|| default_output(&input, "html"));
                std::fs::write(&path, markup)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                eprintln!("Wrote markup to {}", path.display());
            } else {
                let pdf = generate_pdf(&req, &config, &client).await?;
                let path = output.unwrap_or_else(|| default_output(&input, "pdf"));
                std::fs::write(&path, pdf)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                eprintln!("Wrote PDF to {}", path.display());
            }
        }
    }

    Ok(())
}

fn default_output(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}
