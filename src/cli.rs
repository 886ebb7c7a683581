//! Command-line interface: run the HTTP API, or use the extraction client,
//! merge engine and renderers directly on local files.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{start_api_server, ApiContext};
use crate::config::{AppConfig, ConfigError};
use crate::merge;
use crate::models::{Category, CategoryValue, ModelError};
use crate::pipeline::extraction::{DocumentPayload, ExtractionClient, ExtractionError, GeminiClient};
use crate::report::{self, RenderError, ReportFormat, WelcomeReport};

#[derive(Parser, Debug)]
#[command(name = "boasvindas")]
#[command(about = "Condominium welcome report: document extraction, merging and rendering")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to bind, overrides BOASVINDAS_BIND
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// Extract documents of one category and print the fragment as JSON.
    /// Several files are consolidated in a single request.
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Category tag, e.g. `convencao`, `financeiro`, `certidoes`
        #[arg(short, long)]
        category: String,
        /// Declared MIME type when the extension is not enough
        #[arg(long)]
        mime: Option<String>,
    },
    /// Render a saved report model (JSON) as HTML, PDF or DOCX
    Report {
        input: PathBuf,
        /// `html` (or `pdf`, printable HTML), `native-pdf`, `word`/`docx`
        #[arg(short, long, default_value = "html")]
        format: String,
        /// Output file; defaults to the report's own file name
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the manager name from the model
        #[arg(long)]
        manager_name: Option<String>,
    },
    /// Fold fragment files through the merge engine and print the result
    Merge {
        #[arg(short, long)]
        category: String,
        #[arg(required = true)]
        fragments: Vec<PathBuf>,
    },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Server error: {0}")]
    Server(String),
}

/// Run one parsed command to completion.
pub async fn execute(cli: Cli, config: AppConfig) -> Result<(), CliError> {
    match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Extract {
            files,
            category,
            mime,
        } => {
            let category = Category::from_str(&category)?;
            let client: Arc<dyn ExtractionClient> = Arc::new(gemini_client(&config)?);
            let fragment = extract_files(client, files, category, mime).await?;
            print_json(&fragment.to_json());
            Ok(())
        }
        Command::Report {
            input,
            format,
            output,
            manager_name,
        } => {
            let format = ReportFormat::from_str(&format)?;
            let path = render_report_file(&input, format, output, manager_name.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Merge {
            category,
            fragments,
        } => {
            let category = Category::from_str(&category)?;
            match merge_fragment_files(category, &fragments)? {
                Some(value) => print_json(&value.to_json()),
                None => println!("null"),
            }
            Ok(())
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

pub fn gemini_client(config: &AppConfig) -> Result<GeminiClient, CliError> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or(CliError::MissingApiKey)?;
    Ok(GeminiClient::new(
        &config.gemini_base_url,
        api_key,
        &config.gemini_model,
        config.request_timeout_secs,
    )?
    .with_max_file_bytes(config.max_file_bytes))
}

async fn serve(config: AppConfig, bind: Option<std::net::SocketAddr>) -> Result<(), CliError> {
    let client = Arc::new(gemini_client(&config)?);
    let addr = bind.unwrap_or(config.bind_addr);
    tracing::info!(
        model = %config.gemini_model,
        workers = config.workers,
        policy = ?config.removal_policy,
        "Starting API"
    );

    let ctx = ApiContext::new(config, client);
    let server = start_api_server(ctx, addr).await.map_err(CliError::Server)?;
    tracing::info!(addr = %server.addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for shutdown signal: {e}");
    }
    server.stop().await;
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<serde_json::Value, CliError> {
    serde_json::from_slice(&read_file(path)?).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn load_payload(path: &Path, mime: Option<&str>) -> Result<DocumentPayload, CliError> {
    let bytes = read_file(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(DocumentPayload::new(file_name, mime, bytes))
}

/// Run the blocking client off the async runtime. One file goes through
/// `extract`, several through `extract_many`.
pub async fn extract_files(
    client: Arc<dyn ExtractionClient>,
    paths: Vec<PathBuf>,
    category: Category,
    mime: Option<String>,
) -> Result<CategoryValue, CliError> {
    let mut payloads = paths
        .iter()
        .map(|path| load_payload(path, mime.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count = payloads.len(), category = %category, "Extracting");

    let result = if payloads.len() == 1 {
        let payload = payloads.remove(0);
        tokio::task::spawn_blocking(move || client.extract(&payload, category)).await
    } else {
        tokio::task::spawn_blocking(move || client.extract_many(&payloads, category)).await
    };
    result
        .map_err(|e| CliError::Server(format!("extraction task failed: {e}")))?
        .map_err(CliError::from)
}

/// Fold fragment files in the order given. `None` when no fragment
/// contributed.
pub fn merge_fragment_files(
    category: Category,
    paths: &[PathBuf],
) -> Result<Option<CategoryValue>, CliError> {
    let fragments = paths
        .iter()
        .map(|path| Ok(CategoryValue::from_json(category, read_json(path)?)?))
        .collect::<Result<Vec<_>, CliError>>()?;
    tracing::debug!(category = %category, count = fragments.len(), "Merging fragments");
    Ok(merge::fold(fragments))
}

/// Render `input` and write it to `output`, or next to the input under the
/// report's own file name. Returns the written path.
pub fn render_report_file(
    input: &Path,
    format: ReportFormat,
    output: Option<PathBuf>,
    manager_name: Option<&str>,
) -> Result<PathBuf, CliError> {
    let mut model: WelcomeReport =
        serde_json::from_value(read_json(input)?).map_err(|source| CliError::Json {
            path: input.to_path_buf(),
            source,
        })?;
    if let Some(name) = manager_name.map(str::trim).filter(|n| !n.is_empty()) {
        model.manager_name = name.to_string();
    }

    let rendered = report::render(&model, format)?;
    let path = output.unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&rendered.file_name)
    });
    std::fs::write(&path, &rendered.bytes).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
