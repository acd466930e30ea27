//! # EmailEngine CLI
//!
//! Command-line interface for the EmailEngine email API.
//!
//! This module provides CLI commands for:
//! - Generating signed hosted authentication URLs
//! - Verifying webhook signatures
//! - Raw and resource-specific API calls
//! - Inspecting the effective configuration
//!
//! Configuration is layered, later sources overriding earlier ones:
//! 1. `$XDG_CONFIG_HOME/emailengine/config.toml` (optional)
//! 2. The file given with `--config` (must exist)
//! 3. Environment variables prefixed `EMAILENGINE__`, e.g. `EMAILENGINE__BASE_URL`
//! 4. The `--base-url` and `--access-token` flags

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use emailengine_sdk::client::{ClientConfig, EmailEngineClient, RequestOptions};
use emailengine_sdk::{ApiError, AuthPayload, ConfigurationError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// CLI Structure
// ============================================================================

/// EmailEngine CLI - Manage accounts and messages on an EmailEngine instance
#[derive(Debug, Parser)]
#[command(name = "emailengine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the EmailEngine email API")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "EMAILENGINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// EmailEngine base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// API access token
    #[arg(long)]
    pub access_token: Option<String>,

    /// Logging level, used when RUST_LOG is not set
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a signed URL for the hosted account authentication form
    AuthUrl {
        /// Account ID to register
        #[arg(long)]
        account: Option<String>,

        /// Display name of the account
        #[arg(long)]
        name: Option<String>,

        /// Email address of the account
        #[arg(long)]
        email: Option<String>,

        /// Where to send the user afterwards; defaults to the configured redirect URL
        #[arg(long)]
        redirect_url: Option<String>,

        /// Additional payload field; JSON values are embedded as JSON
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Verify the signature of a webhook body
    VerifyWebhook {
        /// Value of the X-EE-Wh-Signature header
        #[arg(short, long)]
        signature: String,

        /// File containing the raw body; stdin when omitted
        #[arg(short, long)]
        body_file: Option<PathBuf>,
    },

    /// Make a raw API request and print the JSON response
    Request {
        /// HTTP method
        method: String,

        /// API path, e.g. /v1/stats
        path: String,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,

        /// Query parameter
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },

    /// Account commands
    Accounts {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Show server statistics
    Stats,

    /// Show the effective configuration with secrets redacted
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// List registered accounts
    List {
        /// Page number, starting from 0
        #[arg(long, default_value = "0")]
        page: u32,

        /// Accounts per page
        #[arg(long, default_value = "20")]
        page_size: u32,
    },

    /// Show account details
    Get {
        /// Account ID
        account_id: String,
    },
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Webhook signature is invalid")]
    InvalidSignature,
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidSignature => 1,
            CliError::Configuration(_) => 2,
            CliError::Api(ApiError::Configuration(_)) => 2,
            CliError::Api(_) => 3,
            CliError::InvalidArgument { .. } => 4,
            CliError::Io(_) => 5,
        }
    }
}

impl From<ConfigurationError> for CliError {
    fn from(error: ConfigurationError) -> Self {
        CliError::Configuration(ConfigError::Client(error))
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("{0}")]
    Client(#[from] ConfigurationError),
}

// ============================================================================
// Configuration Types
// ============================================================================

const REDACTED: &str = "<REDACTED>";

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// EmailEngine base URL
    pub base_url: String,

    /// API access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Service secret for authentication URLs and webhook verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_secret: Option<String>,

    /// Default redirect URL for authentication URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: emailengine_sdk::client::DEFAULT_BASE_URL.to_string(),
            access_token: None,
            service_secret: None,
            redirect_url: None,
            timeout_seconds: 30,
        }
    }
}

impl CliConfig {
    /// Copy of this configuration with credentials replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let redact = |value: &Option<String>| value.as_ref().map(|_| REDACTED.to_string());
        Self {
            access_token: redact(&self.access_token),
            service_secret: redact(&self.service_secret),
            ..self.clone()
        }
    }

    /// Translate into an SDK client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.access_token.clone().unwrap_or_default())
            .with_base_url(self.base_url.as_str())
            .with_timeout(Duration::from_secs(self.timeout_seconds));

        if let Some(secret) = &self.service_secret {
            config = config.with_service_secret(secret.as_str());
        }
        if let Some(url) = &self.redirect_url {
            config = config.with_default_redirect_url(url.as_str());
        }

        config
    }
}

/// Values given on the command line that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub access_token: Option<String>,
}

impl From<&Cli> for ConfigOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            access_token: cli.access_token.clone(),
        }
    }
}

/// Default location of the user configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("emailengine").join("config.toml"))
}

/// Load the layered configuration.
///
/// `user_file` is optional and skipped when missing; `explicit_file` must exist.
pub fn load_configuration(
    user_file: Option<&Path>,
    explicit_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<CliConfig, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = user_file {
        builder = builder.add_source(
            config::File::from(path)
                .required(false)
                .format(config::FileFormat::Toml),
        );
    }

    if let Some(path) = explicit_file {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        builder = builder.add_source(
            config::File::from(path)
                .required(true)
                .format(config::FileFormat::Toml),
        );
        debug!(path = %path.display(), "Loading configuration from explicit path");
    }

    let config = builder
        .add_source(config::Environment::with_prefix("EMAILENGINE").separator("__"))
        .set_override_option("base_url", overrides.base_url.clone())?
        .set_override_option("access_token", overrides.access_token.clone())?
        .build()?;

    Ok(config.try_deserialize()?)
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Initialize logging
    initialize_logging(&cli)?;

    // Load configuration
    let user_file = default_config_path();
    let config = load_configuration(
        user_file.as_deref(),
        cli.config.as_deref(),
        &ConfigOverrides::from(&cli),
    )?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    execute(cli.command, &config, &mut stdin.lock(), &mut stdout.lock()).await
}

/// Run a single command against the loaded configuration.
pub async fn execute(
    command: Commands,
    config: &CliConfig,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Commands::AuthUrl {
            account,
            name,
            email,
            redirect_url,
            fields,
        } => {
            let payload = build_payload(account, name, email, redirect_url, &fields)?;
            execute_auth_url_command(config, payload, out)
        }
        Commands::VerifyWebhook {
            signature,
            body_file,
        } => execute_verify_webhook_command(config, &signature, body_file.as_deref(), input, out),
        Commands::Request {
            method,
            path,
            data,
            query,
        } => execute_request_command(config, &method, &path, data.as_deref(), &query, out).await,
        Commands::Accounts { action } => execute_accounts_command(config, action, out).await,
        Commands::Stats => {
            let client = build_client(config)?;
            let stats = client.stats().get().await?;
            print_json(out, &stats)
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config.redacted()).map_err(ConfigError::from)?;
            write!(out, "{}", rendered)?;
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "emailengine", out);
            Ok(())
        }
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// Initialize logging based on CLI arguments
fn initialize_logging(cli: &Cli) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            EnvFilter::try_new(&cli.log_level).map_err(|e| CliError::InvalidArgument {
                arg: "--log-level".to_string(),
                message: e.to_string(),
            })?
        }
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .try_init()
    };

    // Keep a subscriber that is already installed.
    if let Err(e) = result {
        debug!(error = %e, "Logging already initialized");
    }

    Ok(())
}

fn build_client(config: &CliConfig) -> Result<EmailEngineClient, CliError> {
    Ok(EmailEngineClient::builder(config.to_client_config()).build()?)
}

fn build_payload(
    account: Option<String>,
    name: Option<String>,
    email: Option<String>,
    redirect_url: Option<String>,
    fields: &[String],
) -> Result<AuthPayload, CliError> {
    let mut payload = AuthPayload::new();

    if let Some(account) = account {
        payload = payload.with_account(account);
    }
    if let Some(name) = name {
        payload = payload.with_name(name);
    }
    if let Some(email) = email {
        payload = payload.with_email(email);
    }
    if let Some(url) = redirect_url {
        payload = payload.with_redirect_url(url);
    }

    for field in fields {
        let (key, value) = parse_key_value("--field", field)?;
        // Plain strings are accepted unquoted.
        let value = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
        payload = payload.with_field(key, value);
    }

    Ok(payload)
}

fn execute_auth_url_command(
    config: &CliConfig,
    payload: AuthPayload,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let client = build_client(config)?;
    let url = client.authentication_url(payload)?;
    writeln!(out, "{}", url)?;
    Ok(())
}

fn execute_verify_webhook_command(
    config: &CliConfig,
    signature: &str,
    body_file: Option<&Path>,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let verifier = build_client(config)?.webhook_verifier()?;

    let body = match body_file {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut body = Vec::new();
            input.read_to_end(&mut body)?;
            body
        }
    };

    if verifier.verify(&body, signature.trim()) {
        writeln!(out, "valid")?;
        Ok(())
    } else {
        writeln!(out, "invalid")?;
        Err(CliError::InvalidSignature)
    }
}

async fn execute_request_command(
    config: &CliConfig,
    method: &str,
    path: &str,
    data: Option<&str>,
    query: &[String],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let method = reqwest::Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(
        |e| CliError::InvalidArgument {
            arg: "METHOD".to_string(),
            message: e.to_string(),
        },
    )?;

    let mut options = RequestOptions::new();
    for param in query {
        let (key, value) = parse_key_value("--query", param)?;
        options = options.query_param(key, value);
    }
    if let Some(data) = data {
        let body: Value = serde_json::from_str(data).map_err(|e| CliError::InvalidArgument {
            arg: "--data".to_string(),
            message: e.to_string(),
        })?;
        options = options.json(&body)?;
    }

    let client = build_client(config)?;
    info!(method = %method, path = %path, "Sending raw request");
    let response = client.request(method, path, options).await?;
    print_json(out, &response)
}

async fn execute_accounts_command(
    config: &CliConfig,
    action: AccountCommands,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let client = build_client(config)?;

    let response = match action {
        AccountCommands::List { page, page_size } => {
            client
                .accounts()
                .list(&json!({ "page": page, "pageSize": page_size }))
                .await?
        }
        AccountCommands::Get { account_id } => client.accounts().get(&account_id).await?,
    };

    print_json(out, &response)
}

fn parse_key_value(arg: &str, value: &str) -> Result<(String, String), CliError> {
    match value.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CliError::InvalidArgument {
            arg: arg.to_string(),
            message: format!("expected KEY=VALUE, got '{}'", value),
        }),
    }
}

fn print_json(out: &mut dyn Write, value: &Value) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
