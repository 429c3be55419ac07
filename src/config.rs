use crate::chat::{ChatMode, CompletionSettings};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default endpoint of the message backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default OpenAI-compatible endpoint for questionnaire summaries.
pub const DEFAULT_SUMMARY_URL: &str = "https://api.studio.nebius.ai/v1";

/// Default summary model.
pub const DEFAULT_SUMMARY_MODEL: &str = "meta-llama/Meta-Llama-3.1-405B-Instruct";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the message backend
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Widget mode (networked or local_echo)
    #[arg(long, env = "CHAT_MODE")]
    pub mode: Option<String>,

    /// Serve the dummy /message backend from this process
    #[arg(long, env = "SERVE_ECHO")]
    pub serve_echo: Option<bool>,

    /// Backend kind (http or questionnaire)
    #[arg(long, env = "BACKEND_KIND")]
    pub backend_kind: Option<String>,

    /// API key for the summary completion endpoint
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub widget: WidgetConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub title: String,
    pub placeholder: String,
    pub mode: ChatMode,
    pub htmx_src: String,
}

/// What answers submitted messages.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// `POST {base_url}/message`.
    #[default]
    Http,
    /// Built-in question flow with a completion-model summary.
    Questionnaire,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub base_url: String,
    /// Zero disables the client-side timeout.
    pub timeout_secs: u64,
    pub serve_echo: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
}

/// OpenAI-compatible endpoint used by the questionnaire summary.
#[derive(Deserialize, Clone)]
pub struct SummaryConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub temperature: f32,
    /// Zero disables the client-side timeout.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SummaryConfig {
    /// Client settings, with blank API keys treated as absent.
    #[must_use]
    pub fn settings(&self) -> CompletionSettings {
        CompletionSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            temperature: self.temperature,
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl SessionConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("server.request_timeout_secs", 60)?
            .set_default("widget.title", "Friendly Music AI")?
            .set_default("widget.placeholder", "Type your message...")?
            .set_default("widget.mode", "networked")?
            .set_default("widget.htmx_src", "https://unpkg.com/htmx.org@2.0.8")?
            .set_default("backend.kind", "http")?
            .set_default("backend.base_url", DEFAULT_BACKEND_URL)?
            .set_default("backend.timeout_secs", 30)?
            .set_default("backend.serve_echo", false)?
            .set_default("session.idle_timeout_secs", 30 * 60)?
            .set_default("session.cleanup_interval_secs", 60)?
            .set_default("summary.base_url", DEFAULT_SUMMARY_URL)?
            .set_default("summary.model", DEFAULT_SUMMARY_MODEL)?
            .set_default("summary.temperature", 0.8)?
            .set_default("summary.timeout_secs", 120)?;

        // 2. Config file: explicit path is required, ./config.yaml is optional
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config.yaml").required(false));
        }

        // 3. Environment variables, e.g. CHAT_WIDGET_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("CHAT_WIDGET")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and the env vars clap maps onto them) win over everything
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(mode) = cli.mode {
            builder = builder.set_override("widget.mode", mode)?;
        }
        if let Some(echo) = cli.serve_echo {
            builder = builder.set_override("backend.serve_echo", echo)?;
        }
        if let Some(kind) = cli.backend_kind {
            builder = builder.set_override("backend.kind", kind)?;
        }
        if let Some(key) = cli.llm_api_key {
            builder = builder.set_override("summary.api_key", key)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
