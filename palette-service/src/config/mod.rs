use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
const DEFAULT_PROVIDER: &str = "novita";
const DEFAULT_BASE_URL: &str = "https://router.huggingface.co";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_TOKENS: u32 = 768;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct PaletteConfig {
    pub common: core_config::Config,
    pub inference: InferenceConfig,
    pub prompt: PromptConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// May be empty; calls then fail at the provider.
    pub api_token: Secret<String>,
    pub model: String,
    /// Provider routed to by the Hugging Face router (e.g. `novita`).
    pub provider: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default)]
pub struct PromptConfig {
    pub empty_usage: EmptyUsagePolicy,
}

/// How the "used for" clause is rendered when `usage` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyUsagePolicy {
    /// Leave the clause out of the prompt.
    #[default]
    Omit,
    /// Keep the clause with an empty list.
    Render,
}

impl FromStr for EmptyUsagePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" => Ok(EmptyUsagePolicy::Omit),
            "render" => Ok(EmptyUsagePolicy::Render),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "PROMPT_EMPTY_USAGE must be 'omit' or 'render', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_token: Secret::new(String::new()),
            model: DEFAULT_MODEL.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            inference: InferenceConfig::default(),
            prompt: PromptConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                otlp_endpoint: None,
            },
        }
    }
}

impl PaletteConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PaletteConfig {
            common: common_config,
            inference: InferenceConfig {
                api_token: Secret::new(env::var("HF_API_TOKEN").unwrap_or_default()),
                model: get_env("HF_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                provider: get_env("HF_PROVIDER", Some(DEFAULT_PROVIDER), is_prod)?,
                base_url: get_env("HF_BASE_URL", Some(DEFAULT_BASE_URL), false)?,
                timeout: Duration::from_secs(parse_env(
                    "INFERENCE_TIMEOUT_SECS",
                    DEFAULT_TIMEOUT_SECS,
                )?),
                max_tokens: parse_env("INFERENCE_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
                temperature: parse_env("INFERENCE_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            },
            prompt: PromptConfig {
                empty_usage: get_env("PROMPT_EMPTY_USAGE", Some("omit"), false)?.parse()?,
            },
            cors: CorsConfig {
                allowed_origins: split_origins(&get_env("CORS_ALLOWED_ORIGINS", Some("*"), false)?),
            },
            logging: LoggingConfig {
                level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
