//! Runtime settings, read from the environment (and a `.env` file when one
//! is present).

use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "techlabel.sqlite";
const DEFAULT_GENAI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GENAI_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file holding every collection.
    pub db_path: PathBuf,
    pub genai: GenAiConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenAiConfig {
    /// Without a key the layout endpoints answer with an upstream error.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(format!("failed to read .env: {err}"));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("TECHLABEL_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| format!("TECHLABEL_PORT '{raw}' is not a valid port: {e}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: non_empty("TECHLABEL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            db_path: PathBuf::from(
                non_empty("TECHLABEL_DB").unwrap_or_else(|| DEFAULT_DB.to_string()),
            ),
            genai: GenAiConfig {
                api_key: non_empty("GEMINI_API_KEY"),
                model: non_empty("TECHLABEL_GENAI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GENAI_MODEL.to_string()),
                base_url: non_empty("TECHLABEL_GENAI_URL")
                    .unwrap_or_else(|| DEFAULT_GENAI_URL.to_string()),
            },
        })
    }
}
