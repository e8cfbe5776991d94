// Gateway configuration, read from the environment (a .env file is loaded first).

use crate::infra::moderation::openai_client::DEFAULT_BASE_URL;
use anyhow::{bail, Context, Result};

const DEFAULT_DB_PATH: &str = "data/comments.db";
const DEFAULT_PORT: u16 = 8080;

/// Which CommentStore backs the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub moderation_model: Option<String>,
    pub store: StoreBackend,
    pub port: u16,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY")
            .context("Missing OPENAI_API_KEY environment variable!")?;

        let store = match get("COMMENT_STORE").as_deref() {
            None | Some("sqlite") => StoreBackend::Sqlite {
                path: get("COMMENTS_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("Unknown COMMENT_STORE '{other}' (expected sqlite or memory)"),
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            moderation_model: get("OPENAI_MODERATION_MODEL"),
            store,
            port,
        })
    }
}
