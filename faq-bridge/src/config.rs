//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at startup and handed to the web layer as an
//! explicit value. `Config::from_lookup` takes any variable source so tests
//! never touch the process environment.

use std::env;

use tracing::warn;
use url::Url;

use crate::error::{BridgeError, Result};

/// Default reply when no FAQ record matches.
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I don't have an answer yet. Please contact the admin.";

const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
const DEFAULT_WHATSAPP_API_BASE_URL: &str = "https://graph.facebook.com";
const DEFAULT_WHATSAPP_API_VERSION: &str = "v19.0";

/// Appwrite caps list queries at 5000 documents per page.
const MAX_FAQ_PAGE_SIZE: usize = 5000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    // =========================================================================
    // Document Store (Appwrite)
    // =========================================================================
    /// Appwrite REST endpoint, without trailing slash
    pub appwrite_endpoint: String,

    /// Appwrite project identifier
    pub appwrite_project_id: String,

    /// Appwrite server API key
    pub appwrite_api_key: String,

    /// Database holding both collections
    pub appwrite_database_id: String,

    /// Collection of FAQ records
    pub faq_collection_id: String,

    /// Collection the interaction log is appended to
    pub interactions_collection_id: String,

    /// Number of FAQ documents requested per page
    pub faq_page_size: usize,

    // =========================================================================
    // Messaging Provider (WhatsApp Cloud API)
    // =========================================================================
    /// Secret expected in the `hub.verify_token` handshake parameter
    pub verify_token: Option<String>,

    /// App secret used to check `X-Hub-Signature-256` on deliveries
    pub app_secret: Option<String>,

    /// Bearer token for outbound messages
    pub whatsapp_token: Option<String>,

    /// Sender phone number identifier for outbound messages
    pub whatsapp_phone_number_id: Option<String>,

    /// Graph API base URL, without trailing slash
    pub whatsapp_api_base_url: String,

    /// Graph API version path segment
    pub whatsapp_api_version: String,

    // =========================================================================
    // Behaviour
    // =========================================================================
    /// Reply used when no FAQ record matches
    pub fallback_reply: String,

    /// HTTP request timeout in milliseconds for outbound calls
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_blank(lookup(name));

        let required = |name: &'static str| var(name).ok_or(BridgeError::MissingConfig(name));

        let config = Config {
            port: parse_or(&var, "PORT", 8080),

            appwrite_endpoint: parse_url(
                "APPWRITE_ENDPOINT",
                var("APPWRITE_ENDPOINT").unwrap_or_else(|| DEFAULT_APPWRITE_ENDPOINT.to_string()),
            )?,
            appwrite_project_id: required("APPWRITE_PROJECT_ID")?,
            appwrite_api_key: required("APPWRITE_API_KEY")?,
            appwrite_database_id: required("APPWRITE_DATABASE_ID")?,
            faq_collection_id: required("APPWRITE_FAQ_COLLECTION_ID")?,
            interactions_collection_id: required("APPWRITE_INTERACTIONS_COLLECTION_ID")?,
            faq_page_size: parse_or(&var, "FAQ_PAGE_SIZE", 100usize).clamp(1, MAX_FAQ_PAGE_SIZE),

            verify_token: var("WHATSAPP_VERIFY_TOKEN"),
            app_secret: var("WHATSAPP_APP_SECRET"),
            whatsapp_token: var("WHATSAPP_TOKEN"),
            whatsapp_phone_number_id: var("WHATSAPP_PHONE_NUMBER_ID"),
            whatsapp_api_base_url: parse_url(
                "WHATSAPP_API_BASE_URL",
                var("WHATSAPP_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_WHATSAPP_API_BASE_URL.to_string()),
            )?,
            whatsapp_api_version: var("WHATSAPP_API_VERSION")
                .unwrap_or_else(|| DEFAULT_WHATSAPP_API_VERSION.to_string()),

            fallback_reply: var("FALLBACK_REPLY")
                .unwrap_or_else(|| DEFAULT_FALLBACK_REPLY.to_string()),
            request_timeout_ms: parse_or(&var, "REQUEST_TIMEOUT_MS", 10_000),
        };

        Ok(config)
    }

    /// Whether both outbound messaging credentials are present.
    ///
    /// Missing credentials is a valid deployment: replies are computed and
    /// logged but never sent.
    pub fn messaging_enabled(&self) -> bool {
        self.whatsapp_token.is_some() && self.whatsapp_phone_number_id.is_some()
    }

    /// Whether delivery payload signatures must be checked.
    pub fn signature_verification_enabled(&self) -> bool {
        self.app_secret.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a numeric variable, falling back to the default when unset or invalid.
fn parse_or<T, F>(var: &F, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(env_var = name, value = %raw, "Invalid numeric value, using default");
                default
            }
        },
    }
}

/// Validate an absolute http(s) URL and strip any trailing slash.
fn parse_url(name: &'static str, raw: String) -> Result<String> {
    let parsed = Url::parse(&raw).map_err(|e| BridgeError::InvalidConfig {
        var: name,
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BridgeError::InvalidConfig {
            var: name,
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
