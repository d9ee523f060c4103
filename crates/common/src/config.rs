use std::path::PathBuf;

use serde::Deserialize;

/// Global application configuration loaded once from environment variables
/// and handed to each component explicitly. No component reads the
/// environment on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Messaging-gateway send endpoint (text and media share it)
    pub gateway_api_url: String,

    /// Bearer token for the messaging gateway; sends fail fast without it
    pub gateway_token: Option<String>,

    /// Test override destination number; when set it wins over the
    /// order's own phone
    pub test_number: Option<String>,

    /// Path of the processed-orders ledger file
    pub ledger_path: PathBuf,

    /// Directory where raw webhook bodies are archived
    pub archive_dir: PathBuf,

    /// Webhook server listen port (default: 5000)
    pub bind_port: u16,

    /// Pause between consecutive sends within a flow, in milliseconds
    /// (default: 1000). Preserves arrival order on the receiving client.
    pub send_pause_ms: u64,

    /// Timeout applied uniformly to every outbound HTTP call, in seconds
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gateway_api_url: std::env::var("WHATICKET_API_BASE_URL").unwrap_or_else(|_| {
                "https://api.osmardev.online/api/messages/send".to_string()
            }),
            // Three names for historical reasons; first non-empty wins
            gateway_token: first_non_empty(&["TOKEN_DO_ENV", "WHATICKET_TOKEN", "TOKEN_WHATS"]),
            test_number: first_non_empty(&["WHATSAPP_TEST_NUMBER", "NUMBER_TEST", "NUMBER_TESTE"]),
            ledger_path: std::env::var("PROCESSED_ORDERS_FILE")
                .unwrap_or_else(|_| "storage/processed_orders.txt".to_string())
                .into(),
            archive_dir: std::env::var("WEBHOOK_ARCHIVE_DIR")
                .unwrap_or_else(|_| "storage/webhooks".to_string())
                .into(),
            bind_port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
            send_pause_ms: std::env::var("SEND_PAUSE_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SEND_PAUSE_MS must be a valid u64"))?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a valid u64"))?,
        })
    }
}

/// Return the value of the first listed variable that is set and non-empty.
fn first_non_empty(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}
