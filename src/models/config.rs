use crate::models::FilterConfig;
use serde::{Deserialize, Serialize};

/// RIS Live firehose endpoint, streaming newline separated JSON records.
pub const RIS_LIVE_URL: &str = "https://ris-live.ripe.net/v1/stream/?format=json";
/// Client name sent to RIS Live unless configured otherwise.
pub const DEFAULT_CLIENT: &str = "bgpkit-rislive";
/// Capacity of the output queue unless configured otherwise.
pub const DEFAULT_BUFFER: usize = 1000;

/// Settings of one ingestion session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RisLiveConfig {
    /// Feed endpoint, used when no local file is set.
    pub url: String,
    /// Local file to read records from instead of the feed endpoint.
    pub file: Option<String>,
    /// Client name sent as `User-Agent`.
    pub client: String,
    /// Capacity of the output queue.
    pub buffer: usize,
    pub filter: FilterConfig,
    /// Drop records whose path cannot be digested instead of stopping the session.
    pub skip_undigestable: bool,
}

impl Default for RisLiveConfig {
    fn default() -> Self {
        RisLiveConfig {
            url: RIS_LIVE_URL.to_string(),
            file: None,
            client: DEFAULT_CLIENT.to_string(),
            buffer: DEFAULT_BUFFER,
            filter: FilterConfig::default(),
            skip_undigestable: false,
        }
    }
}

impl RisLiveConfig {
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }

    pub fn with_client(mut self, client: &str) -> Self {
        self.client = client.to_string();
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_skip_undigestable(mut self, skip: bool) -> Self {
        self.skip_undigestable = skip;
        self
    }
}
