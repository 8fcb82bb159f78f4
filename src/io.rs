use crate::error::RisLiveError;
use crate::models::RisLiveConfig;
use log::{debug, info};
use std::io::Read;
use std::time::Duration;

/// Where the records of a session come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSource {
    /// Response body of a single HTTP GET against the feed endpoint.
    Remote { url: String, client: String },
    /// A local file, read once. Compressed files (`.gz`, `.bz2`) are decompressed on the fly.
    Local(String),
}

impl StreamSource {
    /// A local file set in the configuration takes precedence over the feed URL.
    pub fn from_config(config: &RisLiveConfig) -> StreamSource {
        match &config.file {
            Some(path) if !path.is_empty() => StreamSource::Local(path.clone()),
            _ => StreamSource::Remote {
                url: config.url.clone(),
                client: config.client.clone(),
            },
        }
    }

    /// Open the source as a byte stream.
    pub fn open(&self) -> Result<Box<dyn Read + Send>, RisLiveError> {
        match self {
            StreamSource::Remote { url, client } => {
                info!("connecting to {} as {}", url, client);
                // no total timeout: the body of a firehose never ends
                let http_client = reqwest::blocking::Client::builder()
                    .user_agent(client.as_str())
                    .timeout(None::<Duration>)
                    .build()?;
                let response = http_client.get(url.as_str()).send()?.error_for_status()?;
                debug!("{} responded with {}", url, response.status());
                Ok(Box::new(response))
            }
            StreamSource::Local(path) => {
                info!("reading records from {}", path);
                Ok(oneio::get_reader(path)?)
            }
        }
    }
}
