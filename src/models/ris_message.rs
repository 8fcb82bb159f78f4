//! `ris_message`: Message from a particular RIS Route Collector
//!
//! Schema: <https://ris-live.ripe.net/schemas/v1/ris_message.schema.json>
use crate::error::DigestError;
use crate::parser::digest::digest_path;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the RIS Live feed, as it arrives on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RisLiveMessage {
    #[serde(rename = "type", default)]
    pub msg_type: String,
    #[serde(default)]
    pub data: Option<RisMessageData>,
}

/// Content of a `ris_message` record.
///
/// All fields are optional on the wire: keep-alive and peer-state records carry little more than
/// the peer identity, so missing fields decode to their empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RisMessageData {
    pub timestamp: f64,
    pub peer: String,
    pub peer_asn: String,
    pub id: String,
    pub host: String,
    #[serde(rename = "type")]
    pub msg_type: String,
    /// The AS path exactly as RIS Live sends it: AS numbers mixed with AS sets.
    pub path: Vec<Value>,
    /// Canonical AS path produced by [RisMessageData::digest_path]. Never read from input.
    #[serde(skip_deserializing)]
    pub digested_path: Vec<i32>,
    pub community: Vec<(u32, u32)>,
    pub origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub med: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,
    pub announcements: Vec<Announcement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub withdrawals: Vec<String>,
    /// Hex encoded BGP UPDATE message, kept verbatim.
    pub raw: String,
}

/// Update message announcement content
///
/// Schema: <https://ris-live.ripe.net/schemas/v1/ris_message-UPDATE.schema.json>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Announcement {
    pub next_hop: String,
    pub prefixes: Vec<String>,
}

impl RisMessageData {
    /// Digest the raw path into [RisMessageData::digested_path].
    ///
    /// On failure the previously digested path is left as it was.
    pub fn digest_path(&mut self) -> Result<(), DigestError> {
        self.digested_path = digest_path(&self.path)?;
        Ok(())
    }

    /// All prefixes of all announcements, in the order they appear.
    pub fn announced_prefixes(&self) -> impl Iterator<Item = &str> {
        self.announcements
            .iter()
            .flat_map(|a| a.prefixes.iter().map(String::as_str))
    }

    /// The AS that originated the route, i.e. the last hop of the digested path.
    pub fn origin_asn(&self) -> Option<i32> {
        self.digested_path.last().copied()
    }
}

impl RisLiveMessage {
    /// Digest the path of the contained data, if any.
    pub fn digest_path(&mut self) -> Result<(), DigestError> {
        match self.data.as_mut() {
            Some(data) => data.digest_path(),
            None => Ok(()),
        }
    }
}
