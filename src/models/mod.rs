/*!
Data structures for RIS Live records and ingestion settings.
*/
mod config;
mod filter_config;
mod ris_message;

pub use config::*;
pub use filter_config::FilterConfig;
pub use ris_message::{Announcement, RisLiveMessage, RisMessageData};
