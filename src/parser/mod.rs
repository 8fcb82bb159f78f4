/*!
parser module: path digestion, prefix containment, filtering and the ingestion loop.
*/
pub mod digest;
pub mod filter;
pub mod listener;
pub mod prefix;

pub use digest::digest_path;
pub use filter::{as_path_fragment_match, origin_match, prefix_match, transit_as_match, Filterable};
pub use listener::{ListenerState, RisLive};
pub use prefix::{any_contains, contains};
