/*!
The ingestion loop: decode RIS Live records from a stream, digest their paths, filter them and
hand them over to a bounded queue.

```no_run
use bgpkit_rislive::{FilterConfig, RisLive, RisLiveConfig};

let filter = FilterConfig::default().add_filter("origin", "igp").unwrap();
let config = RisLiveConfig::default().with_client("my-client").with_filter(filter);
let (ris_live, receiver) = RisLive::new(config);
let handle = ris_live.spawn().unwrap();

for msg in receiver {
    if let Some(data) = msg.data {
        println!("{} {:?}", data.peer, data.digested_path);
    }
}
handle.join().unwrap().unwrap();
```
*/
use crate::error::RisLiveError;
use crate::io::StreamSource;
use crate::models::{RisLiveConfig, RisLiveMessage};
use crate::parser::filter::Filterable;
use crossbeam_channel::{Receiver, Sender};
use log::{error, info, trace, warn};
use std::io::{BufReader, Read};
use std::thread::{self, JoinHandle};

/// Life cycle of a [RisLive] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Connecting,
    Streaming,
    /// The stream ended, could not be opened, or nobody is receiving anymore.
    Closed,
    /// A record could not be decoded or digested.
    Failed,
}

/// One ingestion session over a RIS Live stream.
///
/// Accepted records go to a bounded queue created together with the session. The session blocks
/// while the queue is full. Nothing marks the end of the stream on the queue: a receiver sees the
/// channel disconnect only once the session itself is dropped.
pub struct RisLive {
    config: RisLiveConfig,
    sender: Sender<RisLiveMessage>,
    state: ListenerState,
}

impl RisLive {
    /// Create a session and the receiving end of its output queue.
    ///
    /// The queue holds `config.buffer` records. A zero-sized buffer makes every hand-over a
    /// rendezvous with the consumer.
    pub fn new(config: RisLiveConfig) -> (RisLive, Receiver<RisLiveMessage>) {
        let (sender, receiver) = crossbeam_channel::bounded(config.buffer);
        let ris_live = RisLive {
            config,
            sender,
            state: ListenerState::Idle,
        };
        (ris_live, receiver)
    }

    pub fn config(&self) -> &RisLiveConfig {
        &self.config
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Open the configured source and stream it to the output queue.
    ///
    /// Returns the number of records forwarded. A source that cannot be opened is logged and
    /// treated as an empty stream.
    pub fn listen(&mut self) -> Result<usize, RisLiveError> {
        self.state = ListenerState::Connecting;
        let source = StreamSource::from_config(&self.config);
        let reader = match source.open() {
            Ok(reader) => reader,
            Err(e) => {
                error!("failed to open {:?}: {}", source, e);
                self.state = ListenerState::Closed;
                return Ok(0);
            }
        };
        self.listen_reader(reader)
    }

    /// Stream records from an already opened reader to the output queue.
    ///
    /// Stops at the end of the stream, at the first record that cannot be decoded, and at the
    /// first record whose path cannot be digested (unless `skip_undigestable` is set).
    pub fn listen_reader<R: Read>(&mut self, reader: R) -> Result<usize, RisLiveError> {
        self.state = ListenerState::Streaming;
        let stream = serde_json::Deserializer::from_reader(BufReader::new(reader))
            .into_iter::<RisLiveMessage>();

        let mut forwarded = 0;
        for (index, item) in stream.enumerate() {
            let mut msg = match item {
                Ok(msg) => msg,
                Err(e) => {
                    error!("failed to decode record {}: {}", index, e);
                    self.state = ListenerState::Failed;
                    return Err(e.into());
                }
            };

            if let Err(e) = msg.digest_path() {
                if self.config.skip_undigestable {
                    warn!("dropping record {}: {}", index, e);
                    continue;
                }
                error!("failed to digest path of record {}: {}", index, e);
                self.state = ListenerState::Failed;
                return Err(e.into());
            }

            if !msg.match_filter_config(&self.config.filter) {
                trace!("record {} filtered out", index);
                continue;
            }

            trace!("forwarding record {}", index);
            if self.sender.send(msg).is_err() {
                info!("output queue has no receiver left, stop listening");
                break;
            }
            forwarded += 1;
        }

        self.state = ListenerState::Closed;
        info!("stream closed after forwarding {} records", forwarded);
        Ok(forwarded)
    }

    /// Run the session on its own thread.
    ///
    /// The output queue disconnects when the thread finishes.
    pub fn spawn(mut self) -> std::io::Result<JoinHandle<Result<usize, RisLiveError>>> {
        thread::Builder::new()
            .name("ris-live".to_string())
            .spawn(move || self.listen())
    }
}
