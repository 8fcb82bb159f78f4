/*!
bgpkit-rislive ingests the [RIS Live](https://ris-live.ripe.net/) firehose, turns the AS path of
every record into a plain sequence of AS numbers, and selects records by AS path fragment, invalid
transit AS, origin and covering prefix.

# Examples

## Follow the live feed

```no_run
use bgpkit_rislive::{FilterConfig, RisLive, RisLiveConfig};

// records announcing anything inside 2001:db8::/32 and crossing AS 3356
let filter = FilterConfig::default()
    .add_filter("prefix", "2001:db8::/32").unwrap()
    .add_filter("as_path", "3356").unwrap();

let (ris_live, receiver) = RisLive::new(RisLiveConfig::default().with_filter(filter));
let _handle = ris_live.spawn().unwrap();

for msg in receiver {
    let data = msg.data.unwrap();
    println!("{} {} {:?}", data.host, data.peer, data.digested_path);
}
```

## Replay a capture

A local file holding the same JSON records can be used instead of the feed, compressed or not:

```no_run
use bgpkit_rislive::{RisLive, RisLiveConfig};

let config = RisLiveConfig::default().with_file("ris-live-capture.json.gz");
let (mut ris_live, receiver) = RisLive::new(config);
let count = ris_live.listen().unwrap();
assert_eq!(receiver.len(), count);
```

Note that [RisLive::listen] blocks once the output queue is full, so a capture larger than the
queue needs a consumer on another thread, or [RisLive::spawn].

# Path digestion

RIS Live sends AS paths as arrays mixing AS numbers and AS sets, e.g.
`[2497, 6453, 18705, 26281, [13340]]`. Digestion flattens AS sets in place, giving
`[2497, 6453, 18705, 26281, 13340]`. A path holding anything else than AS numbers fails
digestion, and by default stops the session: such a feed is most likely not RIS Live at all.
*/

pub mod error;
pub mod io;
pub mod models;
pub mod parser;

pub use error::{DigestError, RisLiveError};
pub use io::StreamSource;
pub use models::*;
pub use parser::{Filterable, ListenerState, RisLive};
