use itertools::Itertools;
use std::io::Write;
use std::path::PathBuf;

use bgpkit_rislive::{FilterConfig, RisLive, RisLiveConfig, RisMessageData};
use clap::Parser;
use log::error;

/// bgpkit-rislive is a simple cli tool that follows the RIS Live firehose and prints the records
/// matching the given filters.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// RIS Live firehose URL
    #[clap(short, long, default_value = bgpkit_rislive::RIS_LIVE_URL)]
    url: String,

    /// Read records from a local file instead of the firehose
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// Client name sent to RIS Live
    #[clap(short, long, default_value = bgpkit_rislive::DEFAULT_CLIENT)]
    client: String,

    /// Number of records buffered between the reader and the printer
    #[clap(short, long, default_value_t = bgpkit_rislive::DEFAULT_BUFFER)]
    buffer: usize,

    /// Drop records with an undigestable AS path instead of stopping
    #[clap(long)]
    skip_undigestable: bool,

    /// Output as JSON objects
    #[clap(long)]
    json: bool,

    #[clap(flatten)]
    filters: Filters,
}

#[derive(Parser, Debug)]
struct Filters {
    /// Filter by AS path fragment, comma separated, e.g. 174,3356
    #[clap(short = 'a', long)]
    as_path: Option<String>,

    /// Filter by ASes seen in transit, comma separated
    #[clap(short = 't', long)]
    invalid_transit_as: Option<String>,

    /// Filter by origin attribute, comma separated, e.g. igp,incomplete
    #[clap(short = 'o', long)]
    origin: Option<String>,

    /// Filter by covering prefix, comma separated
    #[clap(short = 'p', long)]
    prefix: Option<String>,
}

impl Filters {
    fn to_filter_config(&self) -> Result<FilterConfig, bgpkit_rislive::RisLiveError> {
        let mut filter = FilterConfig::default();
        if let Some(v) = &self.as_path {
            filter = filter.add_filter("as_path", v)?;
        }
        if let Some(v) = &self.invalid_transit_as {
            filter = filter.add_filter("invalid_transit_as", v)?;
        }
        if let Some(v) = &self.origin {
            filter = filter.add_filter("origin", v)?;
        }
        if let Some(v) = &self.prefix {
            filter = filter.add_filter("prefix", v)?;
        }
        Ok(filter)
    }
}

fn to_psv(data: &RisMessageData) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}",
        data.timestamp,
        data.host,
        data.peer,
        data.peer_asn,
        data.origin,
        data.digested_path.iter().join(" "),
        data.announced_prefixes().next().unwrap_or_default(),
    )
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let filter = match opts.filters.to_filter_config() {
        Ok(f) => f,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let mut config = RisLiveConfig::default()
        .with_url(opts.url.as_str())
        .with_client(opts.client.as_str())
        .with_buffer(opts.buffer)
        .with_filter(filter)
        .with_skip_undigestable(opts.skip_undigestable);
    if let Some(file) = &opts.file {
        config = config.with_file(&file.to_string_lossy());
    }

    let (ris_live, receiver) = RisLive::new(config);
    let handle = match ris_live.spawn() {
        Ok(h) => h,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    for msg in receiver {
        let line = match opts.json {
            true => match serde_json::to_string(&msg) {
                Ok(s) => s,
                Err(e) => {
                    error!("failed to serialize record: {}", e);
                    continue;
                }
            },
            false => match &msg.data {
                Some(data) => to_psv(data),
                None => continue,
            },
        };
        if let Err(e) = writeln!(stdout, "{}", line) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }

    match handle.join() {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("listener thread panicked");
            std::process::exit(1);
        }
    }
}
