/*!
Filter predicates applied to digested RIS Live records.

There are four predicates, each driven by one field of [FilterConfig]:

- **AS path fragment**: the fragment occurs contiguously, in order, in the digested path. An empty
  fragment matches every path.
- **Invalid transit AS**: one of the configured ASes shows up anywhere in the digested path except
  its first hop. An empty set never matches.
- **Origin**: the `origin` attribute is one of the configured values. An empty set never matches.
- **Prefix**: one of the announced prefixes lies within one of the configured prefixes. An empty
  set never matches.

When a whole record is checked with [Filterable::match_filter_config], only the predicates whose
field is configured take part, and all of them must hold. An empty [FilterConfig] therefore
accepts every record.

# Example

```rust
use bgpkit_rislive::{FilterConfig, Filterable, RisMessageData};
use serde_json::json;

let mut data = RisMessageData {
    path: json!([1, 2, 3, 4, 5, 6, 7, 8]).as_array().unwrap().clone(),
    origin: "igp".to_string(),
    ..Default::default()
};
data.digest_path().unwrap();

let filter = FilterConfig::default()
    .add_filter("as_path", "3,4,5").unwrap()
    .add_filter("origin", "igp").unwrap();
assert!(data.match_filter_config(&filter));
```
*/
use crate::models::{FilterConfig, RisLiveMessage, RisMessageData};
use crate::parser::prefix::any_contains;
use std::collections::HashSet;

/// Check whether `fragment` occurs as a contiguous run of `path`.
pub fn as_path_fragment_match(path: &[i32], fragment: &[i32]) -> bool {
    if fragment.is_empty() {
        return true;
    }
    if fragment.len() > path.len() {
        return false;
    }
    path.windows(fragment.len()).any(|w| w == fragment)
}

/// Check whether any AS past the first hop of `path` is in `invalid`.
pub fn transit_as_match(path: &[i32], invalid: &HashSet<i32>) -> bool {
    if invalid.is_empty() {
        return false;
    }
    path.iter().skip(1).any(|asn| invalid.contains(asn))
}

/// Check whether `origin` is one of `origins`.
pub fn origin_match(origin: &str, origins: &HashSet<String>) -> bool {
    !origins.is_empty() && origins.contains(origin)
}

/// Check whether any announced prefix lies within any of `prefixes`.
pub fn prefix_match<'a, I>(announced: I, prefixes: &HashSet<String>) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    if prefixes.is_empty() {
        return false;
    }
    any_contains(prefixes, announced)
}

impl FilterConfig {
    /// Check the AS path fragment against the digested path of `data`.
    pub fn match_as_path(&self, data: &RisMessageData) -> bool {
        as_path_fragment_match(&data.digested_path, &self.as_path_fragment)
    }

    /// Check the invalid transit ASes against the digested path of `data`.
    pub fn match_invalid_transit_as(&self, data: &RisMessageData) -> bool {
        transit_as_match(&data.digested_path, &self.invalid_transit_as)
    }

    /// Check the configured origins against the origin attribute of `data`.
    pub fn match_origin(&self, data: &RisMessageData) -> bool {
        origin_match(&data.origin, &self.origins)
    }

    /// Check the configured prefixes against the prefixes `data` announces.
    pub fn match_prefix(&self, data: &RisMessageData) -> bool {
        prefix_match(data.announced_prefixes(), &self.prefixes)
    }

    /// Decide whether a whole record is accepted, checking only the configured predicates.
    pub fn accepts(&self, data: &RisMessageData) -> bool {
        (self.as_path_fragment.is_empty() || self.match_as_path(data))
            && (self.invalid_transit_as.is_empty() || self.match_invalid_transit_as(data))
            && (self.origins.is_empty() || self.match_origin(data))
            && (self.prefixes.is_empty() || self.match_prefix(data))
    }
}

pub trait Filterable {
    fn match_filter_config(&self, filter: &FilterConfig) -> bool;
}

impl Filterable for RisMessageData {
    fn match_filter_config(&self, filter: &FilterConfig) -> bool {
        filter.accepts(self)
    }
}

impl Filterable for RisLiveMessage {
    /// Records without data only pass a filter that has nothing configured.
    fn match_filter_config(&self, filter: &FilterConfig) -> bool {
        match &self.data {
            Some(data) => filter.accepts(data),
            None => filter.is_empty(),
        }
    }
}
