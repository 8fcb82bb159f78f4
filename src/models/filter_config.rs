use crate::error::RisLiveError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Criteria used to select RIS Live records.
///
/// Each field has its own meaning for "empty":
/// - an empty `as_path_fragment` matches every path;
/// - an empty `invalid_transit_as`, `origins` or `prefixes` never matches on its own, and is
///   skipped when deciding whether a whole record is accepted.
///
/// A session builds one `FilterConfig` up front and only reads it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Contiguous fragment of AS path to look for, e.g. `[701, 7018, 3356]`.
    pub as_path_fragment: Vec<i32>,
    /// ASes that must not show up past the first hop of a path.
    pub invalid_transit_as: HashSet<i32>,
    /// Accepted values of the `origin` attribute.
    pub origins: HashSet<String>,
    /// Covering prefixes, e.g. `["1.2.3.0/24", "2001:db8::/32"]`.
    pub prefixes: HashSet<String>,
}

impl FilterConfig {
    pub fn new<A, T, O, P>(as_path_fragment: A, invalid_transit_as: T, origins: O, prefixes: P) -> Self
    where
        A: IntoIterator<Item = i32>,
        T: IntoIterator<Item = i32>,
        O: IntoIterator,
        O::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        FilterConfig {
            as_path_fragment: as_path_fragment.into_iter().collect(),
            invalid_transit_as: invalid_transit_as.into_iter().collect(),
            origins: origins.into_iter().map(Into::into).collect(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a filter criterion from its textual form. Values are comma separated.
    ///
    /// Available filter types:
    /// - `as_path`: AS path fragment, e.g. `701,7018`. Replaces any previous fragment.
    /// - `invalid_transit_as` (or `transit_as`): ASes that must not transit, e.g. `174,3356`
    /// - `origin`: origin attribute values, e.g. `igp,incomplete`
    /// - `prefix`: covering prefixes, e.g. `10.0.0.0/8,2001:db8::/32`
    ///
    /// ```rust
    /// use bgpkit_rislive::FilterConfig;
    ///
    /// let filter = FilterConfig::default()
    ///     .add_filter("as_path", "701,7018").unwrap()
    ///     .add_filter("prefix", "10.0.0.0/8").unwrap();
    /// assert_eq!(filter.as_path_fragment, vec![701, 7018]);
    /// assert!(filter.origins.is_empty());
    /// ```
    pub fn add_filter(mut self, filter_type: &str, filter_value: &str) -> Result<Self, RisLiveError> {
        match filter_type {
            "as_path" => {
                self.as_path_fragment = parse_asn_list(filter_value)?;
            }
            "invalid_transit_as" | "transit_as" => {
                self.invalid_transit_as.extend(parse_asn_list(filter_value)?);
            }
            "origin" => {
                self.origins.extend(split_values(filter_value).map(str::to_string));
            }
            "prefix" => {
                self.prefixes.extend(split_values(filter_value).map(str::to_string));
            }
            _ => {
                return Err(RisLiveError::FilterError(format!(
                    "unknown filter type: {}",
                    filter_type
                )))
            }
        }
        Ok(self)
    }

    /// `true` if no criterion is configured, i.e. every record is accepted.
    pub fn is_empty(&self) -> bool {
        self.as_path_fragment.is_empty()
            && self.invalid_transit_as.is_empty()
            && self.origins.is_empty()
            && self.prefixes.is_empty()
    }
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

fn parse_asn_list(value: &str) -> Result<Vec<i32>, RisLiveError> {
    split_values(value)
        .map(|v| {
            i32::from_str(v)
                .or_else(|_| u32::from_str(v).map(|asn| asn as i32))
                .map_err(|_| {
                    RisLiveError::FilterError(format!("cannot parse AS number from {}", v))
                })
        })
        .collect()
}
