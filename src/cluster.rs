//! Initial-cluster descriptor parsing
//!
//! An initial-cluster descriptor is the textual encoding of the expected
//! cluster membership: `name1=url1,name2=url2,...`. Only the hostname
//! component of each URL is retained; callers cross-check the entry count
//! against their declared cluster size.

use std::collections::BTreeMap;

use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Parse an initial-cluster descriptor into a name -> hostname mapping.
///
/// The descriptor is tokenized on both `,` and `=` into one flat stream and
/// tokens are paired sequentially, so `a=http://h1,b=http://h2` yields
/// `{a: h1, b: h2}`. An empty or odd-length token stream, an address that is
/// not a valid URL with a host, or a repeated name all fail.
pub fn parse_initial_cluster(initial_cluster: &str) -> ProviderResult<BTreeMap<String, String>> {
    let tokens: Vec<&str> = initial_cluster
        .split([',', '='])
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return Err(ProviderError::invalid_format(format!(
            "invalid initial-cluster {:?}",
            initial_cluster
        )));
    }

    let mut instances = BTreeMap::new();
    for pair in tokens.chunks(2) {
        let name = pair[0].trim();
        let address = pair[1];

        let url = Url::parse(address).map_err(|_| {
            ProviderError::invalid_format(format!(
                "invalid url {} for instance {}",
                address, name
            ))
        })?;
        let hostname = url.host_str().ok_or_else(|| {
            ProviderError::invalid_format(format!(
                "invalid url {} for instance {}: no hostname",
                address, name
            ))
        })?;

        if instances
            .insert(name.to_string(), hostname.to_string())
            .is_some()
        {
            return Err(ProviderError::duplicate_name(name));
        }
    }

    Ok(instances)
}
