use anyhow::Result;

use crate::api::data::AsQuery;

/// The query parameters accepted by the group seed route
#[derive(Debug, Default)]
pub struct SeedParameters {
    /// Ask the node to embed its chain API URL in the seed it returns
    pub include_chain_url: bool,
}

impl AsQuery for SeedParameters {
    fn as_query(&self) -> Result<Option<String>> {
        Ok(self
            .include_chain_url
            .then(|| "include_chain_url=true".to_owned()))
    }
}
