use anyhow::Result;

use crate::api::data::AsQuery;
use crate::data::{Pubkey, TrxId};

/// The query parameters expected by the group content route
#[derive(Debug, Clone)]
pub struct ContentParameters {
    /// How many trxs to return at most
    pub num: u64,
    /// Walk the chain from newest to oldest instead
    pub reverse: bool,
    /// Start paging from this trx instead of the chain tip
    pub start_trx: Option<TrxId>,
    /// Include the `start_trx` itself in the returned page
    pub include_start_trx: bool,
    /// Restrict results to trxs sent by these pubkeys
    pub senders: Vec<Pubkey>,
}

impl Default for ContentParameters {
    fn default() -> Self {
        ContentParameters {
            num: 20,
            reverse: false,
            start_trx: None,
            include_start_trx: false,
            senders: Vec::new(),
        }
    }
}

impl AsQuery for ContentParameters {
    fn as_query(&self) -> Result<Option<String>> {
        let mut pairs: Vec<(&str, String)> = vec![
            ("num", self.num.to_string()),
            ("reverse", self.reverse.to_string()),
        ];

        if let Some(start_trx) = &self.start_trx {
            pairs.push(("start_trx", start_trx.to_string()));
            pairs.push(("include_start_trx", self.include_start_trx.to_string()));
        }

        for sender in &self.senders {
            pairs.push(("senders", sender.to_string()));
        }

        Ok(Some(serde_urlencoded::to_string(&pairs)?))
    }
}
