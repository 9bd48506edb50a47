use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::{GroupId, Pubkey, TrxId};

/// The transaction categories understood by the node's authorization surface
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TrxType {
    Post,
    Announce,
    ReqBlockForward,
    ReqBlockBackward,
    BlockSynced,
    BlockProduced,
    AskPeerid,
}

/// A transaction record as the node returns it. `Data` arrives as
/// base64-encoded JSON; see [Trx::decode_data].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trx {
    #[serde(rename = "TrxId")]
    pub trx_id: TrxId,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "GroupId", default)]
    pub group_id: Option<GroupId>,
    #[serde(rename = "Data", default)]
    pub data: Option<Value>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    #[serde(rename = "Expired", default)]
    pub expired: Option<i64>,
    #[serde(rename = "SenderPubkey", default)]
    pub sender_pubkey: Option<Pubkey>,
    #[serde(rename = "SenderSign", default)]
    pub sender_sign: Option<String>,
}

impl Trx {
    /// Replace the base64-encoded `Data` payload with its decoded JSON form.
    /// Trxs from private groups may not be decodable by non-members; those
    /// payloads are left untouched.
    pub fn decode_data(&mut self) {
        let encoded = match &self.data {
            Some(Value::String(encoded)) => encoded.clone(),
            _ => return,
        };

        let decoded = STANDARD
            .decode(&encoded)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| serde_json::from_slice(&bytes).map_err(anyhow::Error::from));

        match decoded {
            Ok(data) => self.data = Some(data),
            Err(error) => warn!("Failed to decode data of trx {}: {}", self.trx_id, error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrxResponse {
    pub trx_id: TrxId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckPayload {
    pub trx_ids: Vec<TrxId>,
}

/// A block on a group's chain, from `GET /api/v1/block/{group_id}/{block_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "BlockId")]
    pub block_id: String,
    #[serde(rename = "GroupId", default)]
    pub group_id: Option<GroupId>,
    #[serde(rename = "Epoch", default)]
    pub epoch: Option<i64>,
    #[serde(rename = "PrevHash", default)]
    pub prev_hash: Option<String>,
    #[serde(rename = "ProducerPubkey", default)]
    pub producer_pubkey: Option<Pubkey>,
    #[serde(rename = "Trxs", default)]
    pub trxs: Option<Vec<Trx>>,
    #[serde(rename = "Hash", default)]
    pub hash: Option<String>,
    #[serde(rename = "Signature", default)]
    pub signature: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
}

/// One entry of the node's outbound publishing queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubQueueItem {
    #[serde(rename = "GroupId", default)]
    pub group_id: Option<GroupId>,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "RetryCount", default)]
    pub retry_count: Option<i64>,
    #[serde(rename = "UpdateAt", default)]
    pub update_at: Option<i64>,
    #[serde(rename = "Trx")]
    pub trx: Trx,
}

/// The state value the node assigns to queue entries it has given up on
pub const PUB_QUEUE_STATE_FAIL: &str = "FAIL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubQueueResponse {
    #[serde(rename = "GroupId", default)]
    pub group_id: Option<GroupId>,
    #[serde(rename = "Data", default)]
    pub data: Vec<PubQueueItem>,
}
