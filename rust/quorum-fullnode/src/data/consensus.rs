use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GroupId, Pubkey};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    #[serde(rename = "ProducerPubkey")]
    pub producer_pubkey: Pubkey,
    #[serde(rename = "OwnerPubkey", default)]
    pub owner_pubkey: Option<Pubkey>,
    #[serde(rename = "OwnerSign", default)]
    pub owner_sign: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
    #[serde(rename = "BlockProduced", default)]
    pub block_produced: Option<i64>,
}

/// The group's consensus configuration, from
/// `GET /api/v1/group/{id}/consensus`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusInfo {
    #[serde(default)]
    pub producers: Vec<Producer>,
    #[serde(default)]
    pub proof_req_id: Option<String>,
}

/// One proposed consensus change, as embedded in proof responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsensusProofReq {
    #[serde(rename = "StartFromEpoch", default)]
    pub start_from_epoch: Option<i64>,
    #[serde(rename = "TrxEpochTickLenInMs", default)]
    pub trx_epoch_tick: Option<i64>,
    #[serde(rename = "AgreementTickLenInMs", default)]
    pub agreement_tick_length: Option<i64>,
    #[serde(rename = "AgreementTickCount", default)]
    pub agreement_tick_count: Option<i64>,
    #[serde(rename = "ProducerPubkeyList", default)]
    pub producer_pubkeys: Option<Vec<Pubkey>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusProofResp {
    #[serde(rename = "Req", default)]
    pub req: Option<ConsensusProofReq>,
    #[serde(rename = "Resp", default)]
    pub resp: Option<Value>,
}

/// The response of the consensus proof routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusReqResponse {
    #[serde(default)]
    pub resps: Vec<ConsensusProofResp>,
}

/// The body of `POST /api/v1/group/updconsensus`. The odd capitalization of
/// `agreement_tick_Length` is what the node parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateConsensusPayload {
    pub group_id: GroupId,
    pub start_from_epoch: i64,
    pub trx_epoch_tick: i64,
    #[serde(rename = "agreement_tick_Length")]
    pub agreement_tick_length: i64,
    pub agreement_tick_count: i64,
    pub producer_pubkey: Vec<Pubkey>,
}

/// Caller-supplied overrides for [crate::FullNode::update_consensus]; fields
/// left as `None` keep whatever the chain currently proposes
#[derive(Debug, Clone, Default)]
pub struct UpdateConsensusOptions {
    pub start_from_epoch: Option<i64>,
    pub trx_epoch_tick: Option<i64>,
    pub agreement_tick_length: Option<i64>,
    pub agreement_tick_count: Option<i64>,
    pub producer_pubkeys: Option<Vec<Pubkey>>,
}

/// Whether a consensus update was worth submitting to the node
#[derive(Debug)]
pub enum UpdateConsensusOutcome {
    /// The requested values match what the chain already proposes
    Unchanged,
    /// The node accepted the update; its response is passed through
    Submitted(Value),
}
