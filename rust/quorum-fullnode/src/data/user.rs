use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::{ConfigAction, GroupId, Pubkey};

/// What a node announces itself as within a group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnnounceKind {
    User,
    Producer,
}

/// The body of `POST /api/v1/group/announce`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncePayload {
    pub group_id: GroupId,
    pub action: ConfigAction,
    #[serde(rename = "type")]
    pub kind: AnnounceKind,
    pub memo: String,
}

/// The approval result the node records for an announced user
pub const ANNOUNCE_RESULT_APPROVED: &str = "APPROVED";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncedUser {
    #[serde(rename = "AnnouncedSignPubkey", default)]
    pub announced_sign_pubkey: Option<Pubkey>,
    #[serde(rename = "AnnouncedEncryptPubkey", default)]
    pub announced_encrypt_pubkey: Option<Pubkey>,
    #[serde(rename = "AnnouncerSign", default)]
    pub announcer_sign: Option<String>,
    #[serde(rename = "Result", default)]
    pub result: Option<String>,
    #[serde(rename = "Memo", default)]
    pub memo: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
}

impl AnnouncedUser {
    pub fn is_approved(&self) -> bool {
        self.result.as_deref() == Some(ANNOUNCE_RESULT_APPROVED)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncedProducer {
    #[serde(rename = "AnnouncedPubkey", default)]
    pub announced_pubkey: Option<Pubkey>,
    #[serde(rename = "AnnouncerSign", default)]
    pub announcer_sign: Option<String>,
    #[serde(rename = "Result", default)]
    pub result: Option<String>,
    #[serde(rename = "Action", default)]
    pub action: Option<String>,
    #[serde(rename = "Memo", default)]
    pub memo: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
}

/// The body of `POST /api/v1/group/user`: the group owner approving or
/// expelling an announced user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserPayload {
    pub user_pubkey: Pubkey,
    pub group_id: GroupId,
    pub action: ConfigAction,
}
