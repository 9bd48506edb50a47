use serde::{Deserialize, Serialize};

use super::{GroupId, Pubkey};

/// The node's record of a group it has joined, from `GET /api/v1/group/{id}`
/// and the `groups` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    pub group_id: GroupId,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub owner_pubkey: Option<Pubkey>,
    #[serde(default)]
    pub user_pubkey: Option<Pubkey>,
    #[serde(default)]
    pub user_eth_addr: Option<String>,
    #[serde(default)]
    pub consensus_type: Option<String>,
    #[serde(default)]
    pub encryption_type: Option<String>,
    #[serde(default)]
    pub cipher_key: Option<String>,
    #[serde(default)]
    pub app_key: Option<String>,
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub highest_height: Option<i64>,
    #[serde(default)]
    pub highest_block_id: Option<String>,
    #[serde(default)]
    pub group_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Option<Vec<GroupInfo>>,
}

/// The body of `POST /api/v1/group`. [CreateGroupPayload::new] fills in the
/// defaults the node expects for a public timeline group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupPayload {
    pub group_name: String,
    pub app_key: String,
    pub consensus_type: String,
    pub encryption_type: String,
    pub include_chain_url: bool,
}

impl CreateGroupPayload {
    pub fn new(group_name: &str) -> Self {
        CreateGroupPayload {
            group_name: group_name.to_owned(),
            app_key: "group_timeline".into(),
            consensus_type: "poa".into(),
            encryption_type: "public".into(),
            include_chain_url: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupResponse {
    pub group_id: GroupId,
    /// The shareable `rum://` seed other nodes use to join
    pub seed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub seed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupPayload {
    pub seed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupResponse {
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub user_pubkey: Option<Pubkey>,
    #[serde(default)]
    pub consensus_type: Option<String>,
    #[serde(default)]
    pub encryption_type: Option<String>,
    #[serde(default)]
    pub cipher_key: Option<String>,
    #[serde(default)]
    pub app_key: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupIdPayload {
    pub group_id: GroupId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveGroupResponse {
    pub group_id: GroupId,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearGroupResponse {
    pub group_id: GroupId,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubkeyToAddrPayload {
    pub encoded_pubkey: Pubkey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubkeyToAddrResponse {
    pub addr: String,
}
