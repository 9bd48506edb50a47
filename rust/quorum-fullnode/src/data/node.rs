use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::GroupId;

/// Identity and liveness summary of the node, from `GET /api/v1/node`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node_id: String,
    #[serde(default)]
    pub node_publickey: String,
    pub node_status: String,
    #[serde(default)]
    pub node_type: String,
    #[serde(default)]
    pub node_version: String,
    /// Connected peer addresses, keyed by protocol
    #[serde(default)]
    pub peers: HashMap<String, Vec<String>>,
}

/// The node's view of its own network placement, from `GET /api/v1/network`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInfo {
    #[serde(rename = "peerid", default)]
    pub peer_id: String,
    #[serde(default)]
    pub ethaddr: String,
    pub nat_type: String,
    #[serde(default)]
    pub nat_enabled: bool,
    #[serde(default)]
    pub addrs: Vec<String>,
    #[serde(default)]
    pub groups: Vec<NetworkGroupInfo>,
}

/// Per-group connectivity as reported inside [NetworkInfo]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkGroupInfo {
    #[serde(rename = "GroupId")]
    pub group_id: GroupId,
    #[serde(rename = "GroupName", default)]
    pub group_name: Option<String>,
    #[serde(rename = "Peers", default)]
    pub peers: Option<Vec<String>>,
}
