use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::{GroupId, Pubkey, TrxType};

/// The add/remove switch shared by the node's config, announce and membership
/// mutation routes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConfigAction {
    Add,
    Remove,
}

/// A single app config mutation; see [crate::FullNode::update_appconfig]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub action: ConfigAction,
    #[serde(default)]
    pub memo: Option<String>,
}

impl AppConfigUpdate {
    /// An `add` mutation for a string-valued key, the common case
    pub fn set_string(name: &str, value: &str) -> Self {
        AppConfigUpdate {
            name: name.to_owned(),
            kind: "string".into(),
            value: value.to_owned(),
            action: ConfigAction::Add,
            memo: None,
        }
    }
}

/// The wire body of `POST /api/v1/group/appconfig`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigPayload {
    pub action: ConfigAction,
    pub group_id: GroupId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub memo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigKeyItem {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigItem {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
    #[serde(rename = "OwnerPubkey", default)]
    pub owner_pubkey: Option<Pubkey>,
    #[serde(rename = "OwnerSign", default)]
    pub owner_sign: Option<String>,
    #[serde(rename = "Memo", default)]
    pub memo: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
}

/// The two chain authorization modes: an allow list or a deny list, spelled
/// `alw`/`dny` on the wire
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TrxAuthMode {
    #[strum(to_string = "alw", serialize = "allow")]
    #[serde(rename = "alw")]
    Allow,
    #[strum(to_string = "dny", serialize = "deny")]
    #[serde(rename = "dny")]
    Deny,
}

impl TrxAuthMode {
    /// The `trx_auth_mode` value the chain config route expects
    pub fn follow_list(&self) -> String {
        format!("follow_{}_list", self)
    }

    /// The chain config `type` tag for updating this mode's list
    pub fn update_list_type(&self) -> String {
        format!("upd_{}_list", self)
    }
}

/// The authorization mode of one trx type, from
/// `GET /api/v1/group/{id}/trx/auth/{type}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrxAuthItem {
    #[serde(rename = "TrxType")]
    pub trx_type: TrxType,
    #[serde(rename = "AuthType")]
    pub auth_type: String,
}

/// The wire body of `POST /api/v1/group/chainconfig`. The node expects the
/// actual configuration JSON-encoded inside the `config` string, and spells
/// the memo field with a capital M.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfigPayload {
    pub group_id: GroupId,
    #[serde(rename = "type")]
    pub kind: String,
    pub config: String,
    #[serde(rename = "Memo")]
    pub memo: String,
}

/// The inner config for a `set_trx_auth_mode` chain config mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrxAuthModeConfig {
    pub trx_type: TrxType,
    pub trx_auth_mode: String,
}

/// The inner config for an `upd_alw_list`/`upd_dny_list` chain config mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthListConfig {
    pub action: ConfigAction,
    pub pubkey: Pubkey,
    pub trx_type: Vec<TrxType>,
}

/// One entry of a group's allow or deny list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainAuthListItem {
    #[serde(rename = "Pubkey")]
    pub pubkey: Pubkey,
    #[serde(rename = "TrxType", default)]
    pub trx_type: Option<Vec<TrxType>>,
    #[serde(rename = "GroupOwnerPubkey", default)]
    pub group_owner_pubkey: Option<Pubkey>,
    #[serde(rename = "GroupOwnerSign", default)]
    pub group_owner_sign: Option<String>,
    #[serde(rename = "TimeStamp", default)]
    pub timestamp: Option<i64>,
    #[serde(rename = "Memo", default)]
    pub memo: Option<String>,
}
