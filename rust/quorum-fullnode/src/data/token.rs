use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::{GroupId, Jwt};

/// The audience of an issued token: the whole node, or a single group's chain
/// API
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TokenRole {
    Node,
    Chain,
}

/// The body of `POST /app/api/v1/token/create`; only reachable from localhost
/// on a stock node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenPayload {
    pub name: String,
    pub role: TokenRole,
    pub group_id: Option<GroupId>,
    /// RFC 3339 expiry, e.g. `2027-04-28T08:10:36+00:00`
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTokenResponse {
    pub token: Jwt,
}

/// The body shared by the token revoke and remove routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub role: TokenRole,
    pub group_id: Option<GroupId>,
    pub token: Option<Jwt>,
}
