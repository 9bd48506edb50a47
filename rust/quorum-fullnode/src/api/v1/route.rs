use crate::api::route::RouteSignature;
use crate::data::{GroupId, Pubkey, TrxId, TrxType};
use crate::route_display;

/// The version of the API represented by this module
pub const API_VERSION: &str = "v1";

/// An enum whose variants represent all of the node's v1 routes this SDK
/// drives
pub enum Route {
    /// Get the node's identity and liveness summary
    Node,
    /// Get the node's view of its own network placement
    Network,
    /// Connect the node to the given peer addresses
    ConnectPeers,
    /// Ask relay servers to serve a node on a private network
    AskForRelay,
    /// List the groups this node has joined
    Groups,
    /// Create a new group
    CreateGroup,
    Group(GroupId),
    Seed(GroupId),
    LeaveGroup,
    ClearGroup,
    StartSync(GroupId),
    Block(GroupId, String),
    Trx(GroupId, TrxId),
    TrxAck,
    PubQueue(GroupId),
    /// Post a content trx to a group
    PostContent(GroupId),
    AppConfigKeyList(GroupId),
    AppConfigKey(GroupId, String),
    UpdateAppConfig,
    UpdateChainConfig,
    /// Get the authorization mode of one trx type
    TrxAuth(GroupId, TrxType),
    AllowList(GroupId),
    DenyList(GroupId),
    /// Announce this node as a user or producer of a group
    Announce,
    AnnouncedUsers(GroupId),
    AnnouncedUser(GroupId, Pubkey),
    AnnouncedProducers(GroupId),
    /// Approve or expel an announced user (owner only)
    UpdateUser,
    /// Propose a consensus change, including the producer set
    UpdateConsensus,
    Consensus(GroupId),
    ConsensusProof(GroupId, String),
    ConsensusProofLast(GroupId),
    ConsensusProofHistory(GroupId),
    ConsensusProofCurrent(GroupId),
    /// Convert a pubkey to its chain address
    PubkeyToAddr,
}

route_display!(Route);

impl RouteSignature for Route {
    fn to_fragment(&self) -> String {
        match self {
            Route::Node => "node".into(),
            Route::Network => "network".into(),
            Route::ConnectPeers => "network/peers".into(),
            Route::AskForRelay => "network/relay".into(),
            Route::Groups => "groups".into(),
            Route::CreateGroup => "group".into(),
            Route::Group(group_id) => format!("group/{group_id}"),
            Route::Seed(group_id) => format!("group/{group_id}/seed"),
            Route::LeaveGroup => "group/leave".into(),
            Route::ClearGroup => "group/clear".into(),
            Route::StartSync(group_id) => format!("group/{group_id}/startsync"),
            Route::Block(group_id, block_id) => format!("block/{group_id}/{block_id}"),
            Route::Trx(group_id, trx_id) => format!("trx/{group_id}/{trx_id}"),
            Route::TrxAck => "trx/ack".into(),
            Route::PubQueue(group_id) => format!("group/{group_id}/pubqueue"),
            Route::PostContent(group_id) => format!("group/{group_id}/content"),
            Route::AppConfigKeyList(group_id) => {
                format!("group/{group_id}/appconfig/keylist")
            }
            Route::AppConfigKey(group_id, key) => {
                format!("group/{group_id}/appconfig/{key}")
            }
            Route::UpdateAppConfig => "group/appconfig".into(),
            Route::UpdateChainConfig => "group/chainconfig".into(),
            Route::TrxAuth(group_id, trx_type) => {
                format!("group/{group_id}/trx/auth/{trx_type}")
            }
            Route::AllowList(group_id) => format!("group/{group_id}/trx/allowlist"),
            Route::DenyList(group_id) => format!("group/{group_id}/trx/denylist"),
            Route::Announce => "group/announce".into(),
            Route::AnnouncedUsers(group_id) => format!("group/{group_id}/announced/users"),
            Route::AnnouncedUser(group_id, pubkey) => {
                format!("group/{group_id}/announced/user/{pubkey}")
            }
            Route::AnnouncedProducers(group_id) => {
                format!("group/{group_id}/announced/producers")
            }
            Route::UpdateUser => "group/user".into(),
            Route::UpdateConsensus => "group/updconsensus".into(),
            Route::Consensus(group_id) => format!("group/{group_id}/consensus"),
            Route::ConsensusProof(group_id, req_id) => {
                format!("group/{group_id}/consensus/proof/{req_id}")
            }
            Route::ConsensusProofLast(group_id) => {
                format!("group/{group_id}/consensus/proof/last")
            }
            Route::ConsensusProofHistory(group_id) => {
                format!("group/{group_id}/consensus/proof/history")
            }
            Route::ConsensusProofCurrent(group_id) => {
                format!("group/{group_id}/consensus/proof/current")
            }
            Route::PubkeyToAddr => "tools/pubkeytoaddr".into(),
        }
    }

    fn api_version(&self) -> &str {
        API_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use crate::data::{GroupId, TrxId, TrxType};

    fn group_id() -> GroupId {
        GroupId::from("52bac668-5e3f-4e29-9e3b-4b3c34dbae10")
    }

    #[test]
    fn it_renders_the_documented_paths() {
        assert_eq!(Route::Node.to_string(), "/api/v1/node");
        assert_eq!(Route::Groups.to_string(), "/api/v1/groups");
        assert_eq!(Route::CreateGroup.to_string(), "/api/v1/group");
        assert_eq!(
            Route::Group(group_id()).to_string(),
            "/api/v1/group/52bac668-5e3f-4e29-9e3b-4b3c34dbae10"
        );
        assert_eq!(
            Route::Seed(group_id()).to_string(),
            "/api/v1/group/52bac668-5e3f-4e29-9e3b-4b3c34dbae10/seed"
        );
        assert_eq!(
            Route::Trx(group_id(), TrxId::from("some-trx")).to_string(),
            "/api/v1/trx/52bac668-5e3f-4e29-9e3b-4b3c34dbae10/some-trx"
        );
        assert_eq!(Route::TrxAck.to_string(), "/api/v1/trx/ack");
        assert_eq!(
            Route::TrxAuth(group_id(), TrxType::Post).to_string(),
            "/api/v1/group/52bac668-5e3f-4e29-9e3b-4b3c34dbae10/trx/auth/POST"
        );
        assert_eq!(Route::UpdateConsensus.to_string(), "/api/v1/group/updconsensus");
        assert_eq!(Route::PubkeyToAddr.to_string(), "/api/v1/tools/pubkeytoaddr");
    }
}
