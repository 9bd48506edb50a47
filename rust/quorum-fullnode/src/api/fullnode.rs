use std::collections::HashMap;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use url::Url;

use crate::{
    api::{
        app,
        data::AsQuery,
        route::{RouteSignature, RouteUrl},
        v1, v2,
    },
    client::HttpClient,
    data::{
        AckPayload, AnnounceKind, AnnouncePayload, AnnouncedProducer, AnnouncedUser,
        AppConfigItem, AppConfigKeyItem, AppConfigPayload, AppConfigUpdate, AuthListConfig,
        Block, ChainAuthListItem, ChainConfigPayload, ClearGroupResponse, ConfigAction,
        ConsensusInfo, ConsensusReqResponse, CreateGroupPayload, CreateGroupResponse,
        CreateTokenPayload, CreateTokenResponse, GroupId, GroupIdPayload, GroupInfo,
        GroupsResponse, JoinGroupPayload, JoinGroupResponse, Jwt, LeaveGroupResponse,
        NetworkInfo, NodeInfo, PubQueueItem, PubQueueResponse, Pubkey, PubkeyToAddrPayload,
        PubkeyToAddrResponse, SeedResponse, TokenPayload, TokenRole, Trx, TrxAuthItem,
        TrxAuthMode, TrxAuthModeConfig, TrxId, TrxResponse, TrxType, UpdateConsensusOptions,
        UpdateConsensusOutcome, UpdateConsensusPayload, UpdateUserPayload,
        PUB_QUEUE_STATE_FAIL,
    },
    error::FullNodeError,
};

/// A [FullNode] is a simple HTTP client for the REST API of a QuoRum
/// FullNode. It exposes one method per documented operation: each builds the
/// route URL, attaches the configured JWT as a bearer credential, and
/// deserializes the node's JSON response.
///
/// Group-scoped methods take an optional group id; when passed `None` they
/// fall back to the default configured with [FullNode::set_group_id]. The
/// guards the node itself would apply anyway (a known group id, membership,
/// ownership) are checked client side first, the way the upstream SDKs do.
pub struct FullNode {
    client: HttpClient,
    group_id: Option<GroupId>,
}

impl FullNode {
    pub fn new(api_base: Url, token: Option<Jwt>) -> Result<Self, FullNodeError> {
        debug!("Initializing FullNode API client for {}", api_base);

        Ok(FullNode {
            client: HttpClient::new(api_base, token)?,
            group_id: None,
        })
    }

    /// Connect to a node listening on the local loopback interface
    pub fn local(port: u16, token: Option<Jwt>) -> Result<Self, FullNodeError> {
        let api_base = Url::parse(&format!("http://127.0.0.1:{port}"))?;
        Self::new(api_base, token)
    }

    pub fn group_id(&self) -> Option<&GroupId> {
        self.group_id.as_ref()
    }

    /// Set the default group used by group-scoped methods that are passed
    /// `None`
    pub fn set_group_id(&mut self, group_id: Option<GroupId>) {
        self.group_id = group_id;
    }

    /// Replace the bearer credential, e.g. with the result of
    /// [FullNode::refresh_token]
    pub fn set_token(&mut self, token: Option<Jwt>) {
        self.client.set_token(token);
    }

    fn url<Route, Params>(
        &self,
        route: Route,
        params: Option<&Params>,
    ) -> Result<Url, FullNodeError>
    where
        Route: RouteSignature,
        Params: AsQuery,
    {
        Url::try_from(RouteUrl(self.client.api_base(), route, params))
            .map_err(FullNodeError::Other)
    }

    fn route(&self, route: impl RouteSignature) -> Result<Url, FullNodeError> {
        self.url(route, None::<&()>)
    }

    fn require_group_id(&self, group_id: Option<&GroupId>) -> Result<GroupId, FullNodeError> {
        group_id
            .or(self.group_id.as_ref())
            .cloned()
            .ok_or_else(|| FullNodeError::ParamValue("group_id is required".into()))
    }

    async fn require_group_joined(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<GroupId, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;

        if !self.group_ids().await?.contains(&group_id) {
            return Err(FullNodeError::NotInGroup(group_id));
        }

        Ok(group_id)
    }

    async fn require_group_owner(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<GroupId, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        let info = self.group_info(Some(&group_id)).await?;

        match (&info.user_pubkey, &info.owner_pubkey) {
            (Some(user), Some(owner)) if user == owner => Ok(group_id),
            _ => Err(FullNodeError::NotGroupOwner(group_id)),
        }
    }

    pub async fn node_info(&self) -> Result<NodeInfo, FullNodeError> {
        self.client.get(self.route(v1::Route::Node)?).await
    }

    pub async fn network(&self) -> Result<NetworkInfo, FullNodeError> {
        self.client.get(self.route(v1::Route::Network)?).await
    }

    /// Connect to the given peers. An address looks like
    /// `/ip4/94.23.17.189/tcp/10666/p2p/16Uiu2HAm...`
    pub async fn connect_peers(&self, peers: &[String]) -> Result<Value, FullNodeError> {
        self.client
            .post(self.route(v1::Route::ConnectPeers)?, Some(peers))
            .await
    }

    /// Ask the given relay servers to serve this node on a private network
    pub async fn ask_for_relay(&self, peers: &[String]) -> Result<Value, FullNodeError> {
        self.client
            .post(self.route(v1::Route::AskForRelay)?, Some(peers))
            .await
    }

    /// The groups this node has joined
    pub async fn groups(&self) -> Result<Vec<GroupInfo>, FullNodeError> {
        let response: GroupsResponse = self.client.get(self.route(v1::Route::Groups)?).await?;
        Ok(response.groups.unwrap_or_default())
    }

    /// The ids of the groups this node has joined
    pub async fn group_ids(&self) -> Result<Vec<GroupId>, FullNodeError> {
        Ok(self
            .groups()
            .await?
            .into_iter()
            .map(|group| group.group_id)
            .collect())
    }

    /// Convert a pubkey to its chain address
    pub async fn pubkey_to_addr(&self, pubkey: &Pubkey) -> Result<String, FullNodeError> {
        let payload = PubkeyToAddrPayload {
            encoded_pubkey: pubkey.clone(),
        };
        let response: PubkeyToAddrResponse = self
            .client
            .post(self.route(v1::Route::PubkeyToAddr)?, Some(&payload))
            .await?;
        Ok(response.addr)
    }

    /// Issue a new auth token. A stock node only allows this from localhost.
    /// The name defaults to `allow-{group_id}` (or `allow-chain` for chain
    /// tokens) and the expiry to five years out.
    pub async fn create_token(
        &self,
        role: TokenRole,
        name: Option<&str>,
        group_id: Option<&GroupId>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<CreateTokenResponse, FullNodeError> {
        let (name, group_id) = match role {
            TokenRole::Chain => (name.unwrap_or("allow-chain").to_owned(), None),
            TokenRole::Node => {
                let group_id = self.require_group_id(group_id)?;
                let name = name
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("allow-{group_id}"));
                (name, Some(group_id))
            }
        };

        let expires_at = expires_at
            .unwrap_or_else(|| Utc::now() + Duration::days(5 * 365))
            .to_rfc3339_opts(SecondsFormat::Secs, false);

        let payload = CreateTokenPayload {
            name,
            role,
            group_id,
            expires_at,
        };

        self.client
            .post(self.route(app::Route::CreateToken)?, Some(&payload))
            .await
    }

    /// Trade the configured token for a fresh one, e.g. when it is about to
    /// expire
    pub async fn refresh_token(&self) -> Result<CreateTokenResponse, FullNodeError> {
        self.client
            .post(self.route(app::Route::RefreshToken)?, None::<&()>)
            .await
    }

    pub async fn list_tokens(&self) -> Result<Value, FullNodeError> {
        self.client.get(self.route(app::Route::ListToken)?).await
    }

    /// Revoke a usable token: the node adds it to the revocation list in its
    /// config
    pub async fn revoke_token(
        &self,
        token: Option<&Jwt>,
        role: TokenRole,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let payload = self.token_payload(token, role, group_id)?;
        self.client
            .post(self.route(app::Route::RevokeToken)?, Some(&payload))
            .await
    }

    /// Delete a token from the node's config outright
    pub async fn remove_token(
        &self,
        token: Option<&Jwt>,
        role: TokenRole,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let payload = self.token_payload(token, role, group_id)?;
        self.client
            .post(self.route(app::Route::RemoveToken)?, Some(&payload))
            .await
    }

    fn token_payload(
        &self,
        token: Option<&Jwt>,
        role: TokenRole,
        group_id: Option<&GroupId>,
    ) -> Result<TokenPayload, FullNodeError> {
        let group_id = match role {
            TokenRole::Chain => None,
            TokenRole::Node => Some(self.require_group_id(group_id)?),
        };

        Ok(TokenPayload {
            role,
            group_id,
            token: token.cloned(),
        })
    }

    /// The peers currently connected for one group
    pub async fn group_network(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<String>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let network = self.network().await?;

        Ok(network
            .groups
            .into_iter()
            .find(|group| group.group_id == group_id)
            .and_then(|group| group.peers)
            .unwrap_or_default())
    }

    pub async fn group_info(&self, group_id: Option<&GroupId>) -> Result<GroupInfo, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        self.client.get(self.route(v1::Route::Group(group_id))?).await
    }

    /// Create a group with the stock timeline defaults, returning its id and
    /// shareable seed
    pub async fn create_group(
        &self,
        group_name: &str,
    ) -> Result<CreateGroupResponse, FullNodeError> {
        self.create_group_with(&CreateGroupPayload::new(group_name)).await
    }

    pub async fn create_group_with(
        &self,
        payload: &CreateGroupPayload,
    ) -> Result<CreateGroupResponse, FullNodeError> {
        let payload = CreateGroupPayload {
            consensus_type: payload.consensus_type.to_lowercase(),
            encryption_type: payload.encryption_type.to_lowercase(),
            ..payload.clone()
        };

        self.client
            .post(self.route(v1::Route::CreateGroup)?, Some(&payload))
            .await
    }

    /// The seed of a group this node has joined
    pub async fn seed(
        &self,
        group_id: Option<&GroupId>,
        include_chain_url: bool,
    ) -> Result<String, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        let params = v1::SeedParameters { include_chain_url };
        let response: SeedResponse = self
            .client
            .get(self.url(v1::Route::Seed(group_id), Some(&params))?)
            .await?;
        Ok(response.seed)
    }

    /// Join a group from its seed (a string starting with `rum://`)
    pub async fn join_group(&self, seed: &str) -> Result<JoinGroupResponse, FullNodeError> {
        let payload = JoinGroupPayload {
            seed: seed.to_owned(),
        };
        self.client
            .post(self.route(v2::Route::JoinGroup)?, Some(&payload))
            .await
    }

    pub async fn leave_group(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<LeaveGroupResponse, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let payload = GroupIdPayload { group_id };
        self.client
            .post(self.route(v1::Route::LeaveGroup)?, Some(&payload))
            .await
    }

    /// Drop the locally cached data of a group, usually after leaving it
    pub async fn clear_group(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<ClearGroupResponse, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let payload = GroupIdPayload { group_id };
        self.client
            .post(self.route(v1::Route::ClearGroup)?, Some(&payload))
            .await
    }

    /// Post a content trx to a group; see [crate::feed] for payload
    /// constructors
    pub async fn post_content(
        &self,
        data: &Value,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        self.client
            .post(
                self.route(v1::Route::PostContent(group_id))?,
                Some(&json!({ "data": data })),
            )
            .await
    }

    /// Page through a group's content index. Each trx's `Data` is decoded in
    /// place where possible.
    pub async fn get_content(
        &self,
        params: &app::ContentParameters,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<Trx>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let url = self.url(app::Route::GroupContent(group_id), Some(params))?;
        let trxs: Option<Vec<Trx>> = self.client.get(url).await?;

        let mut trxs = trxs.unwrap_or_default();
        for trx in trxs.iter_mut() {
            trx.decode_data();
        }

        Ok(trxs)
    }

    /// Look up one trx, preferring the content index and falling back to the
    /// raw chain record
    pub async fn trx(
        &self,
        trx_id: &TrxId,
        group_id: Option<&GroupId>,
    ) -> Result<Option<Trx>, FullNodeError> {
        if trx_id.is_empty() {
            return Ok(None);
        }

        let params = app::ContentParameters {
            num: 1,
            start_trx: Some(trx_id.clone()),
            include_start_trx: true,
            ..Default::default()
        };

        let mut trxs = self.get_content(&params, group_id).await?;

        if trxs.is_empty() {
            Ok(Some(self.get_trx(trx_id, group_id).await?))
        } else {
            Ok(Some(trxs.remove(0)))
        }
    }

    /// The raw chain record of a trx
    pub async fn get_trx(
        &self,
        trx_id: &TrxId,
        group_id: Option<&GroupId>,
    ) -> Result<Trx, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        self.client
            .get(self.route(v1::Route::Trx(group_id, trx_id.clone()))?)
            .await
    }

    pub async fn get_block(
        &self,
        block_id: &str,
        group_id: Option<&GroupId>,
    ) -> Result<Block, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        self.client
            .get(self.route(v1::Route::Block(group_id, block_id.to_owned()))?)
            .await
    }

    /// Nudge the node to start syncing a group's chain
    pub async fn start_sync(&self, group_id: Option<&GroupId>) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_joined(group_id).await?;
        self.client
            .post(self.route(v1::Route::StartSync(group_id))?, None::<&()>)
            .await
    }

    /// The node's outbound publishing queue for a group
    pub async fn pubqueue(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<PubQueueItem>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let response: PubQueueResponse = self
            .client
            .get(self.route(v1::Route::PubQueue(group_id))?)
            .await?;
        Ok(response.data)
    }

    /// Acknowledge trxs so the node stops retrying them
    pub async fn ack(&self, trx_ids: &[TrxId]) -> Result<Vec<TrxId>, FullNodeError> {
        if trx_ids.is_empty() {
            return Ok(Vec::new());
        }

        let payload = AckPayload {
            trx_ids: trx_ids.to_vec(),
        };
        self.client
            .post(self.route(v1::Route::TrxAck)?, Some(&payload))
            .await
    }

    /// Acknowledge every failed entry in a group's publishing queue
    pub async fn autoack(&self, group_id: Option<&GroupId>) -> Result<Vec<TrxId>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let trx_ids: Vec<TrxId> = self
            .pubqueue(Some(&group_id))
            .await?
            .into_iter()
            .filter(|item| item.state == PUB_QUEUE_STATE_FAIL)
            .map(|item| item.trx.trx_id)
            .collect();

        self.ack(&trx_ids).await
    }

    /// The names of a group's app config keys
    pub async fn appconfig_keylist(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<AppConfigKeyItem>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let items: Option<Vec<AppConfigKeyItem>> = self
            .client
            .get(self.route(v1::Route::AppConfigKeyList(group_id))?)
            .await?;
        Ok(items.unwrap_or_default())
    }

    /// One app config entry of a group, by key name
    pub async fn appconfig_key(
        &self,
        key: &str,
        group_id: Option<&GroupId>,
    ) -> Result<AppConfigItem, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::AppConfigKey(group_id, key.to_owned()))?)
            .await
    }

    /// Apply one app config mutation; only the group owner can do this
    pub async fn update_appconfig(
        &self,
        update: &AppConfigUpdate,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        let group_id = self.require_group_owner(group_id).await?;
        let payload = AppConfigPayload {
            action: update.action,
            group_id,
            name: update.name.clone(),
            kind: update.kind.clone(),
            value: update.value.clone(),
            memo: update
                .memo
                .clone()
                .unwrap_or_else(|| format!("update {}", update.name)),
        };

        self.client
            .post(self.route(v1::Route::UpdateAppConfig)?, Some(&payload))
            .await
    }

    /// The authorization mode of one trx type
    pub async fn trx_auth(
        &self,
        trx_type: TrxType,
        group_id: Option<&GroupId>,
    ) -> Result<TrxAuthItem, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::TrxAuth(group_id, trx_type))?)
            .await
    }

    /// The authorization mode of every trx type
    pub async fn auth_modes(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<HashMap<TrxType, String>, FullNodeError> {
        let mut modes = HashMap::new();

        for trx_type in TrxType::iter() {
            let item = self.trx_auth(trx_type, group_id).await?;
            modes.insert(item.trx_type, item.auth_type);
        }

        Ok(modes)
    }

    /// Switch one trx type between allow-list and deny-list authorization;
    /// only the group owner can do this
    pub async fn set_trx_auth(
        &self,
        trx_type: TrxType,
        mode: TrxAuthMode,
        memo: Option<&str>,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        let group_id = self.require_group_owner(group_id).await?;
        let config = TrxAuthModeConfig {
            trx_type,
            trx_auth_mode: mode.follow_list(),
        };
        let payload = ChainConfigPayload {
            group_id,
            kind: "set_trx_auth_mode".into(),
            config: encode_chain_config(&config)?,
            memo: memo.unwrap_or("set trx auth type").to_owned(),
        };

        self.client
            .post(self.route(v1::Route::UpdateChainConfig)?, Some(&payload))
            .await
    }

    /// A group's allow list
    pub async fn allow_list(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<ChainAuthListItem>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let items: Option<Vec<ChainAuthListItem>> = self
            .client
            .get(self.route(v1::Route::AllowList(group_id))?)
            .await?;
        Ok(items.unwrap_or_default())
    }

    /// A group's deny list
    pub async fn deny_list(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<ChainAuthListItem>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let items: Option<Vec<ChainAuthListItem>> = self
            .client
            .get(self.route(v1::Route::DenyList(group_id))?)
            .await?;
        Ok(items.unwrap_or_default())
    }

    async fn update_auth_list(
        &self,
        pubkey: &Pubkey,
        mode: TrxAuthMode,
        action: ConfigAction,
        memo: &str,
        trx_types: Option<&[TrxType]>,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        let group_id = self.require_group_owner(group_id).await?;
        let config = AuthListConfig {
            action,
            pubkey: pubkey.clone(),
            trx_type: trx_types
                .map(<[TrxType]>::to_vec)
                .unwrap_or_else(|| vec![TrxType::Post]),
        };
        let payload = ChainConfigPayload {
            group_id,
            kind: mode.update_list_type(),
            config: encode_chain_config(&config)?,
            memo: memo.to_owned(),
        };

        self.client
            .post(self.route(v1::Route::UpdateChainConfig)?, Some(&payload))
            .await
    }

    /// Allow `pubkey` to send the given trx types (`POST` when unspecified)
    pub async fn add_allow_list(
        &self,
        pubkey: &Pubkey,
        trx_types: Option<&[TrxType]>,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        self.update_auth_list(
            pubkey,
            TrxAuthMode::Allow,
            ConfigAction::Add,
            "add allow list",
            trx_types,
            group_id,
        )
        .await
    }

    pub async fn remove_allow_list(
        &self,
        pubkey: &Pubkey,
        trx_types: Option<&[TrxType]>,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        self.update_auth_list(
            pubkey,
            TrxAuthMode::Allow,
            ConfigAction::Remove,
            "remove allow list",
            trx_types,
            group_id,
        )
        .await
    }

    /// Deny `pubkey` the given trx types (`POST` when unspecified)
    pub async fn add_deny_list(
        &self,
        pubkey: &Pubkey,
        trx_types: Option<&[TrxType]>,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        self.update_auth_list(
            pubkey,
            TrxAuthMode::Deny,
            ConfigAction::Add,
            "add deny list",
            trx_types,
            group_id,
        )
        .await
    }

    pub async fn remove_deny_list(
        &self,
        pubkey: &Pubkey,
        trx_types: Option<&[TrxType]>,
        group_id: Option<&GroupId>,
    ) -> Result<TrxResponse, FullNodeError> {
        self.update_auth_list(
            pubkey,
            TrxAuthMode::Deny,
            ConfigAction::Remove,
            "remove deny list",
            trx_types,
            group_id,
        )
        .await
    }

    /// The pubkeys of the group's current producers
    pub async fn producers(&self, group_id: Option<&GroupId>) -> Result<Vec<Pubkey>, FullNodeError> {
        Ok(self
            .consensus(group_id)
            .await?
            .producers
            .into_iter()
            .map(|producer| producer.producer_pubkey)
            .collect())
    }

    /// The producer candidates waiting for owner approval
    pub async fn announced_producers(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<AnnouncedProducer>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let items: Option<Vec<AnnouncedProducer>> = self
            .client
            .get(self.route(v1::Route::AnnouncedProducers(group_id))?)
            .await?;
        Ok(items.unwrap_or_default())
    }

    /// Add the given pubkeys to the group's producer set
    pub async fn add_producers(
        &self,
        pubkeys: &[Pubkey],
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        self.update_producers(pubkeys, ConfigAction::Add, group_id).await
    }

    /// Remove the given pubkeys from the group's producer set
    pub async fn remove_producers(
        &self,
        pubkeys: &[Pubkey],
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        self.update_producers(pubkeys, ConfigAction::Remove, group_id).await
    }

    async fn update_producers(
        &self,
        pubkeys: &[Pubkey],
        action: ConfigAction,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let payload = json!({
            "producer_pubkey": pubkeys,
            "group_id": group_id,
            "action": action,
        });

        self.client
            .post(self.route(v1::Route::UpdateConsensus)?, Some(&payload))
            .await
    }

    async fn announce(&self, payload: &AnnouncePayload) -> Result<Value, FullNodeError> {
        self.client
            .post(self.route(v1::Route::Announce)?, Some(payload))
            .await
    }

    /// Announce this node as a producer candidate for a group
    pub async fn announce_as_producer(
        &self,
        memo: Option<&str>,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.announce(&AnnouncePayload {
            group_id,
            action: ConfigAction::Add,
            kind: AnnounceKind::Producer,
            memo: memo.unwrap_or("announce self as producer").to_owned(),
        })
        .await
    }

    /// Announce that this node wants to step down from producer duty
    pub async fn announce_producer_removal(
        &self,
        memo: Option<&str>,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.announce(&AnnouncePayload {
            group_id,
            action: ConfigAction::Remove,
            kind: AnnounceKind::Producer,
            memo: memo
                .unwrap_or("announce self as producer to remove")
                .to_owned(),
        })
        .await
    }

    /// Announce this node as a user of a group
    pub async fn announce_as_user(
        &self,
        memo: Option<&str>,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.announce(&AnnouncePayload {
            group_id,
            action: ConfigAction::Add,
            kind: AnnounceKind::User,
            memo: memo.unwrap_or("announce self as user").to_owned(),
        })
        .await
    }

    /// The group's consensus configuration
    pub async fn consensus(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<ConsensusInfo, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::Consensus(group_id))?)
            .await
    }

    /// The responses recorded for one consensus change request
    pub async fn consensus_req(
        &self,
        req_id: &str,
        group_id: Option<&GroupId>,
    ) -> Result<ConsensusReqResponse, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::ConsensusProof(group_id, req_id.to_owned()))?)
            .await
    }

    pub async fn consensus_last(&self, group_id: Option<&GroupId>) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::ConsensusProofLast(group_id))?)
            .await
    }

    pub async fn consensus_history(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::ConsensusProofHistory(group_id))?)
            .await
    }

    pub async fn consensus_current(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::ConsensusProofCurrent(group_id))?)
            .await
    }

    /// Propose a consensus change, merging the caller's overrides over the
    /// chain's current proposal. The node's bounds are checked up front: the
    /// trx epoch tick must be at least 500ms, the agreement tick length at
    /// least 1000ms and the agreement tick count at least 10.
    pub async fn update_consensus(
        &self,
        options: &UpdateConsensusOptions,
        group_id: Option<&GroupId>,
    ) -> Result<UpdateConsensusOutcome, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;

        if matches!(options.trx_epoch_tick, Some(tick) if tick < 500) {
            return Err(FullNodeError::ParamValue(
                "trx_epoch_tick must be at least 500 (ms)".into(),
            ));
        }

        if matches!(options.agreement_tick_length, Some(length) if length < 1000) {
            return Err(FullNodeError::ParamValue(
                "agreement_tick_length must be at least 1000 (ms)".into(),
            ));
        }

        if matches!(options.agreement_tick_count, Some(count) if count < 10) {
            return Err(FullNodeError::ParamValue(
                "agreement_tick_count must be at least 10".into(),
            ));
        }

        let req = {
            let consensus = self.consensus(Some(&group_id)).await?;
            match consensus.proof_req_id {
                Some(req_id) => self
                    .consensus_req(&req_id, Some(&group_id))
                    .await?
                    .resps
                    .into_iter()
                    .next()
                    .and_then(|resp| resp.req),
                None => None,
            }
        }
        .unwrap_or_default();

        let current = UpdateConsensusPayload {
            group_id: group_id.clone(),
            start_from_epoch: req.start_from_epoch.unwrap_or(1),
            trx_epoch_tick: req.trx_epoch_tick.unwrap_or(500),
            agreement_tick_length: req.agreement_tick_length.unwrap_or(1000),
            agreement_tick_count: req.agreement_tick_count.unwrap_or(10),
            producer_pubkey: req.producer_pubkeys.unwrap_or_default(),
        };

        let payload = UpdateConsensusPayload {
            group_id,
            start_from_epoch: options.start_from_epoch.unwrap_or(current.start_from_epoch),
            trx_epoch_tick: options.trx_epoch_tick.unwrap_or(current.trx_epoch_tick),
            agreement_tick_length: options
                .agreement_tick_length
                .unwrap_or(current.agreement_tick_length),
            agreement_tick_count: options
                .agreement_tick_count
                .unwrap_or(current.agreement_tick_count),
            producer_pubkey: options
                .producer_pubkeys
                .clone()
                .unwrap_or_else(|| current.producer_pubkey.clone()),
        };

        if payload == current {
            return Ok(UpdateConsensusOutcome::Unchanged);
        }

        if payload.trx_epoch_tick < payload.agreement_tick_length {
            warn!(
                "trx_epoch_tick {} should be greater than agreement_tick_length {}",
                payload.trx_epoch_tick, payload.agreement_tick_length
            );
        }

        let response = self
            .client
            .post(self.route(v1::Route::UpdateConsensus)?, Some(&payload))
            .await?;

        Ok(UpdateConsensusOutcome::Submitted(response))
    }

    /// The users waiting for owner approval (to be added or removed)
    pub async fn announced_users(
        &self,
        group_id: Option<&GroupId>,
    ) -> Result<Vec<AnnouncedUser>, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        let items: Option<Vec<AnnouncedUser>> = self
            .client
            .get(self.route(v1::Route::AnnouncedUsers(group_id))?)
            .await?;
        Ok(items.unwrap_or_default())
    }

    /// The announcement record of one user, if any
    pub async fn announced_user(
        &self,
        pubkey: &Pubkey,
        group_id: Option<&GroupId>,
    ) -> Result<AnnouncedUser, FullNodeError> {
        let group_id = self.require_group_id(group_id)?;
        self.client
            .get(self.route(v1::Route::AnnouncedUser(group_id, pubkey.clone()))?)
            .await
    }

    /// Send a raw user mutation to the node
    pub async fn update_user(&self, payload: &UpdateUserPayload) -> Result<Value, FullNodeError> {
        self.client
            .post(self.route(v1::Route::UpdateUser)?, Some(payload))
            .await
    }

    async fn approve_user(
        &self,
        pubkey: &Pubkey,
        action: ConfigAction,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        let group_id = self.require_group_owner(group_id).await?;
        self.update_user(&UpdateUserPayload {
            user_pubkey: pubkey.clone(),
            group_id,
            action,
        })
        .await
    }

    /// Approve an announced user into the group, skipping the mutation when
    /// the node already records them as approved
    pub async fn add_user(
        &self,
        pubkey: &Pubkey,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        match self.announced_user(pubkey, group_id).await {
            Ok(user) if user.is_approved() => {
                return serde_json::to_value(&user)
                    .map_err(|error| FullNodeError::Other(error.into()));
            }
            Ok(_) => (),
            Err(error) => debug!("Could not check announced user: {}", error),
        }

        self.approve_user(pubkey, ConfigAction::Add, group_id).await
    }

    /// Expel a user from the group
    pub async fn remove_user(
        &self,
        pubkey: &Pubkey,
        group_id: Option<&GroupId>,
    ) -> Result<Value, FullNodeError> {
        self.approve_user(pubkey, ConfigAction::Remove, group_id).await
    }
}

/// The chain config route expects its actual configuration JSON-encoded
/// inside a string field
fn encode_chain_config<C: serde::Serialize>(config: &C) -> Result<String, FullNodeError> {
    serde_json::to_string(config).map_err(|error| FullNodeError::Other(error.into()))
}
