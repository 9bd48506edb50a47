//! Contract tests for the FullNode client: each wrapper method must send the
//! documented verb, path and body, and must surface non-2xx statuses as
//! errors. A mock node stands in for the real thing on an ephemeral loopback
//! port.

mod helpers;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::MockNode;
use serde_json::json;

use quorum_fullnode::{
    api::app::ContentParameters,
    data::{
        GroupId, Jwt, Pubkey, TokenRole, TrxId, UpdateConsensusOptions, UpdateConsensusOutcome,
    },
    feed, FullNode, FullNodeError,
};

const GROUP: &str = "52bac668-5e3f-4e29-9e3b-4b3c34dbae10";

fn group_id() -> GroupId {
    GroupId::from(GROUP)
}

fn canned_node_info() -> serde_json::Value {
    json!({
        "node_id": "16Uiu2HAm8XVpfQrJYaeL7XtrHC3FvfKt2QW7P8m3tY5wPA9bQjgr",
        "node_publickey": "CAISIQO7y9pypUjJa",
        "node_status": "NODE_ONLINE",
        "node_type": "peer",
        "node_version": "2.0.0",
        "peers": {
            "/quorum/nevis/meshsub/1.1.0": ["16Uiu2HAkytdk8dhP8Z1JWvsM7qYPSLpHxLCfEWkSomqn7Tq6vTaVv"]
        }
    })
}

fn canned_group_info(user_pubkey: &str, owner_pubkey: &str) -> serde_json::Value {
    json!({
        "group_id": GROUP,
        "group_name": "test_group",
        "user_pubkey": user_pubkey,
        "owner_pubkey": owner_pubkey,
        "consensus_type": "POA",
        "encryption_type": "PUBLIC",
        "app_key": "group_timeline",
        "group_status": "IDLE"
    })
}

#[tokio::test]
async fn it_sends_the_bearer_token_and_user_agent() {
    let node = MockNode::start();
    node.respond_with("/api/v1/node", canned_node_info()).await;

    let client = FullNode::new(node.api_base(), Some(Jwt::from("some-jwt"))).unwrap();
    let info = client.node_info().await.unwrap();

    assert_eq!(info.node_status, "NODE_ONLINE");

    let request = node.last_request().await;
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/v1/node");
    assert_eq!(request.authorization.as_deref(), Some("Bearer some-jwt"));
    assert!(request.user_agent.unwrap().starts_with("quorum-fullnode/"));
}

#[tokio::test]
async fn it_omits_the_authorization_header_without_a_token() {
    let node = MockNode::start();
    node.respond_with("/api/v1/node", canned_node_info()).await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    client.node_info().await.unwrap();

    assert_eq!(node.last_request().await.authorization, None);
}

#[tokio::test]
async fn it_surfaces_error_statuses() {
    let node = MockNode::start();
    node.respond_with_status(
        "/api/v1/node",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "chain is on fire" }),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();

    match client.node_info().await {
        Err(FullNodeError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("chain is on fire"));
        }
        other => panic!("Expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn it_creates_a_group_with_timeline_defaults() {
    let node = MockNode::start();
    node.respond_with(
        "/api/v1/group",
        json!({ "group_id": GROUP, "seed": "rum://seed" }),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    let created = client.create_group("test_group").await.unwrap();

    assert_eq!(created.group_id, GROUP);
    assert_eq!(created.seed, "rum://seed");

    let request = node.last_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.body.unwrap(),
        json!({
            "group_name": "test_group",
            "app_key": "group_timeline",
            "consensus_type": "poa",
            "encryption_type": "public",
            "include_chain_url": false
        })
    );
}

#[tokio::test]
async fn it_joins_a_group_from_a_seed() {
    let node = MockNode::start();

    let client = FullNode::new(node.api_base(), None).unwrap();
    client.join_group("rum://seed").await.unwrap();

    let request = node.last_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/v2/group/join");
    assert_eq!(request.body.unwrap(), json!({ "seed": "rum://seed" }));
}

#[tokio::test]
async fn it_posts_content_to_a_joined_group() {
    let node = MockNode::start();
    node.respond_with("/api/v1/groups", json!({ "groups": [{ "group_id": GROUP }] }))
        .await;
    node.respond_with(
        &format!("/api/v1/group/{GROUP}/content"),
        json!({ "trx_id": "some-trx" }),
    )
    .await;

    let mut client = FullNode::new(node.api_base(), None).unwrap();
    client.set_group_id(Some(group_id()));

    let post = feed::new_post("hello world", &[], Some("some-post"), None).unwrap();
    let response = client.post_content(&post, None).await.unwrap();

    assert_eq!(response.trx_id, "some-trx");

    let request = node.last_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, format!("/api/v1/group/{GROUP}/content"));
    assert_eq!(request.body.unwrap(), json!({ "data": post }));
}

#[tokio::test]
async fn it_refuses_content_for_a_group_the_node_has_not_joined() {
    let node = MockNode::start();
    node.respond_with(
        "/api/v1/groups",
        json!({ "groups": [{ "group_id": "b0ac1771-ed8b-40a1-a7ba-4e8a6ac7a681" }] }),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    let post = feed::new_post("hello world", &[], None, None).unwrap();

    assert!(matches!(
        client.post_content(&post, Some(&group_id())).await,
        Err(FullNodeError::NotInGroup(id)) if id == group_id()
    ));
}

#[tokio::test]
async fn it_requires_a_group_id_when_none_is_configured() {
    let node = MockNode::start();

    let client = FullNode::new(node.api_base(), None).unwrap();
    let post = feed::new_post("hello world", &[], None, None).unwrap();

    assert!(matches!(
        client.post_content(&post, None).await,
        Err(FullNodeError::ParamValue(_))
    ));
    assert!(node.requests().await.is_empty());
}

#[tokio::test]
async fn it_renders_content_query_parameters_and_decodes_trx_data() {
    let node = MockNode::start();

    let content = json!({ "type": "Create", "object": { "type": "Note", "content": "hi" } });
    let encoded = STANDARD.encode(serde_json::to_vec(&content).unwrap());

    node.respond_with(
        &format!("/app/api/v1/group/{GROUP}/content"),
        json!([{ "TrxId": "some-trx", "Data": encoded, "SenderPubkey": "pk" }]),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    let params = ContentParameters {
        num: 5,
        reverse: true,
        start_trx: Some(TrxId::from("some-trx")),
        include_start_trx: true,
        senders: vec![Pubkey::from("pk")],
    };

    let trxs = client.get_content(&params, Some(&group_id())).await.unwrap();

    assert_eq!(trxs.len(), 1);
    assert_eq!(trxs[0].trx_id, "some-trx");
    assert_eq!(trxs[0].data, Some(content));

    let request = node.last_request().await;
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, format!("/app/api/v1/group/{GROUP}/content"));
    assert_eq!(
        request.query.as_deref(),
        Some("num=5&reverse=true&start_trx=some-trx&include_start_trx=true&senders=pk")
    );
}

#[tokio::test]
async fn it_renders_the_seed_query_parameter_only_when_asked() {
    let node = MockNode::start();
    node.respond_with("/api/v1/groups", json!({ "groups": [{ "group_id": GROUP }] }))
        .await;
    node.respond_with(
        &format!("/api/v1/group/{GROUP}/seed"),
        json!({ "seed": "rum://seed" }),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();

    let seed = client.seed(Some(&group_id()), true).await.unwrap();
    assert_eq!(seed, "rum://seed");
    assert_eq!(
        node.last_request().await.query.as_deref(),
        Some("include_chain_url=true")
    );

    client.seed(Some(&group_id()), false).await.unwrap();
    assert_eq!(node.last_request().await.query, None);
}

#[tokio::test]
async fn it_falls_back_to_the_chain_record_for_unindexed_trxs() {
    let node = MockNode::start();
    node.respond_with("/api/v1/groups", json!({ "groups": [{ "group_id": GROUP }] }))
        .await;
    node.respond_with(&format!("/app/api/v1/group/{GROUP}/content"), json!([]))
        .await;
    node.respond_with(
        &format!("/api/v1/trx/{GROUP}/some-trx"),
        json!({ "TrxId": "some-trx", "SenderPubkey": "pk" }),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();

    let trx = client
        .trx(&TrxId::from("some-trx"), Some(&group_id()))
        .await
        .unwrap()
        .expect("the chain record should be found");
    assert_eq!(trx.trx_id, "some-trx");

    let request = node.last_request().await;
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, format!("/api/v1/trx/{GROUP}/some-trx"));
}

#[tokio::test]
async fn it_resolves_an_empty_trx_id_without_a_request() {
    let node = MockNode::start();

    let client = FullNode::new(node.api_base(), None).unwrap();
    let trx = client.trx(&TrxId::from(""), Some(&group_id())).await.unwrap();

    assert!(trx.is_none());
    assert!(node.requests().await.is_empty());
}

#[tokio::test]
async fn it_skips_the_consensus_update_when_nothing_changes() {
    let node = MockNode::start();
    node.respond_with(
        &format!("/api/v1/group/{GROUP}/consensus"),
        json!({ "producers": [], "proof_req_id": "req-1" }),
    )
    .await;
    node.respond_with(
        &format!("/api/v1/group/{GROUP}/consensus/proof/req-1"),
        json!({
            "resps": [{
                "Req": {
                    "StartFromEpoch": 1,
                    "TrxEpochTickLenInMs": 500,
                    "AgreementTickLenInMs": 1000,
                    "AgreementTickCount": 10,
                    "ProducerPubkeyList": ["pk"]
                }
            }]
        }),
    )
    .await;
    node.respond_with("/api/v1/group/updconsensus", json!({ "status": "ok" }))
        .await;

    let client = FullNode::new(node.api_base(), None).unwrap();

    let outcome = client
        .update_consensus(&UpdateConsensusOptions::default(), Some(&group_id()))
        .await
        .unwrap();
    assert!(matches!(outcome, UpdateConsensusOutcome::Unchanged));
    assert!(!node
        .requests()
        .await
        .iter()
        .any(|request| request.path == "/api/v1/group/updconsensus"));

    let options = UpdateConsensusOptions {
        trx_epoch_tick: Some(600),
        ..Default::default()
    };
    let outcome = client
        .update_consensus(&options, Some(&group_id()))
        .await
        .unwrap();
    assert!(matches!(outcome, UpdateConsensusOutcome::Submitted(_)));

    let request = node.last_request().await;
    assert_eq!(request.path, "/api/v1/group/updconsensus");

    let body = request.body.unwrap();
    assert_eq!(body["trx_epoch_tick"], 600);
    assert_eq!(body["agreement_tick_Length"], 1000);
    assert_eq!(body["producer_pubkey"], json!(["pk"]));
}

#[tokio::test]
async fn it_checks_the_consensus_tick_bounds_up_front() {
    let node = MockNode::start();

    let client = FullNode::new(node.api_base(), None).unwrap();
    let options = UpdateConsensusOptions {
        trx_epoch_tick: Some(100),
        ..Default::default()
    };

    assert!(matches!(
        client.update_consensus(&options, Some(&group_id())).await,
        Err(FullNodeError::ParamValue(_))
    ));
    assert!(node.requests().await.is_empty());
}

#[tokio::test]
async fn it_issues_tokens_with_stock_defaults() {
    let node = MockNode::start();
    node.respond_with("/app/api/v1/token/create", json!({ "token": "fresh-jwt" }))
        .await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    let response = client
        .create_token(TokenRole::Node, None, Some(&group_id()), None)
        .await
        .unwrap();

    assert_eq!(response.token, "fresh-jwt");

    let request = node.last_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/app/api/v1/token/create");

    let body = request.body.unwrap();
    assert_eq!(body["name"], format!("allow-{GROUP}"));
    assert_eq!(body["role"], "node");
    assert_eq!(body["group_id"], GROUP);
    assert!(body["expires_at"].as_str().unwrap().ends_with("+00:00"));
}

#[tokio::test]
async fn it_updates_the_allow_list_through_the_chain_config() {
    let node = MockNode::start();
    node.respond_with(
        "/api/v1/groups",
        json!({ "groups": [canned_group_info("owner-pk", "owner-pk")] }),
    )
    .await;
    node.respond_with(
        &format!("/api/v1/group/{GROUP}"),
        canned_group_info("owner-pk", "owner-pk"),
    )
    .await;
    node.respond_with("/api/v1/group/chainconfig", json!({ "trx_id": "some-trx" }))
        .await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    client
        .add_allow_list(&Pubkey::from("member-pk"), None, Some(&group_id()))
        .await
        .unwrap();

    let request = node.last_request().await;
    assert_eq!(request.path, "/api/v1/group/chainconfig");

    let body = request.body.unwrap();
    assert_eq!(body["group_id"], GROUP);
    assert_eq!(body["type"], "upd_alw_list");
    assert_eq!(body["Memo"], "add allow list");

    let config: serde_json::Value =
        serde_json::from_str(body["config"].as_str().unwrap()).unwrap();
    assert_eq!(
        config,
        json!({ "action": "add", "pubkey": "member-pk", "trx_type": ["POST"] })
    );
}

#[tokio::test]
async fn it_checks_group_ownership_before_owner_operations() {
    let node = MockNode::start();
    node.respond_with(
        "/api/v1/groups",
        json!({ "groups": [canned_group_info("user-pk", "owner-pk")] }),
    )
    .await;
    node.respond_with(
        &format!("/api/v1/group/{GROUP}"),
        canned_group_info("user-pk", "owner-pk"),
    )
    .await;

    let client = FullNode::new(node.api_base(), None).unwrap();

    assert!(matches!(
        client
            .add_allow_list(&Pubkey::from("member-pk"), None, Some(&group_id()))
            .await,
        Err(FullNodeError::NotGroupOwner(id)) if id == group_id()
    ));
}

#[tokio::test]
async fn it_acks_only_the_failed_queue_entries() {
    let node = MockNode::start();
    node.respond_with(
        &format!("/api/v1/group/{GROUP}/pubqueue"),
        json!({
            "GroupId": GROUP,
            "Data": [
                { "State": "FAIL", "Trx": { "TrxId": "failed-trx" } },
                { "State": "SUCCESS", "Trx": { "TrxId": "published-trx" } }
            ]
        }),
    )
    .await;
    node.respond_with("/api/v1/trx/ack", json!(["failed-trx"])).await;

    let client = FullNode::new(node.api_base(), None).unwrap();
    let acked = client.autoack(Some(&group_id())).await.unwrap();

    assert_eq!(acked, vec![TrxId::from("failed-trx")]);

    let request = node.last_request().await;
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/v1/trx/ack");
    assert_eq!(request.body.unwrap(), json!({ "trx_ids": ["failed-trx"] }));
}

#[tokio::test]
async fn it_short_circuits_an_empty_ack() {
    let node = MockNode::start();

    let client = FullNode::new(node.api_base(), None).unwrap();
    let acked = client.ack(&[]).await.unwrap();

    assert!(acked.is_empty());
    assert!(node.requests().await.is_empty());
}
