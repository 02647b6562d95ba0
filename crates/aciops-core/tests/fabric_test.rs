#![allow(clippy::unwrap_used)]
// Integration tests for the `Fabric` handle using wiremock.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aciops_api::ApicClient;
use aciops_core::{
    AuthCredentials, BridgeDomainRef, CommandResult, CoreError, EndpointKind, EndpointLookup,
    Fabric, FabricClass, FabricConfig, Scope,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Fabric) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApicClient::with_client(reqwest::Client::new(), base_url);
    (server, Fabric::with_client(client))
}

fn listing(class: &str, key: &str, names: &[&str]) -> Value {
    let records: Vec<Value> = names
        .iter()
        .map(|n| json!({ class: { "attributes": { key: n } } }))
        .collect();
    json!({ "totalCount": names.len().to_string(), "imdata": records })
}

fn ok_write() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "totalCount": "0", "imdata": [] }))
}

async fn post_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .count()
}

const BD_SUBTREE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<imdata totalCount="4">
  <fvBD dn="uni/tn-T1/BD-BD1" name="BD1" unicastRoute="yes" unkMacUcastAct="proxy" ipLearning="yes" mtu="inherit" limitIpLearnToSubnets="yes" mac="00:22:BD:F8:19:FF"/>
  <fvSubnet dn="uni/tn-T1/BD-BD1/subnet-[10.0.0.1/24]" ip="10.0.0.1/24" scope="public"/>
  <fvRsCtx dn="uni/tn-T1/BD-BD1/rsctx" tnFvCtxName="VRF1"/>
  <fvRtBd dn="uni/tn-T1/BD-BD1/rtbd-[uni/tn-T1/ap-A1/epg-E1]"/>
</imdata>"#;

async fn mount_listing(
    server: &MockServer,
    mo_path: &str,
    class: &str,
    key: &str,
    names: &[&str],
) {
    Mock::given(method("GET"))
        .and(path(mo_path))
        .and(query_param("target-subtree-class", class))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(class, key, names)))
        .mount(server)
        .await;
}

async fn mount_bd_subtree(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/node/class/fvBD.xml"))
        .and(query_param("query-target", "subtree"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BD_SUBTREE))
        .mount(server)
        .await;
}

// ── Catalog ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_tenants_in_order() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/class/fvTenant.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing("fvTenant", "name", &["common", "T1"])),
        )
        .mount(&server)
        .await;

    assert_eq!(fabric.list_tenants().await.unwrap(), vec!["common", "T1"]);
}

#[tokio::test]
async fn test_list_truncates_to_returned_records() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("query-target", "children"))
        .and(query_param("target-subtree-class", "fvCtx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": "3",
            "imdata": [
                { "fvCtx": { "attributes": { "name": "VRF1" } } },
                { "fvCtx": { "attributes": { "name": "VRF2" } } }
            ]
        })))
        .mount(&server)
        .await;

    assert_eq!(fabric.list_vrfs("T1").await.unwrap(), vec!["VRF1", "VRF2"]);
}

#[tokio::test]
async fn test_list_rejects_mismatched_scope() {
    let (server, fabric) = setup().await;
    let result = fabric.list(FabricClass::Epg, &Scope::tenant("T1")).await;
    assert!(matches!(result, Err(CoreError::ValidationFailed { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Creation ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_existing_tenant_issues_no_write() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/class/fvTenant.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvTenant", "name", &["T1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ok_write())
        .expect(0)
        .mount(&server)
        .await;

    let result = fabric.create_tenant("T1").await.unwrap();
    assert_eq!(result.to_string(), "Tenant: T1 Exist");
    assert_eq!(post_count(&server).await, 0);
}

#[tokio::test]
async fn test_create_new_tenant_writes_once_and_relists() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/class/fvTenant.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvTenant", "name", &["T1"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/class/fvTenant.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing("fvTenant", "name", &["T1", "T2"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/mo/uni.json"))
        .and(body_json(json!({ "fvTenant": { "attributes": { "name": "T2" } } })))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;

    let result = fabric.create_tenant("T2").await.unwrap();
    match result {
        CommandResult::Applied {
            response, catalog, ..
        } => {
            assert_eq!(response["totalCount"], "0");
            assert_eq!(catalog, vec!["T1", "T2"]);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_is_idempotent_once_listed() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1/ap-A1.json"))
        .and(query_param("target-subtree-class", "fvAEPg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvAEPg", "name", &[])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1/ap-A1.json"))
        .and(query_param("target-subtree-class", "fvAEPg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvAEPg", "name", &["E1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvAp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvAp", "name", &["A1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/mo/uni/tn-T1/ap-A1.json"))
        .and(body_json(json!({ "fvAEPg": { "attributes": { "name": "E1" } } })))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;

    let first = fabric.create_epg("T1", "A1", "E1").await.unwrap();
    assert!(first.is_applied());
    assert_eq!(first.catalog().unwrap(), ["E1".to_owned()]);

    let second = fabric.create_epg("T1", "A1", "E1").await.unwrap();
    assert_eq!(second.to_string(), "EPG: E1 Exist");
    assert_eq!(post_count(&server).await, 1);
}

#[tokio::test]
async fn test_create_epg_under_missing_app_is_refused() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvAp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvAp", "name", &["A1"])))
        .mount(&server)
        .await;

    let result = fabric.create_epg("T1", "A9", "E1").await.unwrap();
    assert_eq!(
        result,
        CommandResult::Missing {
            class: FabricClass::AppProfile,
            name: "A9".into()
        }
    );
    assert_eq!(post_count(&server).await, 0);
}

#[tokio::test]
async fn test_create_l3_bridge_domain_single_nested_write() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvBD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvBD", "name", &[])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvBD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvBD", "name", &["BD1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/mo/uni/tn-T1.json"))
        .and(body_json(json!({
            "fvBD": {
                "attributes": { "name": "BD1" },
                "children": [
                    { "fvSubnet": { "attributes": { "ip": "10.0.0.1/24", "scope": "public" } } }
                ]
            }
        })))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;
    mount_bd_subtree(&server).await;

    let result = fabric
        .create_bd_l3("T1", "BD1", "10.0.0.1/24", "public")
        .await
        .unwrap();
    match result {
        CommandResult::Applied {
            catalog, gateway, ..
        } => {
            assert_eq!(catalog, vec!["BD1"]);
            let gateway = gateway.unwrap();
            assert_eq!(gateway.bridge_domain, BridgeDomainRef::Named("BD1".into()));
            assert_eq!(gateway.vrf.as_deref(), Some("VRF1"));
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[derive(Debug, Clone, Copy)]
enum Existing {
    Vrf,
    BridgeDomainL2,
    BridgeDomainL3,
    AppProfile,
    Subnet,
}

#[tokio::test]
async fn test_create_existing_object_of_every_class_issues_no_write() {
    let cases = [
        (Existing::Vrf, "Vrf: V1 Exist"),
        (Existing::BridgeDomainL2, "BD: B1 Exist"),
        (Existing::BridgeDomainL3, "BD: B1 Exist"),
        (Existing::AppProfile, "App Profile: A1 Exist"),
        (Existing::Subnet, "Subnet: 10.0.0.1/24 Exist"),
    ];

    for (case, expected) in cases {
        let (server, fabric) = setup().await;
        mount_listing(&server, "/api/node/mo/uni/tn-T1.json", "fvCtx", "name", &["V1"]).await;
        mount_listing(&server, "/api/node/mo/uni/tn-T1.json", "fvBD", "name", &["B1"]).await;
        mount_listing(&server, "/api/node/mo/uni/tn-T1.json", "fvAp", "name", &["A1"]).await;
        mount_listing(
            &server,
            "/api/node/mo/uni/tn-T1/BD-B1.json",
            "fvSubnet",
            "ip",
            &["10.0.0.1/24"],
        )
        .await;
        Mock::given(method("POST"))
            .respond_with(ok_write())
            .expect(0)
            .mount(&server)
            .await;

        let result = match case {
            Existing::Vrf => fabric.create_vrf("T1", "V1").await,
            Existing::BridgeDomainL2 => fabric.create_bd_l2("T1", "B1").await,
            Existing::BridgeDomainL3 => {
                fabric
                    .create_bd_l3("T1", "B1", "10.0.0.1/24", "public")
                    .await
            }
            Existing::AppProfile => fabric.create_app_profile("T1", "A1").await,
            Existing::Subnet => {
                fabric
                    .create_subnet("T1", "B1", "10.0.0.1/24", "private")
                    .await
            }
        }
        .unwrap();

        assert!(
            matches!(result, CommandResult::AlreadyExists { .. }),
            "{case:?}: {result:?}"
        );
        assert_eq!(result.to_string(), expected, "{case:?}");
        assert_eq!(post_count(&server).await, 0, "{case:?}");
    }
}

#[tokio::test]
async fn test_create_subnet_writes_under_bd_and_relists() {
    let (server, fabric) = setup().await;

    mount_listing(&server, "/api/node/mo/uni/tn-T1.json", "fvBD", "name", &["BD1"]).await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1/BD-BD1.json"))
        .and(query_param("target-subtree-class", "fvSubnet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvSubnet", "ip", &[])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_listing(
        &server,
        "/api/node/mo/uni/tn-T1/BD-BD1.json",
        "fvSubnet",
        "ip",
        &["10.0.0.1/24"],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/mo/uni/tn-T1/BD-BD1.json"))
        .and(body_json(json!({
            "fvSubnet": { "attributes": { "ip": "10.0.0.1/24", "scope": "public" } }
        })))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;
    mount_bd_subtree(&server).await;

    let result = fabric
        .create_subnet("T1", "BD1", "10.0.0.1/24", "public")
        .await
        .unwrap();
    match result {
        CommandResult::Applied {
            catalog, gateway, ..
        } => {
            assert_eq!(catalog, vec!["10.0.0.1/24"]);
            let gateway = gateway.unwrap();
            assert_eq!(gateway.bridge_domain, BridgeDomainRef::Named("BD1".into()));
            assert_eq!(gateway.scope.as_deref(), Some("public"));
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_subnet_under_missing_bd_is_refused() {
    let (server, fabric) = setup().await;
    mount_listing(&server, "/api/node/mo/uni/tn-T1.json", "fvBD", "name", &["BD1"]).await;

    let result = fabric
        .create_subnet("T1", "BD9", "10.0.0.1/24", "private")
        .await
        .unwrap();
    assert_eq!(result.to_string(), "BD: BD9 Doesn't Exist");
    assert_eq!(post_count(&server).await, 0);
}

// ── Validation happens before any request ───────────────────────────

#[tokio::test]
async fn test_invalid_scope_makes_no_remote_call() {
    let (server, fabric) = setup().await;

    let result = fabric
        .set_routing_scope("T1", "BD1", "10.0.0.1/24", "public,external")
        .await;
    match result {
        Err(CoreError::InvalidScope { token }) => assert_eq!(token, "external"),
        other => panic!("expected InvalidScope, got {other:?}"),
    }

    let result = fabric
        .create_bd_l3("T1", "BD1", "10.0.0.1/24", "global")
        .await;
    assert!(matches!(result, Err(CoreError::InvalidScope { .. })));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_toggle_makes_no_remote_call() {
    let (server, fabric) = setup().await;

    let result = fabric.set_unicast_routing("T1", "BD1", "enabled").await;
    match result {
        Err(CoreError::InvalidToggle { token }) => assert_eq!(token, "enabled"),
        other => panic!("expected InvalidToggle, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Modification ────────────────────────────────────────────────────

#[tokio::test]
async fn test_associate_missing_vrf_is_refused_locally() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvCtx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvCtx", "name", &["VRF1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ok_write())
        .expect(0)
        .mount(&server)
        .await;

    let result = fabric.associate_vrf("T1", "BD1", "VRF9").await.unwrap();
    assert_eq!(result.to_string(), "VRF: VRF9 Doesn't Exist");
}

#[tokio::test]
async fn test_associate_vrf_posts_relation() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvCtx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvCtx", "name", &["VRF1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvBD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvBD", "name", &["BD1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/mo/uni/tn-T1.json"))
        .and(body_json(json!({
            "fvBD": {
                "attributes": { "name": "BD1" },
                "children": [ { "fvRsCtx": { "attributes": { "tnFvCtxName": "VRF1" } } } ]
            }
        })))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;

    let result = fabric.associate_vrf("T1", "BD1", "VRF1").await.unwrap();
    assert_eq!(result.catalog().unwrap(), ["VRF1".to_owned()]);
}

#[tokio::test]
async fn test_unicast_routing_against_missing_bd_is_refused() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvBD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvBD", "name", &["BD1"])))
        .mount(&server)
        .await;

    let result = fabric.set_unicast_routing("T1", "BD7", "no").await.unwrap();
    assert_eq!(result.to_string(), "BD: BD7 Doesn't Exist");
    assert_eq!(post_count(&server).await, 0);
}

#[tokio::test]
async fn test_set_routing_scope_returns_gateway_view() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1.json"))
        .and(query_param("target-subtree-class", "fvBD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing("fvBD", "name", &["BD1"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/uni/tn-T1/BD-BD1.json"))
        .and(query_param("target-subtree-class", "fvSubnet"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(listing("fvSubnet", "ip", &["10.0.0.1/24"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/api/mo/uni/tn-T1/BD-BD1/subnet-"))
        .and(body_json(json!({
            "fvSubnet": { "attributes": { "ip": "10.0.0.1/24", "scope": "public,shared" } }
        })))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;
    mount_bd_subtree(&server).await;

    let result = fabric
        .set_routing_scope("T1", "BD1", "10.0.0.1/24", "public,shared")
        .await
        .unwrap();
    match result {
        CommandResult::Applied {
            catalog, gateway, ..
        } => {
            assert_eq!(catalog, vec!["BD1"]);
            assert_eq!(gateway.unwrap().tenant.as_deref(), Some("T1"));
        }
        other => panic!("expected Applied, got {other:?}"),
    }
}

// ── Gateway resolver ────────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_gateway() {
    let (server, fabric) = setup().await;
    mount_bd_subtree(&server).await;

    let rec = fabric.resolve_gateway("10.0.0.1").await.unwrap();
    assert_eq!(rec.bridge_domain, BridgeDomainRef::Named("BD1".into()));
    assert_eq!(rec.tenant.as_deref(), Some("T1"));
    assert_eq!(rec.scope.as_deref(), Some("public"));
    assert_eq!(rec.vrf.as_deref(), Some("VRF1"));
    assert_eq!(rec.epg_list().as_deref(), Some("E1"));
    assert_eq!(rec.l3out_list(), None);
}

#[tokio::test]
async fn test_resolve_gateway_is_stable_across_calls() {
    let (server, fabric) = setup().await;
    mount_bd_subtree(&server).await;

    let first = fabric.resolve_gateway("10.0.0").await.unwrap();
    let second = fabric.resolve_gateway("10.0.0").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.bridge_domain, BridgeDomainRef::Named("BD1".into()));
}

#[tokio::test]
async fn test_resolve_gateway_degrades_on_server_error() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let rec = fabric.resolve_gateway("10.0.0.1").await.unwrap();
    assert_eq!(rec.bridge_domain, BridgeDomainRef::Missing);
    assert!(fabric.list_gateways().await.unwrap().is_empty());
}

// ── Endpoint resolver ───────────────────────────────────────────────

const EP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<imdata totalCount="1">
  <fvCEp dn="uni/tn-T1/ap-A1/epg-E1/cep-00:50:56:AA:BB:CC" mac="00:50:56:AA:BB:CC" ip="10.1.1.10" encap="vlan-110" lcC="learned">
    <fvRsCEpToPathEp tDn="topology/pod-1/paths-101/pathep-[eth1/10]"/>
  </fvCEp>
</imdata>"#;

fn ep_json() -> Value {
    json!({
        "totalCount": "1",
        "imdata": [{ "fvCEp": {
            "attributes": {
                "dn": "uni/tn-T1/ap-A1/epg-E1/cep-00:50:56:AA:BB:CC",
                "mac": "00:50:56:AA:BB:CC",
                "ip": "10.1.1.10"
            },
            "children": [{ "fvRsCEpToPathEp": {
                "attributes": { "tDn": "topology/pod-1/paths-101/pathep-[eth1/10]" },
                "children": [{ "fvReportingNode": { "attributes": { "id": "101" } } }]
            } }]
        } }]
    })
}

async fn mount_endpoint(server: &MockServer, filter_key: &str, filter: &str) {
    Mock::given(method("GET"))
        .and(path("/api/node/class/fvCEp.xml"))
        .and(query_param(filter_key, filter))
        .respond_with(ResponseTemplate::new(200).set_body_string(EP_XML))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/class/fvCEp.json"))
        .and(query_param(filter_key, filter))
        .respond_with(ResponseTemplate::new(200).set_body_json(ep_json()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_endpoint_pair_round_trip() {
    let (server, fabric) = setup().await;
    mount_endpoint(
        &server,
        "query-target-filter",
        "eq(fvCEp.mac,\"00:50:56:AA:BB:CC\")",
    )
    .await;
    mount_endpoint(&server, "rsp-subtree-filter", "eq(fvIp.addr,\"10.1.1.10\")").await;

    let pair = fabric
        .resolve_endpoint_pair("00:50:56:AA:BB:CC")
        .await
        .unwrap();

    let primary = pair.primary.found().unwrap();
    assert_eq!(primary.kind, EndpointKind::Mac);
    assert_eq!(primary.reverse_address.as_deref(), Some("10.1.1.10"));
    assert_eq!(primary.paths, vec!["pod-1->101->eth1/10"]);
    assert_eq!(primary.switches, vec!["101"]);

    let reverse = pair.reverse.unwrap();
    let reverse = reverse.found().unwrap();
    assert_eq!(reverse.kind, EndpointKind::Ip);
    assert_eq!(reverse.reverse_address.as_deref(), Some("00:50:56:AA:BB:CC"));
    assert_eq!(
        (reverse.tenant.as_str(), reverse.app.as_str(), reverse.epg.as_str()),
        (primary.tenant.as_str(), primary.app.as_str(), primary.epg.as_str())
    );
}

#[tokio::test]
async fn test_unknown_endpoint_is_not_found() {
    let (server, fabric) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/node/class/fvCEp.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<?xml version="1.0" encoding="UTF-8"?><imdata totalCount="0"></imdata>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/class/fvCEp.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let pair = fabric.resolve_endpoint_pair("10.9.9.9").await.unwrap();
    assert_eq!(
        pair.primary,
        EndpointLookup::NotFound {
            identifier: "10.9.9.9".into()
        }
    );
    assert!(pair.reverse.is_none());
}

// ── Health snapshot ─────────────────────────────────────────────────

#[tokio::test]
async fn test_health_snapshot_skips_empty_pods() {
    let (server, fabric) = setup().await;
    let fabric = fabric.with_max_pods(2);

    Mock::given(method("GET"))
        .and(path("/api/node/mo/topology/pod-1.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8"?><imdata totalCount="2"><fabricNode id="101" name="leaf-101" model="N9K-C93180YC-FX" serial="FDO1111"/><fabricHealthTotal cur="97" prev="97" chng="0"/></imdata>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/node/mo/topology/pod-2.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8"?><imdata totalCount="0"></imdata>"#,
        ))
        .mount(&server)
        .await;

    let health = fabric.health_snapshot().await.unwrap();
    assert_eq!(health.keys().collect::<Vec<_>>(), vec!["pod-1"]);
    let pod = &health["pod-1"];
    assert_eq!(pod.health, Some(97));
    assert_eq!(pod.nodes[0].name, "leaf-101");
}

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn test_connect_and_disconnect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/aaaLogin.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imdata": [{ "aaaLogin": { "attributes": { "token": "abc" } } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/aaaLogout.json"))
        .respond_with(ok_write())
        .expect(1)
        .mount(&server)
        .await;

    let config = FabricConfig::new(
        Url::parse(&server.uri()).unwrap(),
        AuthCredentials::Password {
            username: "admin".into(),
            password: "secret".to_string().into(),
        },
    );
    let fabric = Fabric::connect(config).await.unwrap();
    assert!(fabric.is_connected());

    fabric.disconnect().await;
    assert!(!fabric.is_connected());

    let result = fabric.list_tenants().await;
    assert!(matches!(result, Err(CoreError::NotConnected)));
}
