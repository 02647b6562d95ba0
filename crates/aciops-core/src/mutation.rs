// ── Mutation builder ──
//
// Check-then-write against the catalog. Each command lists the relevant
// scope, refuses locally when the target already exists (or a required
// peer is missing), and otherwise posts exactly one nested payload.
// The catalog is listed again after the write; the write response alone
// is not taken as proof of success.

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::command::{Command, CommandResult, RoutingScope, Toggle};
use crate::error::CoreError;
use crate::fabric::Fabric;
use crate::model::{FabricClass, Scope};

impl Fabric {
    /// Execute a command against the controller.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        self.client()?;
        debug!(?cmd, "executing command");

        match cmd {
            Command::CreateTenant { tenant } => {
                self.create(FabricClass::Tenant, &Scope::Fabric, named(&tenant), Vec::new())
                    .await
            }
            Command::CreateVrf { tenant, vrf } => {
                self.create(FabricClass::Vrf, &Scope::tenant(tenant), named(&vrf), Vec::new())
                    .await
            }
            Command::CreateBridgeDomainL2 { tenant, bd } => {
                self.create(
                    FabricClass::BridgeDomain,
                    &Scope::tenant(tenant),
                    named(&bd),
                    Vec::new(),
                )
                .await
            }
            Command::CreateBridgeDomainL3 {
                tenant,
                bd,
                subnet,
                scope,
            } => {
                let result = self
                    .create(
                        FabricClass::BridgeDomain,
                        &Scope::tenant(tenant),
                        named(&bd),
                        vec![subnet_child(&subnet, &scope)],
                    )
                    .await?;
                self.attach_gateway(result, &subnet).await
            }
            Command::CreateAppProfile { tenant, app } => {
                self.create(
                    FabricClass::AppProfile,
                    &Scope::tenant(tenant),
                    named(&app),
                    Vec::new(),
                )
                .await
            }
            Command::CreateEpg { tenant, app, epg } => {
                if !self.list_app_profiles(&tenant).await?.contains(&app) {
                    return Ok(missing(FabricClass::AppProfile, app));
                }
                self.create(FabricClass::Epg, &Scope::app(tenant, app), named(&epg), Vec::new())
                    .await
            }
            Command::CreateSubnet {
                tenant,
                bd,
                subnet,
                scope,
            } => {
                if !self.list_bridge_domains(&tenant).await?.contains(&bd) {
                    return Ok(missing(FabricClass::BridgeDomain, bd));
                }
                let mut attributes = Map::new();
                attributes.insert("ip".into(), Value::String(subnet.clone()));
                attributes.insert("scope".into(), Value::String(scope.to_string()));
                let result = self
                    .create(
                        FabricClass::Subnet,
                        &Scope::bridge_domain(tenant, bd),
                        attributes,
                        Vec::new(),
                    )
                    .await?;
                self.attach_gateway(result, &subnet).await
            }
            Command::SetRoutingScope {
                tenant,
                bd,
                subnet,
                scope,
            } => self.apply_routing_scope(&tenant, &bd, &subnet, &scope).await,
            Command::SetUnicastRouting { tenant, bd, enable } => {
                self.apply_unicast_routing(&tenant, &bd, enable).await
            }
            Command::AssociateVrf { tenant, bd, vrf } => {
                self.apply_vrf_association(&tenant, &bd, &vrf).await
            }
        }
    }

    /// Create any catalog class under `scope`.
    ///
    /// `attributes` must carry the class's key attribute. When that key
    /// is already listed the call is a no-op returning `AlreadyExists`.
    pub async fn create(
        &self,
        class: FabricClass,
        scope: &Scope,
        attributes: Map<String, Value>,
        children: Vec<Value>,
    ) -> Result<CommandResult, CoreError> {
        let key = attributes
            .get(class.key_attribute())
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!("{class} requires a non-empty `{}`", class.key_attribute()),
            })?;

        if self.list(class, scope).await?.contains(&key) {
            debug!(%class, %key, "already present, skipping write");
            return Ok(CommandResult::AlreadyExists { class, name: key });
        }

        let response = self
            .post(&scope.dn(), &payload(class.class_name(), attributes, children))
            .await?;
        let catalog = self.list(class, scope).await?;
        info!(%class, %key, scope = %scope.dn(), "created");

        Ok(CommandResult::Applied {
            response,
            catalog,
            gateway: None,
        })
    }

    // ── Convenience entry points taking raw input ────────────────────

    pub async fn create_tenant(&self, tenant: &str) -> Result<CommandResult, CoreError> {
        self.execute(Command::CreateTenant {
            tenant: tenant.into(),
        })
        .await
    }

    pub async fn create_vrf(&self, tenant: &str, vrf: &str) -> Result<CommandResult, CoreError> {
        self.execute(Command::CreateVrf {
            tenant: tenant.into(),
            vrf: vrf.into(),
        })
        .await
    }

    pub async fn create_bd_l2(&self, tenant: &str, bd: &str) -> Result<CommandResult, CoreError> {
        self.execute(Command::CreateBridgeDomainL2 {
            tenant: tenant.into(),
            bd: bd.into(),
        })
        .await
    }

    /// `scope` is validated before anything is sent.
    pub async fn create_bd_l3(
        &self,
        tenant: &str,
        bd: &str,
        subnet: &str,
        scope: &str,
    ) -> Result<CommandResult, CoreError> {
        let scope: RoutingScope = scope.parse()?;
        self.execute(Command::CreateBridgeDomainL3 {
            tenant: tenant.into(),
            bd: bd.into(),
            subnet: subnet.into(),
            scope,
        })
        .await
    }

    pub async fn create_app_profile(
        &self,
        tenant: &str,
        app: &str,
    ) -> Result<CommandResult, CoreError> {
        self.execute(Command::CreateAppProfile {
            tenant: tenant.into(),
            app: app.into(),
        })
        .await
    }

    pub async fn create_epg(
        &self,
        tenant: &str,
        app: &str,
        epg: &str,
    ) -> Result<CommandResult, CoreError> {
        self.execute(Command::CreateEpg {
            tenant: tenant.into(),
            app: app.into(),
            epg: epg.into(),
        })
        .await
    }

    pub async fn create_subnet(
        &self,
        tenant: &str,
        bd: &str,
        subnet: &str,
        scope: &str,
    ) -> Result<CommandResult, CoreError> {
        let scope: RoutingScope = scope.parse()?;
        self.execute(Command::CreateSubnet {
            tenant: tenant.into(),
            bd: bd.into(),
            subnet: subnet.into(),
            scope,
        })
        .await
    }

    pub async fn set_routing_scope(
        &self,
        tenant: &str,
        bd: &str,
        subnet: &str,
        scope: &str,
    ) -> Result<CommandResult, CoreError> {
        let scope: RoutingScope = scope.parse()?;
        self.execute(Command::SetRoutingScope {
            tenant: tenant.into(),
            bd: bd.into(),
            subnet: subnet.into(),
            scope,
        })
        .await
    }

    pub async fn set_unicast_routing(
        &self,
        tenant: &str,
        bd: &str,
        enable: &str,
    ) -> Result<CommandResult, CoreError> {
        let enable = Toggle::parse(enable)?;
        self.execute(Command::SetUnicastRouting {
            tenant: tenant.into(),
            bd: bd.into(),
            enable,
        })
        .await
    }

    pub async fn associate_vrf(
        &self,
        tenant: &str,
        bd: &str,
        vrf: &str,
    ) -> Result<CommandResult, CoreError> {
        self.execute(Command::AssociateVrf {
            tenant: tenant.into(),
            bd: bd.into(),
            vrf: vrf.into(),
        })
        .await
    }

    // ── Modifications of existing objects ────────────────────────────

    async fn apply_routing_scope(
        &self,
        tenant: &str,
        bd: &str,
        subnet: &str,
        scope: &RoutingScope,
    ) -> Result<CommandResult, CoreError> {
        if !self.list_bridge_domains(tenant).await?.iter().any(|b| b == bd) {
            return Ok(missing(FabricClass::BridgeDomain, bd));
        }
        if !self.list_subnets(tenant, bd).await?.iter().any(|s| s == subnet) {
            return Ok(missing(FabricClass::Subnet, subnet));
        }

        let response = self
            .post(
                &format!("uni/tn-{tenant}/BD-{bd}/subnet-[{subnet}]"),
                &json!({ "fvSubnet": { "attributes": { "ip": subnet, "scope": scope.to_string() } } }),
            )
            .await?;
        info!(%tenant, %bd, %subnet, %scope, "routing scope updated");

        let applied = CommandResult::Applied {
            response,
            catalog: self.list_bridge_domains(tenant).await?,
            gateway: None,
        };
        self.attach_gateway(applied, subnet).await
    }

    async fn apply_unicast_routing(
        &self,
        tenant: &str,
        bd: &str,
        enable: Toggle,
    ) -> Result<CommandResult, CoreError> {
        if !self.list_bridge_domains(tenant).await?.iter().any(|b| b == bd) {
            return Ok(missing(FabricClass::BridgeDomain, bd));
        }

        let response = self
            .post(
                &Scope::tenant(tenant).dn(),
                &json!({ "fvBD": { "attributes": { "name": bd, "unicastRoute": enable.as_ref() } } }),
            )
            .await?;
        info!(%tenant, %bd, unicast_route = enable.as_ref(), "unicast routing updated");

        Ok(CommandResult::Applied {
            response,
            catalog: self.list_bridge_domains(tenant).await?,
            gateway: None,
        })
    }

    async fn apply_vrf_association(
        &self,
        tenant: &str,
        bd: &str,
        vrf: &str,
    ) -> Result<CommandResult, CoreError> {
        if !self.list_vrfs(tenant).await?.iter().any(|v| v == vrf) {
            return Ok(missing(FabricClass::Vrf, vrf));
        }
        if !self.list_bridge_domains(tenant).await?.iter().any(|b| b == bd) {
            return Ok(missing(FabricClass::BridgeDomain, bd));
        }

        let body = payload(
            FabricClass::BridgeDomain.class_name(),
            named(bd),
            vec![child("fvRsCtx", json!({ "tnFvCtxName": vrf }))],
        );
        let response = self.post(&Scope::tenant(tenant).dn(), &body).await?;
        info!(%tenant, %bd, %vrf, "vrf associated");

        Ok(CommandResult::Applied {
            response,
            catalog: self.list_vrfs(tenant).await?,
            gateway: None,
        })
    }

    // ── Helpers ──────────────────────────────────────────────────────

    async fn post(&self, dn: &str, body: &Value) -> Result<Value, CoreError> {
        let client = self.client()?;
        let url = client.post_url(dn)?;
        Ok(client.post_json(url, body).await?)
    }

    /// Fold the gateway view of `subnet` into an applied result.
    async fn attach_gateway(
        &self,
        result: CommandResult,
        subnet: &str,
    ) -> Result<CommandResult, CoreError> {
        match result {
            CommandResult::Applied {
                response, catalog, ..
            } => Ok(CommandResult::Applied {
                response,
                catalog,
                gateway: Some(self.resolve_gateway(subnet).await?),
            }),
            refused => Ok(refused),
        }
    }
}

/// `{"<class>": {"attributes": {...}, "children": [...]}}`; `children`
/// is omitted when empty.
pub fn payload(class_name: &str, attributes: Map<String, Value>, children: Vec<Value>) -> Value {
    let mut body = Map::new();
    body.insert("attributes".into(), Value::Object(attributes));
    if !children.is_empty() {
        body.insert("children".into(), Value::Array(children));
    }
    let mut wrapped = Map::new();
    wrapped.insert(class_name.to_owned(), Value::Object(body));
    Value::Object(wrapped)
}

/// Child object with attributes only.
pub fn child(class_name: &str, attributes: Value) -> Value {
    let attributes = match attributes {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    payload(class_name, attributes, Vec::new())
}

fn named(name: &str) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert("name".into(), Value::String(name.to_owned()));
    attributes
}

fn subnet_child(subnet: &str, scope: &RoutingScope) -> Value {
    child(
        FabricClass::Subnet.class_name(),
        json!({ "ip": subnet, "scope": scope.to_string() }),
    )
}

fn missing(class: FabricClass, name: impl Into<String>) -> CommandResult {
    CommandResult::Missing {
        class,
        name: name.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn l3_bridge_domain_is_one_nested_payload() {
        let scope: RoutingScope = match "public,shared".parse() {
            Ok(scope) => scope,
            Err(e) => panic!("{e}"),
        };
        let body = payload("fvBD", named("BD1"), vec![subnet_child("10.0.0.1/24", &scope)]);
        assert_eq!(
            body,
            json!({
                "fvBD": {
                    "attributes": { "name": "BD1" },
                    "children": [
                        { "fvSubnet": { "attributes": { "ip": "10.0.0.1/24", "scope": "public,shared" } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn childless_payload_omits_children() {
        assert_eq!(
            payload("fvTenant", named("T2"), Vec::new()),
            json!({ "fvTenant": { "attributes": { "name": "T2" } } })
        );
    }

    #[test]
    fn vrf_association_payload() {
        let body = payload(
            "fvBD",
            named("BD1"),
            vec![child("fvRsCtx", json!({ "tnFvCtxName": "VRF1" }))],
        );
        assert_eq!(
            body["fvBD"]["children"][0]["fvRsCtx"]["attributes"]["tnFvCtxName"],
            "VRF1"
        );
    }
}
