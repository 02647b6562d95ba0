// ── Object catalog ──
//
// Name listings of the policy objects under a containment scope. These
// are the existence checks every mutation runs before it writes.

use tracing::debug;

use aciops_api::{Encoding, Query, QueryTarget, Tree};

use crate::error::CoreError;
use crate::fabric::Fabric;
use crate::model::{FabricClass, Scope};

impl Fabric {
    /// Names (or subnet IPs) of every `class` instance directly under `scope`.
    ///
    /// Walks at most `totalCount` records, in response order.
    pub async fn list(&self, class: FabricClass, scope: &Scope) -> Result<Vec<String>, CoreError> {
        if !class.lives_in(scope) {
            return Err(CoreError::ValidationFailed {
                message: format!("{class} objects do not live under {}", scope.dn()),
            });
        }

        let client = self.client()?;
        let url = match scope {
            Scope::Fabric => client.class_url(class.class_name(), Encoding::Json, &Query::new())?,
            _ => client.mo_url(
                &scope.dn(),
                Encoding::Json,
                &Query::new()
                    .target(QueryTarget::Children)
                    .target_subtree_class(&[class.class_name()]),
            )?,
        };

        let tree = client.get_tree(url, Encoding::Json).await?;
        let names = catalog_names(&tree, class);
        debug!(%class, scope = %scope.dn(), count = names.len(), "catalog listed");
        Ok(names)
    }

    pub async fn list_tenants(&self) -> Result<Vec<String>, CoreError> {
        self.list(FabricClass::Tenant, &Scope::Fabric).await
    }

    pub async fn list_vrfs(&self, tenant: &str) -> Result<Vec<String>, CoreError> {
        self.list(FabricClass::Vrf, &Scope::tenant(tenant)).await
    }

    pub async fn list_bridge_domains(&self, tenant: &str) -> Result<Vec<String>, CoreError> {
        self.list(FabricClass::BridgeDomain, &Scope::tenant(tenant))
            .await
    }

    pub async fn list_app_profiles(&self, tenant: &str) -> Result<Vec<String>, CoreError> {
        self.list(FabricClass::AppProfile, &Scope::tenant(tenant))
            .await
    }

    pub async fn list_epgs(&self, tenant: &str, app: &str) -> Result<Vec<String>, CoreError> {
        self.list(FabricClass::Epg, &Scope::app(tenant, app)).await
    }

    pub async fn list_subnets(&self, tenant: &str, bd: &str) -> Result<Vec<String>, CoreError> {
        self.list(FabricClass::Subnet, &Scope::bridge_domain(tenant, bd))
            .await
    }
}

/// Key attribute of each `class` record, bounded by the advertised count.
pub(crate) fn catalog_names(tree: &Tree, class: FabricClass) -> Vec<String> {
    let records = tree.records();
    let limit = tree.total_count().unwrap_or(records.len());
    if limit < records.len() {
        debug!(
            advertised = limit,
            returned = records.len(),
            "ignoring records beyond totalCount"
        );
    }

    records
        .iter()
        .take(limit)
        .filter(|node| node.class() == class.class_name())
        .filter_map(|node| node.attribute(class.key_attribute()))
        .map(str::to_owned)
        .collect()
}
