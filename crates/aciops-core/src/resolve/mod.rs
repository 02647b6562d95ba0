// ── Read-side resolvers ──
//
// Each resolver issues its queries through the fabric's client, then
// hands the trees to a pure correlation function. Transport and parse
// failures are logged and treated as "no data"; only a closed session
// is reported as an error.

pub mod endpoint;
pub mod gateway;
pub mod health;

use tracing::warn;

use aciops_api::{Encoding, Tree};
use url::Url;

use crate::error::CoreError;
use crate::fabric::Fabric;

impl Fabric {
    /// Fetch a tree, downgrading any remote failure to `None`.
    pub(crate) async fn fetch_lenient(&self, url: Url, encoding: Encoding) -> Result<Option<Tree>, CoreError> {
        let client = self.client()?;
        match client.get_tree(url.clone(), encoding).await {
            Ok(tree) => Ok(Some(tree)),
            Err(e) => {
                warn!(error = %e, %url, %encoding, "query failed, treating as no data");
                Ok(None)
            }
        }
    }
}
