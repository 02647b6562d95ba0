// ── Fabric session handle ──
//
// The explicit context every resolver and mutation runs against: one
// authenticated client, the session state, and the knobs that shape
// queries. Operations are plain `async fn`s awaited one after another;
// nothing is spawned in the background.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use aciops_api::{ApicClient, TlsMode, TransportConfig};

use crate::config::{AuthCredentials, DEFAULT_MAX_PODS, FabricConfig, TlsVerification};
use crate::error::CoreError;

// ── SessionState ─────────────────────────────────────────────────

/// Session state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

// ── Fabric ───────────────────────────────────────────────────────

/// An authenticated session against one APIC cluster.
///
/// Cheaply cloneable via `Arc<FabricInner>`.
#[derive(Clone)]
pub struct Fabric {
    inner: Arc<FabricInner>,
    max_pods: u8,
}

struct FabricInner {
    client: ApicClient,
    /// Set when the session was opened by `connect` and must be closed.
    username: Option<String>,
    session: watch::Sender<SessionState>,
}

impl Fabric {
    /// Log in and return a connected handle.
    pub async fn connect(config: FabricConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = ApicClient::new(config.url.clone(), &transport)?;

        let username = match &config.auth {
            AuthCredentials::Password { username, password } => {
                let info = client.login(username, password).await?;
                debug!(
                    refresh_timeout_secs = ?info.refresh_timeout_secs,
                    "session authentication successful"
                );
                username.clone()
            }
        };

        let (session, _) = watch::channel(SessionState::Connected);
        info!(url = %config.url, "connected to controller");
        Ok(Self {
            inner: Arc::new(FabricInner {
                client,
                username: Some(username),
                session,
            }),
            max_pods: config.max_pods,
        })
    }

    /// Wrap a client that already carries a session (or needs none).
    pub fn with_client(client: ApicClient) -> Self {
        let (session, _) = watch::channel(SessionState::Connected);
        Self {
            inner: Arc::new(FabricInner {
                client,
                username: None,
                session,
            }),
            max_pods: DEFAULT_MAX_PODS,
        }
    }

    /// Override how many pods the health snapshot probes.
    pub fn with_max_pods(mut self, max_pods: u8) -> Self {
        self.max_pods = max_pods;
        self
    }

    /// Log out (when this handle logged in) and mark the session closed.
    ///
    /// Logout failures are logged and otherwise ignored.
    pub async fn disconnect(&self) {
        if !self.is_connected() {
            return;
        }
        if let Some(username) = &self.inner.username {
            if let Err(e) = self.inner.client.logout(username).await {
                warn!(error = %e, "logout failed (non-fatal)");
            }
        }
        self.inner.session.send_replace(SessionState::Disconnected);
        debug!("disconnected");
    }

    /// Renew the session token.
    pub async fn refresh_session(&self) -> Result<(), CoreError> {
        let info = self.client()?.refresh().await?;
        debug!(refresh_timeout_secs = ?info.refresh_timeout_secs, "session refreshed");
        Ok(())
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// Connect, run closure, disconnect.
    pub async fn oneshot<F, Fut, T>(config: FabricConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Fabric) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let fabric = Fabric::connect(config).await?;
        let result = f(fabric.clone()).await;
        fabric.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to session state changes.
    pub fn session_state(&self) -> watch::Receiver<SessionState> {
        self.inner.session.subscribe()
    }

    pub fn is_connected(&self) -> bool {
        *self.inner.session.borrow() == SessionState::Connected
    }

    pub fn max_pods(&self) -> u8 {
        self.max_pods
    }

    /// The client, provided the session is still open.
    pub(crate) fn client(&self) -> Result<&ApicClient, CoreError> {
        if self.is_connected() {
            Ok(&self.inner.client)
        } else {
            Err(CoreError::NotConnected)
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn build_transport(config: &FabricConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        cookie_jar: None, // ApicClient::new adds one automatically
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
