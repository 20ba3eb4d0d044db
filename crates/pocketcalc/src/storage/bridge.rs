//! Asynchronous host bridge
//!
//! Some shells keep storage on the host side of a message channel (an
//! embedded web view talking to its native wrapper, for example). The
//! [`HostBridge`] trait is that contract; [`ChannelBridge`] implements it by
//! sending requests over a tokio channel to a [`LocalHost`] task that owns a
//! [`KeyValueStore`].
//!
//! ```text
//! RemoteValue ──► ChannelBridge ──mpsc──► LocalHost ──► KeyValueStore
//!                       ▲                     │
//!                       └──────oneshot────────┘
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::persisted::{decode, encode};
use super::{KeyValueStore, StorageError, StorageResult};

/// What the host reports about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    /// Host application version
    pub version: String,
    /// Platform name (`linux`, `ios`, `web`, ...)
    pub platform: String,
    /// Whether the page runs inside an embedded web view
    pub is_web_view: bool,
    /// Whether the host serves the page itself
    pub has_local_server: bool,
    /// Whether a bridge is available at all
    pub has_bridge: bool,
}

impl Default for HostInfo {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: std::env::consts::OS.to_string(),
            is_web_view: false,
            has_local_server: false,
            has_bridge: true,
        }
    }
}

/// Storage and logging services offered by the host
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Value stored under `key`, if any
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`
    async fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Removes every key
    async fn clear(&self) -> StorageResult<()>;

    /// Writes a line to the host log
    async fn log_message(&self, message: &str) -> StorageResult<()>;

    /// Describes the host
    async fn host_info(&self) -> StorageResult<HostInfo>;
}

#[derive(Debug)]
enum HostRequest {
    GetItem {
        key: String,
        reply: oneshot::Sender<StorageResult<Option<String>>>,
    },
    SetItem {
        key: String,
        value: String,
        reply: oneshot::Sender<StorageResult<()>>,
    },
    RemoveItem {
        key: String,
        reply: oneshot::Sender<StorageResult<()>>,
    },
    Clear {
        reply: oneshot::Sender<StorageResult<()>>,
    },
    LogMessage {
        message: String,
        reply: oneshot::Sender<()>,
    },
    HostInfo {
        reply: oneshot::Sender<HostInfo>,
    },
}

/// Bridge that forwards every call to a host task over a channel
///
/// Cheap to clone; the host task stops once every clone is dropped.
#[derive(Debug, Clone)]
pub struct ChannelBridge {
    requests: mpsc::UnboundedSender<HostRequest>,
}

impl ChannelBridge {
    /// Spawns a [`LocalHost`] over `store` and returns a bridge to it
    ///
    /// The join handle yields the store back when the host stops.
    pub fn spawn<S>(store: S) -> (Self, JoinHandle<S>)
    where
        S: KeyValueStore + Send + 'static,
    {
        LocalHost::new(store).spawn()
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(oneshot::Sender<R>) -> HostRequest,
    ) -> StorageResult<R> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(request(reply))
            .map_err(|_| StorageError::BridgeClosed)?;
        response.await.map_err(|_| StorageError::BridgeClosed)
    }
}

#[async_trait]
impl HostBridge for ChannelBridge {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let key = key.to_string();
        self.call(|reply| HostRequest::GetItem { key, reply }).await?
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.call(|reply| HostRequest::SetItem { key, value, reply })
            .await?
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        let key = key.to_string();
        self.call(|reply| HostRequest::RemoveItem { key, reply })
            .await?
    }

    async fn clear(&self) -> StorageResult<()> {
        self.call(|reply| HostRequest::Clear { reply }).await?
    }

    async fn log_message(&self, message: &str) -> StorageResult<()> {
        let message = message.to_string();
        self.call(|reply| HostRequest::LogMessage { message, reply })
            .await
    }

    async fn host_info(&self) -> StorageResult<HostInfo> {
        self.call(|reply| HostRequest::HostInfo { reply }).await
    }
}

/// Host side of a [`ChannelBridge`]: serves requests from a store
#[derive(Debug)]
pub struct LocalHost<S> {
    store: S,
    info: HostInfo,
}

impl<S> LocalHost<S>
where
    S: KeyValueStore + Send + 'static,
{
    /// Creates a host over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            info: HostInfo::default(),
        }
    }

    /// Overrides the reported host info
    #[must_use]
    pub fn with_info(mut self, info: HostInfo) -> Self {
        self.info = info;
        self
    }

    /// Starts serving on a tokio task
    pub fn spawn(self) -> (ChannelBridge, JoinHandle<S>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.serve(receiver));
        (ChannelBridge { requests }, handle)
    }

    async fn serve(mut self, mut receiver: mpsc::UnboundedReceiver<HostRequest>) -> S {
        debug!("host bridge started");
        while let Some(request) = receiver.recv().await {
            self.handle(request);
        }
        debug!("host bridge stopped");
        self.store
    }

    fn handle(&mut self, request: HostRequest) {
        // A dropped reply receiver only means the caller gave up waiting
        match request {
            HostRequest::GetItem { key, reply } => {
                debug!(%key, "bridge get");
                let _ = reply.send(self.store.get(&key));
            }
            HostRequest::SetItem { key, value, reply } => {
                debug!(%key, bytes = value.len(), "bridge set");
                let _ = reply.send(self.store.set(&key, &value));
            }
            HostRequest::RemoveItem { key, reply } => {
                debug!(%key, "bridge remove");
                let _ = reply.send(self.store.remove(&key));
            }
            HostRequest::Clear { reply } => {
                debug!("bridge clear");
                let _ = reply.send(self.store.clear());
            }
            HostRequest::LogMessage { message, reply } => {
                info!(target: "pocketcalc::host", "{message}");
                let _ = reply.send(());
            }
            HostRequest::HostInfo { reply } => {
                let _ = reply.send(self.info.clone());
            }
        }
    }
}

/// A value of type `T` kept under one key on the far side of a bridge
///
/// Starts out holding the initial value and flagged as loading until
/// [`load`](Self::load) completes. Failures are remembered in
/// [`error`](Self::error) and cleared by the next successful call.
#[derive(Debug)]
pub struct RemoteValue<T, B> {
    bridge: B,
    key: String,
    initial: Option<T>,
    value: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T, B> RemoteValue<T, B>
where
    T: Serialize + DeserializeOwned + Clone,
    B: HostBridge,
{
    /// Binds `key` on `bridge`
    pub fn new(bridge: B, key: impl Into<String>, initial: Option<T>) -> Self {
        Self {
            bridge,
            key: key.into(),
            value: initial.clone(),
            initial,
            loading: true,
            error: None,
        }
    }

    /// Storage key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// True until the first [`load`](Self::load) finishes
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failure, if the last call failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches the stored value; falls back to the initial value
    pub async fn load(&mut self) -> Option<&T> {
        self.loading = true;
        self.error = None;

        self.value = match self.bridge.get_item(&self.key).await {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(
                        key = %self.key,
                        error = %e,
                        "stored value unreadable, using initial value"
                    );
                    self.initial.clone()
                }
            },
            Ok(None) => self.initial.clone(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to load stored value");
                self.error = Some(e.to_string());
                self.initial.clone()
            }
        };

        self.loading = false;
        self.value.as_ref()
    }

    /// Stores `value`, or removes the key for `None`
    ///
    /// # Errors
    ///
    /// Returns the bridge error; the local value is left unchanged.
    pub async fn update(&mut self, value: Option<T>) -> StorageResult<()> {
        self.error = None;

        let result = match &value {
            Some(v) => match encode(v) {
                Ok(raw) => self.bridge.set_item(&self.key, &raw).await,
                Err(e) => Err(e),
            },
            None => self.bridge.remove_item(&self.key).await,
        };

        match result {
            Ok(()) => {
                debug!(key = %self.key, removed = value.is_none(), "updated stored value");
                self.value = value;
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to update stored value");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
