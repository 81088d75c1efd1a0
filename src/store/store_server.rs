// src/store/store_server.rs — Async message passing for Store

use crate::store::store::{ColorRequestRow, NewColorRequest, RecentRequestRow, SessionRow, Store};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum StoreCommand {
    EnsureSession {
        id: String,
        ip_address: Option<String>,
        resp: oneshot::Sender<anyhow::Result<bool>>,
    },
    FindSession {
        id: String,
        resp: oneshot::Sender<anyhow::Result<Option<SessionRow>>>,
    },
    InsertColorRequest {
        session_id: String,
        input_text: String,
        normalized_text: String,
        hex_color: String,
        raw_output: String,
        imagery: Option<String>,
        resp: oneshot::Sender<anyhow::Result<i64>>,
    },
    FindLatestColorRequest {
        normalized_text: String,
        resp: oneshot::Sender<anyhow::Result<Option<ColorRequestRow>>>,
    },
    QueryRecentRequests {
        limit: u32,
        resp: oneshot::Sender<anyhow::Result<Vec<RecentRequestRow>>>,
    },
}

/// A handle to the Store that uses message passing.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    pub fn new(tx: mpsc::Sender<StoreCommand>) -> Self {
        Self { tx }
    }

    pub async fn ensure_session(
        &self,
        id: String,
        ip_address: Option<String>,
    ) -> anyhow::Result<bool> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::EnsureSession {
                id,
                ip_address,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn find_session(&self, id: String) -> anyhow::Result<Option<SessionRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::FindSession { id, resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    pub async fn insert_color_request(
        &self,
        session_id: String,
        input_text: String,
        normalized_text: String,
        hex_color: String,
        raw_output: String,
        imagery: Option<String>,
    ) -> anyhow::Result<i64> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::InsertColorRequest {
                session_id,
                input_text,
                normalized_text,
                hex_color,
                raw_output,
                imagery,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn find_latest_color_request(
        &self,
        normalized_text: String,
    ) -> anyhow::Result<Option<ColorRequestRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::FindLatestColorRequest {
                normalized_text,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn query_recent_requests(&self, limit: u32) -> anyhow::Result<Vec<RecentRequestRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::QueryRecentRequests {
                limit,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }
}

/// Helper to spawn the store server and return a handle.
pub fn spawn_store_server(store: Store) -> (StoreHandle, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(100);
    let handle = StoreHandle::new(tx);
    let join_handle = tokio::spawn(run_store_server(store, rx));
    (handle, join_handle)
}

/// The background task that owns the Store.
pub async fn run_store_server(store: Store, mut rx: mpsc::Receiver<StoreCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::EnsureSession {
                id,
                ip_address,
                resp,
            } => {
                let res = store.ensure_session(&id, ip_address.as_deref());
                let _ = resp.send(res);
            }
            StoreCommand::FindSession { id, resp } => {
                let res = store.find_session(&id);
                let _ = resp.send(res);
            }
            StoreCommand::InsertColorRequest {
                session_id,
                input_text,
                normalized_text,
                hex_color,
                raw_output,
                imagery,
                resp,
            } => {
                let res = store.insert_color_request(&NewColorRequest {
                    session_id: &session_id,
                    input_text: &input_text,
                    normalized_text: &normalized_text,
                    hex_color: &hex_color,
                    raw_output: &raw_output,
                    imagery: imagery.as_deref(),
                });
                let _ = resp.send(res);
            }
            StoreCommand::FindLatestColorRequest {
                normalized_text,
                resp,
            } => {
                let res = store.find_latest_color_request(&normalized_text);
                let _ = resp.send(res);
            }
            StoreCommand::QueryRecentRequests { limit, resp } => {
                let res = store.query_recent_requests(limit);
                let _ = resp.send(res);
            }
        }
    }
}
