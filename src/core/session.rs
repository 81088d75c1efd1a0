// src/core/session.rs — Ensure-exists bookkeeping for client sessions

use crate::infra::errors::TinctureError;
use crate::store::StoreHandle;

/// Records each session identifier once, along with the IP it first arrived from.
#[derive(Clone)]
pub struct SessionStore {
    store: StoreHandle,
}

impl SessionStore {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Create the session if it is unknown. Existing sessions are never touched.
    ///
    /// Store failures propagate unchanged: later writes reference the session,
    /// so a request cannot continue without it.
    pub async fn ensure_session(
        &self,
        session_id: &str,
        client_ip: Option<&str>,
    ) -> Result<(), TinctureError> {
        let created = self
            .store
            .ensure_session(session_id.to_string(), client_ip.map(str::to_string))
            .await
            .map_err(TinctureError::Store)?;

        if created {
            tracing::debug!(session_id, ip = client_ip.unwrap_or("unknown"), "Session created");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    #[tokio::test]
    async fn test_first_ip_is_kept() {
        let (handle, _join) = store::spawn_store_server(store::in_memory().unwrap());
        let sessions = SessionStore::new(handle.clone());

        sessions.ensure_session("abc", Some("10.0.0.1")).await.unwrap();
        sessions.ensure_session("abc", Some("10.0.0.2")).await.unwrap();

        let row = handle.find_session("abc".into()).await.unwrap().unwrap();
        assert_eq!(row.ip_address.as_deref(), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_unknown_ip_recorded_as_null() {
        let (handle, _join) = store::spawn_store_server(store::in_memory().unwrap());
        let sessions = SessionStore::new(handle.clone());

        sessions.ensure_session("no-ip", None).await.unwrap();

        let row = handle.find_session("no-ip".into()).await.unwrap().unwrap();
        assert!(row.ip_address.is_none());
    }

    #[tokio::test]
    async fn test_timestamp_not_refreshed() {
        let (handle, _join) = store::spawn_store_server(store::in_memory().unwrap());
        let sessions = SessionStore::new(handle.clone());

        sessions.ensure_session("s", None).await.unwrap();
        let first = handle.find_session("s".into()).await.unwrap().unwrap();
        sessions.ensure_session("s", Some("1.2.3.4")).await.unwrap();
        let second = handle.find_session("s".into()).await.unwrap().unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert!(second.ip_address.is_none());
    }
}
