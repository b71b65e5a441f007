//! In-memory session store.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};

use jiff::Timestamp;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;

use crate::domain::sessions::models::{Session, SessionId};

#[derive(Debug)]
struct SessionSlot {
    session: Arc<Mutex<Session>>,
    last_seen_ms: AtomicI64,
}

impl SessionSlot {
    fn new(now: Timestamp) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            last_seen_ms: AtomicI64::new(now.as_millisecond()),
        }
    }

    fn touch(&self, now: Timestamp) {
        self.last_seen_ms
            .fetch_max(now.as_millisecond(), Ordering::Relaxed);
    }

    fn idle_ms(&self, now: Timestamp) -> i64 {
        now.as_millisecond()
            .saturating_sub(self.last_seen_ms.load(Ordering::Relaxed))
    }
}

/// Sessions keyed by their client-held identifier.
///
/// Each session sits behind its own mutex: holding the guard returned by
/// [`SessionStore::lock`] serializes every read-modify-write of that session's
/// cart, while different sessions never contend. Sessions idle for longer than
/// the configured timeout are discarded.
#[derive(Debug)]
pub struct SessionStore {
    slots: RwLock<HashMap<SessionId, Arc<SessionSlot>>>,
    idle_timeout_ms: i64,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            idle_timeout_ms: i64::try_from(idle_timeout.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// Return the presented session if it is still live, otherwise start a new one.
    pub async fn resolve(&self, presented: Option<SessionId>) -> SessionId {
        self.resolve_at(presented, Timestamp::now()).await
    }

    /// [`SessionStore::resolve`] against an explicit clock reading.
    pub async fn resolve_at(&self, presented: Option<SessionId>, now: Timestamp) -> SessionId {
        if let Some(id) = presented {
            let slots = self.slots.read().await;

            if let Some(slot) = slots.get(&id)
                && !self.is_expired(slot, now)
            {
                slot.touch(now);

                return id;
            }
        }

        let mut slots = self.slots.write().await;

        if let Some(id) = presented
            && let Some(slot) = slots.get(&id)
        {
            if !self.is_expired(slot, now) {
                slot.touch(now);

                return id;
            }

            slots.remove(&id);

            debug!(session = %id, "session expired");
        }

        let id = SessionId::new_random();

        slots.insert(id, Arc::new(SessionSlot::new(now)));

        debug!(session = %id, "session started");

        id
    }

    /// Lock a session for exclusive use, creating it if it does not exist.
    ///
    /// Locking counts as activity, and a locked session is never purged.
    pub async fn lock(&self, id: SessionId) -> OwnedMutexGuard<Session> {
        let now = Timestamp::now();
        let existing = self.slots.read().await.get(&id).cloned();

        let slot = match existing {
            Some(slot) => {
                slot.touch(now);

                slot
            }
            None => self
                .slots
                .write()
                .await
                .entry(id)
                .or_insert_with(|| Arc::new(SessionSlot::new(now)))
                .clone(),
        };

        Arc::clone(&slot.session).lock_owned().await
    }

    /// Drop every session idle for longer than the timeout.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Timestamp::now()).await
    }

    /// [`SessionStore::purge_expired`] against an explicit clock reading.
    pub async fn purge_expired_at(&self, now: Timestamp) -> usize {
        let mut slots = self.slots.write().await;
        let before = slots.len();

        // A held guard keeps its own reference to the session.
        slots.retain(|_, slot| {
            Arc::strong_count(&slot.session) > 1 || !self.is_expired(slot, now)
        });

        before - slots.len()
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }

    fn is_expired(&self, slot: &SessionSlot, now: Timestamp) -> bool {
        slot.idle_ms(now) > self.idle_timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::domain::catalog::models::ProductId;

    use super::*;

    const HOUR: Duration = Duration::from_secs(3_600);

    #[tokio::test]
    async fn resolving_nothing_starts_a_session() {
        let store = SessionStore::new(HOUR);

        let id = store.resolve(None).await;

        assert_eq!(store.len().await, 1);
        assert!(store.lock(id).await.cart.is_empty());
    }

    #[tokio::test]
    async fn live_sessions_are_reused() {
        let store = SessionStore::new(HOUR);

        let id = store.resolve(None).await;

        assert_eq!(store.resolve(Some(id)).await, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_ids_get_a_fresh_session() {
        let store = SessionStore::new(HOUR);
        let forged = SessionId::new_random();

        let id = store.resolve(Some(forged)).await;

        assert_ne!(id, forged);
    }

    #[tokio::test]
    async fn cart_state_persists_between_locks() {
        let store = SessionStore::new(HOUR);
        let id = store.resolve(None).await;

        store.lock(id).await.cart.add(ProductId::new(1));
        store.lock(id).await.cart.add(ProductId::new(1));

        assert_eq!(store.lock(id).await.cart.quantity(ProductId::new(1)), Some(2));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new(HOUR);
        let first = store.resolve(None).await;
        let second = store.resolve(None).await;

        store.lock(first).await.cart.add(ProductId::new(1));

        assert!(store.lock(second).await.cart.is_empty());
    }

    #[tokio::test]
    async fn idle_sessions_expire_on_resolve() -> TestResult {
        let store = SessionStore::new(HOUR);
        let start = Timestamp::now();

        let id = store.resolve_at(None, start).await;

        store.lock(id).await.cart.add(ProductId::new(1));

        let later = start.checked_add(SignedDuration::from_secs(3_601))?;

        let replacement = store.resolve_at(Some(id), later).await;

        assert_ne!(replacement, id);
        assert!(store.lock(replacement).await.cart.is_empty());
        assert_eq!(store.len().await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn activity_keeps_sessions_alive() -> TestResult {
        let store = SessionStore::new(HOUR);
        let start = Timestamp::now();

        let id = store.resolve_at(None, start).await;

        let halfway = start.checked_add(SignedDuration::from_secs(1_800))?;
        let later = start.checked_add(SignedDuration::from_secs(3_601))?;

        assert_eq!(store.resolve_at(Some(id), halfway).await, id);
        assert_eq!(store.resolve_at(Some(id), later).await, id);

        Ok(())
    }

    #[tokio::test]
    async fn purge_drops_only_idle_sessions() -> TestResult {
        let store = SessionStore::new(HOUR);
        let start = Timestamp::now();

        let stale = store.resolve_at(None, start).await;

        let later = start.checked_add(SignedDuration::from_secs(3_000))?;
        let fresh = store.resolve_at(None, later).await;

        let purge_at = start.checked_add(SignedDuration::from_secs(3_700))?;

        assert_eq!(store.purge_expired_at(purge_at).await, 1);
        assert_eq!(store.resolve_at(Some(fresh), purge_at).await, fresh);
        assert_ne!(store.resolve_at(Some(stale), purge_at).await, stale);

        Ok(())
    }

    #[tokio::test]
    async fn locking_counts_as_activity() -> TestResult {
        let store = SessionStore::new(HOUR);
        let now = Timestamp::now();

        let id = store
            .resolve_at(None, now.checked_sub(SignedDuration::from_secs(3_500))?)
            .await;

        store.lock(id).await.cart.add(ProductId::new(1));

        let purge_at = now.checked_add(SignedDuration::from_secs(300))?;

        assert_eq!(store.purge_expired_at(purge_at).await, 0);
        assert_eq!(store.lock(id).await.cart.quantity(ProductId::new(1)), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn purge_skips_locked_sessions() -> TestResult {
        let store = SessionStore::new(HOUR);
        let start = Timestamp::now();

        let id = store.resolve_at(None, start).await;
        let purge_at = start.checked_add(SignedDuration::from_secs(7_200))?;

        let mut session = store.lock(id).await;

        session.cart.add(ProductId::new(2));

        assert_eq!(store.purge_expired_at(purge_at).await, 0);
        assert_eq!(store.len().await, 1);

        drop(session);

        assert_eq!(store.purge_expired_at(purge_at).await, 1);
        assert!(store.is_empty().await);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_are_not_lost() -> TestResult {
        let store = Arc::new(SessionStore::new(HOUR));
        let id = store.resolve(None).await;

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);

                tokio::spawn(async move {
                    let mut session = store.lock(id).await;

                    tokio::task::yield_now().await;

                    session.cart.add(ProductId::new(1));
                })
            })
            .collect();

        for task in tasks {
            task.await?;
        }

        assert_eq!(store.lock(id).await.cart.quantity(ProductId::new(1)), Some(50));

        Ok(())
    }
}
