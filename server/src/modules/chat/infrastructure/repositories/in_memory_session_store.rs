use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::modules::chat::domain::{Session, SessionId};
use crate::modules::chat::ports::{SessionStore, StoreError};

/// 内存会话存储
///
/// 用于测试，以及文件存储初始化失败时的降级方案
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        let sessions = self.sessions.read().await;

        // 按更新时间排序（最新的在前）
        let mut all: Vec<Session> = sessions.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));

        Ok(all)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::Message;

    #[tokio::test]
    async fn test_save_and_get() {
        let store = InMemorySessionStore::new();
        let session = Session::new(Some(Message::new_user("Test")));
        let id = session.id().clone();

        store.save(&session).await.unwrap();
        let retrieved = store.get(&id).await.unwrap();

        assert_eq!(retrieved, Some(session));
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = InMemorySessionStore::new();
        let retrieved = store.get(&SessionId::new()).await.unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let store = InMemorySessionStore::new();
        let session = Session::new(None);
        store.save(&session).await.unwrap();

        store.delete(&SessionId::from("missing")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_order() {
        let store = InMemorySessionStore::new();

        let older = Session::new(Some(Message::new_user("older")));
        store.save(&older).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let newer = Session::new(Some(Message::new_user("newer")));
        store.save(&newer).await.unwrap();

        let sessions = store.list().await.unwrap();
        assert_eq!(sessions[0].title(), "newer");
    }
}
