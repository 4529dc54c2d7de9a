use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Session, SessionId};
use crate::modules::chat::ports::SessionStore;

/// 重命名会话命令
#[derive(Debug, Clone)]
pub struct RenameSessionCommand {
    pub session_id: SessionId,
    pub title: String,
}

impl RenameSessionCommand {
    pub fn new(session_id: SessionId, title: impl Into<String>) -> Self {
        Self {
            session_id,
            title: title.into(),
        }
    }
}

/// 重命名会话响应
#[derive(Debug, Clone)]
pub struct RenameSessionResponse {
    pub session: Session,
}

/// 重命名会话命令处理器
pub struct RenameSessionHandler {
    session_store: Arc<dyn SessionStore>,
}

impl RenameSessionHandler {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }
}

#[async_trait]
impl CommandHandler<RenameSessionCommand, RenameSessionResponse> for RenameSessionHandler {
    async fn handle(
        &self,
        command: RenameSessionCommand,
    ) -> Result<RenameSessionResponse, ApplicationError> {
        if command.title.trim().is_empty() {
            return Err(ApplicationError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }

        let mut session = self
            .session_store
            .get(&command.session_id)
            .await?
            .ok_or_else(|| ApplicationError::SessionNotFound(command.session_id.to_string()))?;

        session.rename(command.title);
        self.session_store.save(&session).await?;

        Ok(RenameSessionResponse { session })
    }
}
