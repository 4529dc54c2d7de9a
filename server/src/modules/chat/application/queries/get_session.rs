use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{Session, SessionId};
use crate::modules::chat::ports::SessionStore;

/// 获取会话查询
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

impl GetSessionQuery {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }
}

/// 获取会话查询响应（不存在不算错误）
#[derive(Debug, Clone)]
pub struct GetSessionResponse {
    pub session: Option<Session>,
}

/// 获取会话查询处理器
pub struct GetSessionHandler {
    session_store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }
}

#[async_trait]
impl QueryHandler<GetSessionQuery, GetSessionResponse> for GetSessionHandler {
    async fn handle(&self, query: GetSessionQuery) -> Result<GetSessionResponse, ApplicationError> {
        let session = self.session_store.get(&query.session_id).await?;
        Ok(GetSessionResponse { session })
    }
}
