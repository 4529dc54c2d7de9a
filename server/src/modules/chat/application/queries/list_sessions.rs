use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::Session;
use crate::modules::chat::ports::SessionStore;

/// 列出会话查询
#[derive(Debug, Clone, Default)]
pub struct ListSessionsQuery;

/// 列出会话响应
#[derive(Debug, Clone)]
pub struct ListSessionsResponse {
    /// 全部会话，按更新时间倒序
    pub sessions: Vec<Session>,
}

/// 列出会话查询处理器
pub struct ListSessionsHandler {
    session_store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }
}

#[async_trait]
impl QueryHandler<ListSessionsQuery, ListSessionsResponse> for ListSessionsHandler {
    async fn handle(
        &self,
        _query: ListSessionsQuery,
    ) -> Result<ListSessionsResponse, ApplicationError> {
        let sessions = self.session_store.list().await?;
        Ok(ListSessionsResponse { sessions })
    }
}
