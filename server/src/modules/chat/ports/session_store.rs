use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{Session, SessionId};

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// 会话存储端口
///
/// 以会话 ID 为键的文档级 CRUD 抽象。
/// 每个会话一份文档：单次损坏的写入只影响一个对话，
/// 互不相关的会话保存时也不会相互争用
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 列出全部会话，按更新时间倒序（最新的在前）
    async fn list(&self) -> Result<Vec<Session>, StoreError>;

    /// 根据 ID 获取会话，不存在不算错误
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// 保存会话（upsert 语义，整份文档覆盖写入，不做局部合并）
    async fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// 删除会话，删除不存在的 ID 视为成功
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;
}
