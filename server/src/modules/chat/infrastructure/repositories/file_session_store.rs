// 文件持久化会话存储实现
//
// 每个会话一份 JSON 文档（<data_dir>/<id>.json），
// 整份文档覆盖写入，读取时逐份解析

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::modules::chat::domain::{Session, SessionId};
use crate::modules::chat::ports::{SessionStore, StoreError};

/// 文件会话存储
pub struct FileSessionStore {
    data_dir: PathBuf,
}

impl FileSessionStore {
    /// 创建新的文件会话存储
    ///
    /// # Arguments
    /// * `data_dir` - 会话文档目录，不存在时自动创建
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();

        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self { data_dir })
    }

    /// 会话文档路径
    fn session_path(&self, id: &SessionId) -> PathBuf {
        self.data_dir.join(format!("{}.json", id))
    }

    /// 读取并解析单份会话文档
    async fn read_session(path: &Path) -> Result<Session, StoreError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        let mut entries = fs::read_dir(&self.data_dir)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut sessions = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            // 单份文档损坏只影响一个对话，跳过而不让整个枚举失败
            match Self::read_session(&path).await {
                Ok(session) => sessions.push(session),
                Err(e) => warn!("Skipping unreadable session document {:?}: {}", path, e),
            }
        }

        // 按更新时间排序（最新的在前）
        sessions.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));

        Ok(sessions)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let path = self.session_path(id);
        if !path.exists() {
            return Ok(None);
        }

        Self::read_session(&path).await.map(Some)
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(session)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        fs::write(self.session_path(session.id()), content)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        match fs::remove_file(self.session_path(id)).await {
            Ok(()) => Ok(()),
            // 删除不存在的会话视为成功
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }
}
