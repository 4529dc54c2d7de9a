use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Message, Session, SessionId};
use crate::modules::chat::infrastructure::LLMAdapterRegistry;
use crate::modules::chat::ports::{ProviderCallFailed, SessionStore};

/// 发送消息命令
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// 当前会话 ID，为空时创建新会话
    pub session_id: Option<SessionId>,
    /// 用户输入的原始文本
    pub content: String,
    /// 可选的系统提示前缀
    pub system_prompt: Option<String>,
    /// 模型标识符
    pub model: String,
}

impl SendMessageCommand {
    pub fn new(
        session_id: Option<SessionId>,
        content: impl Into<String>,
        system_prompt: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            content: content.into(),
            system_prompt,
            model: model.into(),
        }
    }
}

/// 发送消息响应
#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    /// 变更后的完整会话
    pub session: Session,
    /// 助手回复
    pub assistant_message: Message,
}

/// 组合系统提示前缀与用户输入
///
/// 前缀为空时直接使用原始输入，不产生悬空的 ". " 前缀
pub(crate) fn compose_prompt(system_prompt: Option<&str>, content: &str) -> String {
    match system_prompt {
        Some(prefix) if !prefix.trim().is_empty() => format!("{}. {}", prefix, content),
        _ => content.to_string(),
    }
}

/// 发送消息命令处理器
///
/// 单次发送的状态机：Idle → Sending → {Succeeded, Failed}。
/// 用户消息在提供商调用开始前即已落盘，调用失败不会丢失用户输入
pub struct SendMessageHandler {
    session_store: Arc<dyn SessionStore>,
    llm_registry: Arc<LLMAdapterRegistry>,
}

impl SendMessageHandler {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        llm_registry: Arc<LLMAdapterRegistry>,
    ) -> Self {
        Self {
            session_store,
            llm_registry,
        }
    }
}

#[async_trait]
impl CommandHandler<SendMessageCommand, SendMessageResponse> for SendMessageHandler {
    async fn handle(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResponse, ApplicationError> {
        // 验证输入
        if command.content.trim().is_empty() {
            return Err(ApplicationError::ValidationError(
                "Message content cannot be empty".to_string(),
            ));
        }

        let composed = compose_prompt(command.system_prompt.as_deref(), &command.content);
        let user_message = Message::new_user(composed);

        // Idle → Sending：无活动会话时新建（标题取组合文本前 50 字符），
        // 否则向现有会话追加用户消息
        let mut session = match &command.session_id {
            None => Session::new(Some(user_message)),
            Some(id) => {
                let mut session = self
                    .session_store
                    .get(id)
                    .await?
                    .ok_or_else(|| ApplicationError::SessionNotFound(id.to_string()))?;
                session.push_message(user_message);
                session
            }
        };

        // 用户消息先于提供商调用持久化
        self.session_store.save(&session).await?;

        // 首轮交互判定：调用前恰好只有这一条用户消息
        let first_exchange = session.message_count() == 1;

        let adapter = self.llm_registry.resolve(&command.model).ok_or_else(|| {
            ProviderCallFailed(format!(
                "no adapter registered for model {}",
                command.model
            ))
        })?;

        // Sending：唯一的挂起点。失败则不再写入，已保存的用户消息保持可见
        let assistant_message = adapter.complete(session.messages(), &command.model).await?;

        // Sending → Succeeded：追加回复；首轮交互成功后用原始输入覆盖占位标题
        session.push_message(assistant_message.clone());
        if first_exchange {
            session.set_title(command.content.clone());
        }
        self.session_store.save(&session).await?;

        Ok(SendMessageResponse {
            session,
            assistant_message,
        })
    }
}
