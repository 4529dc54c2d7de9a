use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// 用户消息
    User,
    /// AI 助手消息
    Assistant,
    /// 系统消息（仅存储，不发送给展示层）
    System,
}

impl MessageRole {
    /// 转换为 OpenAI 格式的角色名
    pub fn to_openai_role(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }

    /// 转换为 Gemini 格式的角色名
    ///
    /// Gemini 的对话历史只接受 user/model 两种角色，
    /// assistant 映射为 model，其余一律映射为 user
    pub fn to_gemini_role(&self) -> &'static str {
        match self {
            MessageRole::Assistant => "model",
            MessageRole::User | MessageRole::System => "user",
        }
    }
}

/// 消息实体
///
/// 属于 Session 聚合，追加后不可变，顺序即对话顺序
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// 消息角色
    role: MessageRole,
    /// 消息内容
    content: String,
    /// 创建时间（epoch 毫秒）
    timestamp: i64,
}

impl Message {
    /// 创建指定角色的消息
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// 创建用户消息
    pub fn new_user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// 创建助手消息
    pub fn new_assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// 创建系统消息
    pub fn new_system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    // Getters
    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// 是否为用户消息
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// 是否为系统消息
    pub fn is_system(&self) -> bool {
        self.role == MessageRole::System
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_message() {
        let msg = Message::new_user("Hello, AI!");

        assert_eq!(msg.role(), MessageRole::User);
        assert_eq!(msg.content(), "Hello, AI!");
        assert!(msg.timestamp() > 0);
    }

    #[test]
    fn test_role_serialization() {
        let msg = Message::new_assistant("Hi");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "Hi");
        assert!(json["timestamp"].is_i64());
    }

    #[test]
    fn test_gemini_role_mapping() {
        assert_eq!(MessageRole::Assistant.to_gemini_role(), "model");
        assert_eq!(MessageRole::User.to_gemini_role(), "user");
        assert_eq!(MessageRole::System.to_gemini_role(), "user");
    }
}
