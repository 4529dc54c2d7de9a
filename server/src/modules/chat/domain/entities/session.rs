use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::super::value_objects::SessionId;
use super::{Message, MessageRole};

/// 标题最大长度（取自首条用户消息的前 50 个字符）
pub const TITLE_MAX_CHARS: usize = 50;

/// 新会话的默认标题
pub const DEFAULT_TITLE: &str = "New Chat";

/// 会话实体 - 聚合根
///
/// Session 是 Chat 模块的聚合根，整个会话作为一份文档持久化，
/// 消息序列从编排器视角只允许追加（编辑最后一条用户消息的
/// 工作流除外，它会先截断序列再重新追加）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// 会话唯一标识，创建后不可变
    id: SessionId,
    /// 会话标题
    title: String,
    /// 消息序列，顺序即对话顺序
    messages: Vec<Message>,
    /// 创建时间（epoch 毫秒）
    created_at: i64,
    /// 更新时间（epoch 毫秒），每次变更都会刷新
    updated_at: i64,
}

impl Session {
    /// 创建新会话
    ///
    /// 有首条消息时标题取其内容前 50 个字符，否则使用默认标题
    pub fn new(first_message: Option<Message>) -> Self {
        let now = Utc::now().timestamp_millis();
        let title = first_message
            .as_ref()
            .map(|m| derive_title(m.content()))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Self {
            id: SessionId::new(),
            title,
            messages: first_message.into_iter().collect(),
            created_at: now,
            updated_at: now,
        }
    }

    // Getters
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// 展示层可见的消息（系统消息仅存储，不外发）
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_system())
    }

    // 业务方法

    /// 追加消息
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    /// 重命名会话
    pub fn rename(&mut self, new_title: impl Into<String>) {
        self.title = new_title.into();
        self.touch();
    }

    /// 设置标题（首轮交互成功后用原始用户输入覆盖占位标题）
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = derive_title(&title.into());
        self.touch();
    }

    /// 截断消息序列：移除 index 位置及其之后的所有消息
    pub fn truncate_from(&mut self, index: usize) {
        self.messages.truncate(index);
        self.touch();
    }

    /// 最后一条用户消息的下标
    pub fn last_user_index(&self) -> Option<usize> {
        self.messages.iter().rposition(|m| m.role() == MessageRole::User)
    }

    /// 更新修改时间
    fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp_millis();
    }
}

/// 从消息内容派生标题（前 50 个字符）
pub fn derive_title(content: &str) -> String {
    content.chars().take(TITLE_MAX_CHARS).collect()
}
