use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{Message, ModelProvider};

/// 提供商调用失败
///
/// 传输、认证或响应格式错误统一折叠为这一种条件，
/// 携带提供商侧的可读信息原样上抛，编排器不解读具体错误码
#[derive(Debug, Clone, Error)]
#[error("Provider call failed: {0}")]
pub struct ProviderCallFailed(pub String);

/// LLM 服务端口 - 核心抽象接口
///
/// 每个提供商一个适配器实例，进程启动时显式构造并注入，
/// 负责把抽象消息序列映射为提供商请求并把响应映射回助手消息
#[async_trait]
pub trait LLMPort: Send + Sync {
    /// 适配器所属的提供商标签
    fn provider(&self) -> ModelProvider;

    /// 单次补全请求
    ///
    /// 消息序列中除最后一条外均视为历史轮次，最后一条是待回答的新轮次。
    /// 成功时返回 assistant 角色的消息（提供商无文本输出时内容为空串）
    async fn complete(&self, messages: &[Message], model: &str)
        -> Result<Message, ProviderCallFailed>;
}
