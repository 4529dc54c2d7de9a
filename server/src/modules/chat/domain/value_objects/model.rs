use serde::{Deserialize, Serialize};

/// LLM 提供商标签
///
/// 封闭集合：每个标签绑定一个适配器实例，
/// 分发由路由表的前缀匹配决定，而非运行时类型判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAI,
    Gemini,
}

/// 模型配置
///
/// 静态注册表条目，运行期不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// 提供商侧的模型标识符
    pub value: String,
    /// 展示名称
    pub label: String,
    /// 所属提供商
    pub provider: ModelProvider,
}

impl ModelConfig {
    fn new(value: &str, label: &str, provider: ModelProvider) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            provider,
        }
    }
}

/// 内置模型注册表
pub fn model_registry() -> Vec<ModelConfig> {
    vec![
        ModelConfig::new("gpt-4.1-mini", "GPT-4.1 Mini", ModelProvider::OpenAI),
        ModelConfig::new("gpt-4.1", "GPT-4.1", ModelProvider::OpenAI),
        ModelConfig::new("gpt-5-mini", "GPT-5 Mini", ModelProvider::OpenAI),
        ModelConfig::new("gpt-5-nano", "GPT-5 Nano", ModelProvider::OpenAI),
        ModelConfig::new("gemini-2.0-flash", "Gemini 2.0 Flash", ModelProvider::Gemini),
        ModelConfig::new("gemini-3-flash-preview", "Gemini 3 Flash", ModelProvider::Gemini),
        ModelConfig::new("gemini-3-pro-preview", "Gemini 3 Pro", ModelProvider::Gemini),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serialization() {
        assert_eq!(
            serde_json::to_string(&ModelProvider::OpenAI).unwrap(),
            "\"openai\""
        );
        assert_eq!(
            serde_json::to_string(&ModelProvider::Gemini).unwrap(),
            "\"gemini\""
        );
    }

    #[test]
    fn test_registry_covers_both_providers() {
        let models = model_registry();
        assert!(models.iter().any(|m| m.provider == ModelProvider::OpenAI));
        assert!(models.iter().any(|m| m.provider == ModelProvider::Gemini));
    }
}
