use crate::modules::chat::domain::ModelProvider;

/// 模型标识符到提供商的前缀路由表
///
/// 固定的有序规则集，自上而下匹配；
/// 未命中任何前缀的标识符一律回落到 Gemini——这是刻意的策略而非疏漏
const PREFIX_RULES: &[(&str, ModelProvider)] = &[
    ("gpt-", ModelProvider::OpenAI),
    ("chatgpt-", ModelProvider::OpenAI),
    ("o1", ModelProvider::OpenAI),
    ("o3", ModelProvider::OpenAI),
    ("o4", ModelProvider::OpenAI),
];

/// 提供商路由器
pub struct ProviderRouter;

impl ProviderRouter {
    /// 根据模型标识符选择提供商
    ///
    /// 纯函数：相同输入永远得到相同的提供商标签
    pub fn select(model: &str) -> ModelProvider {
        for (prefix, provider) in PREFIX_RULES {
            if model.starts_with(prefix) {
                return *provider;
            }
        }
        ModelProvider::Gemini
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_prefixes() {
        assert_eq!(ProviderRouter::select("gpt-4.1-mini"), ModelProvider::OpenAI);
        assert_eq!(ProviderRouter::select("gpt-5-nano"), ModelProvider::OpenAI);
        assert_eq!(ProviderRouter::select("o1-preview"), ModelProvider::OpenAI);
        assert_eq!(ProviderRouter::select("o3-mini"), ModelProvider::OpenAI);
        assert_eq!(
            ProviderRouter::select("chatgpt-4o-latest"),
            ModelProvider::OpenAI
        );
    }

    #[test]
    fn test_gemini_models_route_to_gemini() {
        assert_eq!(
            ProviderRouter::select("gemini-2.0-flash"),
            ModelProvider::Gemini
        );
        assert_eq!(
            ProviderRouter::select("gemini-3-pro-preview"),
            ModelProvider::Gemini
        );
    }

    #[test]
    fn test_unrecognized_identifiers_default_to_gemini() {
        // 回落到 Gemini 是策略，任意未知标识符都必须命中默认分支
        for model in ["", "claude-3-opus", "llama-3-70b", "mistral-large", "foo"] {
            assert_eq!(ProviderRouter::select(model), ModelProvider::Gemini);
        }
    }

    #[test]
    fn test_select_is_deterministic() {
        for model in ["gpt-4.1", "gemini-2.0-flash", "unknown-model"] {
            assert_eq!(ProviderRouter::select(model), ProviderRouter::select(model));
        }
    }
}
