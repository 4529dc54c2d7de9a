use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::chat::domain::ModelProvider;
use crate::modules::chat::ports::LLMPort;

use super::ProviderRouter;

/// LLM 适配器注册表
///
/// 每个提供商标签绑定一个进程级适配器实例，
/// 启动时显式构造并注册，之后只读
pub struct LLMAdapterRegistry {
    adapters: HashMap<ModelProvider, Arc<dyn LLMPort>>,
}

impl LLMAdapterRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// 注册适配器，标签取自适配器自身
    pub fn register(&mut self, adapter: Arc<dyn LLMPort>) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    /// 按提供商标签获取适配器
    pub fn get(&self, provider: ModelProvider) -> Option<Arc<dyn LLMPort>> {
        self.adapters.get(&provider).cloned()
    }

    /// 根据模型标识符解析适配器（前缀路由）
    pub fn resolve(&self, model: &str) -> Option<Arc<dyn LLMPort>> {
        self.get(ProviderRouter::select(model))
    }

    /// 已注册的适配器数量
    pub fn count(&self) -> usize {
        self.adapters.len()
    }
}

impl Default for LLMAdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
