// 请求处理器之间共享的应用状态

use std::sync::Arc;

use crate::modules::chat::ChatModule;

/// 共享应用状态
pub struct AppState {
    /// 聊天模块容器
    pub chat: ChatModule,
}

impl AppState {
    pub fn new(chat: ChatModule) -> Arc<Self> {
        Arc::new(Self { chat })
    }
}
