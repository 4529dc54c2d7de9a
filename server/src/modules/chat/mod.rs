// Chat Module - 聊天模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含实体和值对象
// - ports: 端口层，定义与外部世界的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，实现 CQRS 命令和查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    // Traits
    ApplicationError,
    CommandHandler,
    // Commands
    CreateSessionCommand,
    CreateSessionHandler,
    CreateSessionResponse,
    DeleteSessionCommand,
    DeleteSessionHandler,
    EditMessageCommand,
    EditMessageHandler,
    EditMessageResponse,
    // Queries
    GetSessionHandler,
    GetSessionQuery,
    GetSessionResponse,
    ListSessionsHandler,
    ListSessionsQuery,
    ListSessionsResponse,
    QueryHandler,
    RenameSessionCommand,
    RenameSessionHandler,
    RenameSessionResponse,
    SendMessageCommand,
    SendMessageHandler,
    SendMessageResponse,
};

pub use domain::{
    model_registry, system_prompts, Message, MessageRole, ModelConfig, ModelProvider, Session,
    SessionId, SystemPrompt,
};

pub use infrastructure::{
    FileSessionStore, GeminiAdapter, InMemorySessionStore, LLMAdapterRegistry, MockLLMAdapter,
    OpenAIAdapter, ProviderRouter,
};

pub use ports::{LLMPort, ProviderCallFailed, SessionStore, StoreError};

use std::sync::Arc;

/// Chat 模块容器
///
/// 管理模块内的依赖注入
pub struct ChatModule {
    // Store
    session_store: Arc<dyn SessionStore>,
    // LLM
    llm_registry: Arc<LLMAdapterRegistry>,
    // Handlers
    send_message_handler: SendMessageHandler,
    edit_message_handler: EditMessageHandler,
    create_session_handler: CreateSessionHandler,
    delete_session_handler: DeleteSessionHandler,
    rename_session_handler: RenameSessionHandler,
    get_session_handler: GetSessionHandler,
    list_sessions_handler: ListSessionsHandler,
}

impl ChatModule {
    /// 创建新的 ChatModule 实例（内存存储，用于开发测试）
    ///
    /// # Arguments
    /// * `llm_registry` - LLM 适配器注册表
    pub fn new(llm_registry: Arc<LLMAdapterRegistry>) -> Self {
        let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

        Self::with_store(session_store, llm_registry)
    }

    /// 创建带持久化存储的 ChatModule 实例（生产环境推荐）
    ///
    /// # Arguments
    /// * `data_dir` - 会话文档目录路径
    /// * `llm_registry` - LLM 适配器注册表
    ///
    /// # Errors
    /// 如果无法初始化文件存储，返回错误
    pub async fn new_with_persistence(
        data_dir: std::path::PathBuf,
        llm_registry: Arc<LLMAdapterRegistry>,
    ) -> Result<Self, StoreError> {
        let session_store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(data_dir).await?);

        Ok(Self::with_store(session_store, llm_registry))
    }

    /// 使用自定义存储创建 ChatModule
    pub fn with_store(
        session_store: Arc<dyn SessionStore>,
        llm_registry: Arc<LLMAdapterRegistry>,
    ) -> Self {
        let send_message_handler =
            SendMessageHandler::new(session_store.clone(), llm_registry.clone());
        let edit_message_handler =
            EditMessageHandler::new(session_store.clone(), llm_registry.clone());
        let create_session_handler = CreateSessionHandler::new(session_store.clone());
        let delete_session_handler = DeleteSessionHandler::new(session_store.clone());
        let rename_session_handler = RenameSessionHandler::new(session_store.clone());
        let get_session_handler = GetSessionHandler::new(session_store.clone());
        let list_sessions_handler = ListSessionsHandler::new(session_store.clone());

        Self {
            session_store,
            llm_registry,
            send_message_handler,
            edit_message_handler,
            create_session_handler,
            delete_session_handler,
            rename_session_handler,
            get_session_handler,
            list_sessions_handler,
        }
    }

    // Command handlers

    /// 发送消息
    pub async fn send_message(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResponse, ApplicationError> {
        self.send_message_handler.handle(command).await
    }

    /// 编辑并重新生成
    pub async fn edit_message(
        &self,
        command: EditMessageCommand,
    ) -> Result<EditMessageResponse, ApplicationError> {
        self.edit_message_handler.handle(command).await
    }

    /// 创建会话
    pub async fn create_session(
        &self,
        command: CreateSessionCommand,
    ) -> Result<CreateSessionResponse, ApplicationError> {
        self.create_session_handler.handle(command).await
    }

    /// 删除会话
    pub async fn delete_session(
        &self,
        command: DeleteSessionCommand,
    ) -> Result<(), ApplicationError> {
        self.delete_session_handler.handle(command).await
    }

    /// 重命名会话
    pub async fn rename_session(
        &self,
        command: RenameSessionCommand,
    ) -> Result<RenameSessionResponse, ApplicationError> {
        self.rename_session_handler.handle(command).await
    }

    // Query handlers

    /// 获取会话
    pub async fn get_session(
        &self,
        query: GetSessionQuery,
    ) -> Result<GetSessionResponse, ApplicationError> {
        self.get_session_handler.handle(query).await
    }

    /// 列出所有会话
    pub async fn list_sessions(
        &self,
        query: ListSessionsQuery,
    ) -> Result<ListSessionsResponse, ApplicationError> {
        self.list_sessions_handler.handle(query).await
    }

    // Accessors

    /// 获取 LLM 注册表
    pub fn llm_registry(&self) -> &Arc<LLMAdapterRegistry> {
        &self.llm_registry
    }

    /// 获取会话存储
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session_store
    }
}
