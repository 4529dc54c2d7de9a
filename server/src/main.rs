use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use qingliao::modules::chat::{ChatModule, GeminiAdapter, LLMAdapterRegistry, OpenAIAdapter};
use qingliao::server::{run_server, AppState};

/// 会话文档目录的默认值
const DEFAULT_DATA_DIR: &str = "chat_history";
/// 监听地址的默认值
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qingliao=debug,tower_http=info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Qingliao starting...");

    // 初始化 LLM 适配器注册表，缺少密钥的提供商不注册
    let mut llm_registry = LLMAdapterRegistry::new();

    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            llm_registry.register(Arc::new(OpenAIAdapter::new(key)));
            tracing::info!("Registered OpenAI adapter");
        }
        _ => tracing::warn!("OPENAI_API_KEY not set, OpenAI models unavailable"),
    }

    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            llm_registry.register(Arc::new(GeminiAdapter::new(key)));
            tracing::info!("Registered Gemini adapter");
        }
        _ => tracing::warn!("GEMINI_API_KEY not set, Gemini models unavailable"),
    }

    let llm_registry = Arc::new(llm_registry);

    let data_dir = PathBuf::from(
        std::env::var("QINGLIAO_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
    );
    tracing::info!("Session data directory: {:?}", data_dir);

    // 初始化 Chat 模块（使用持久化存储，失败时回退到内存存储）
    let chat_module = match ChatModule::new_with_persistence(data_dir, llm_registry.clone()).await {
        Ok(module) => {
            tracing::info!("Chat module initialized with persistent storage");
            module
        }
        Err(e) => {
            tracing::warn!(
                "Failed to initialize persistent storage: {}, falling back to memory",
                e
            );
            ChatModule::new(llm_registry)
        }
    };

    let addr: SocketAddr = std::env::var("QINGLIAO_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .expect("QINGLIAO_ADDR must be a valid socket address");

    let state = AppState::new(chat_module);

    if let Err(e) = run_server(state, addr).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
