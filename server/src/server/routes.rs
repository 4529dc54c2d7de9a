// HTTP 路由处理器
//
// 对外只暴露薄 DTO 层，编排逻辑全部委托给 ChatModule

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::modules::chat::{
    model_registry, system_prompts, ApplicationError, DeleteSessionCommand, EditMessageCommand,
    ListSessionsQuery, Message, RenameSessionCommand, SendMessageCommand, Session, SessionId,
};

use super::state::AppState;

/// 无状态聊天接口的默认模型
const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash-exp";

/// 创建 API 路由
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_completion))
        .route("/api/chat/send", post(send_message))
        .route("/api/chat/edit", post(edit_message))
        .route(
            "/api/storage",
            get(list_sessions).post(save_session).delete(delete_session),
        )
        .route("/api/storage/rename", post(rename_session))
        .route("/api/models", get(list_models))
        .route("/api/prompts", get(list_prompts))
        .with_state(state)
}

/// 应用层错误到 HTTP 状态码的映射
fn error_response(error: ApplicationError) -> (StatusCode, Json<Value>) {
    let status = match &error {
        ApplicationError::ValidationError(_) | ApplicationError::InvalidEditTarget(_) => {
            StatusCode::BAD_REQUEST
        }
        ApplicationError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Provider(_) | ApplicationError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": error.to_string() })))
}

/// 健康检查
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "qingliao",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// 无状态聊天请求中的单条消息
#[derive(Debug, Deserialize)]
struct ChatMessageDto {
    role: crate::modules::chat::MessageRole,
    content: String,
}

/// 无状态聊天接口
///
/// 不接触会话存储：调用方自带完整消息序列，
/// 响应只包含助手回复文本
async fn chat_completion(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(raw_messages) = body.get("messages").filter(|m| m.is_array()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Messages array is required" })),
        ));
    };

    let dtos: Vec<ChatMessageDto> = serde_json::from_value(raw_messages.clone()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid messages: {}", e) })),
        )
    })?;

    if dtos.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Messages array is required" })),
        ));
    }

    let model = body
        .get("model")
        .and_then(|m| m.as_str())
        .unwrap_or(DEFAULT_CHAT_MODEL)
        .to_string();

    let messages: Vec<Message> = dtos
        .into_iter()
        .map(|m| Message::new(m.role, m.content))
        .collect();

    let adapter = state.chat.llm_registry().resolve(&model).ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("no adapter registered for model {}", model) })),
        )
    })?;

    let reply = adapter.complete(&messages, &model).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    // 调用方会把返回的消息对象原样写入会话文档
    Ok(Json(json!({ "message": reply })))
}

/// 发送消息请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest {
    session_id: Option<String>,
    content: String,
    system_prompt: Option<String>,
    model: Option<String>,
}

/// 发送/编辑消息响应
#[derive(Debug, Serialize)]
struct ChatTurnResponse {
    session: Session,
    message: Message,
}

/// 会话内发送消息
async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatTurnResponse>, (StatusCode, Json<Value>)> {
    let command = SendMessageCommand::new(
        request.session_id.map(SessionId::from),
        request.content,
        request.system_prompt,
        request.model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
    );

    let response = state.chat.send_message(command).await.map_err(error_response)?;

    Ok(Json(ChatTurnResponse {
        session: response.session,
        message: response.assistant_message,
    }))
}

/// 编辑并重新生成请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditMessageRequest {
    session_id: String,
    message_index: usize,
    content: String,
    system_prompt: Option<String>,
    model: Option<String>,
}

/// 编辑最后一条用户消息并重新生成回复
async fn edit_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EditMessageRequest>,
) -> Result<Json<ChatTurnResponse>, (StatusCode, Json<Value>)> {
    let command = EditMessageCommand::new(
        SessionId::from(request.session_id),
        request.message_index,
        request.content,
        request.system_prompt,
        request.model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
    );

    let response = state.chat.edit_message(command).await.map_err(error_response)?;

    Ok(Json(ChatTurnResponse {
        session: response.session,
        message: response.assistant_message,
    }))
}

/// 列出所有会话
///
/// 枚举失败时返回 500，但响应体仍带空的 sessions 数组，
/// 调用方无需区分错误形状即可渲染空列表
async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.chat.list_sessions(ListSessionsQuery).await {
        Ok(response) => Ok(Json(json!({ "sessions": response.sessions }))),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string(), "sessions": [] })),
        )),
    }
}

/// 保存完整会话文档（覆盖写入）
async fn save_session(
    State(state): State<Arc<AppState>>,
    Json(session): Json<Session>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state
        .chat
        .session_store()
        .save(&session)
        .await
        .map_err(|e| error_response(ApplicationError::Store(e)))?;

    Ok(Json(json!({ "success": true, "session": session })))
}

/// 删除会话查询参数
#[derive(Debug, Deserialize)]
struct DeleteSessionParams {
    id: Option<String>,
}

/// 删除会话
///
/// 缺少 id 参数返回 400；删除不存在的会话视为成功
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteSessionParams>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(id) = params.id else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Session ID is required" })),
        ));
    };

    state
        .chat
        .delete_session(DeleteSessionCommand::new(SessionId::from(id)))
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "success": true })))
}

/// 重命名会话请求
#[derive(Debug, Deserialize)]
struct RenameSessionRequest {
    id: String,
    title: String,
}

/// 重命名会话
async fn rename_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RenameSessionRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let response = state
        .chat
        .rename_session(RenameSessionCommand::new(
            SessionId::from(request.id),
            request.title,
        ))
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "success": true, "session": response.session })))
}

/// 内置模型列表
async fn list_models() -> impl IntoResponse {
    Json(json!({ "models": model_registry() }))
}

/// 内置系统提示预设列表
async fn list_prompts() -> impl IntoResponse {
    Json(json!({ "prompts": system_prompts() }))
}
