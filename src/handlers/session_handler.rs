use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use futures::{
    channel::{mpsc, oneshot},
    stream, StreamExt,
};
use serde::Serialize;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, ErrorResponse},
    middleware::get_request_id,
    models::dto::{
        request::{ChatRequest, CreateSessionRequest, SelectPersonaRequest},
        response::ChatReplyDto,
    },
};

/// One Server-Sent Events frame.
fn sse_frame<T: Serialize>(event: &str, data: &T) -> web::Bytes {
    let payload = serde_json::to_string(data).unwrap_or_else(|_| "null".to_string());
    web::Bytes::from(format!("event: {}\ndata: {}\n\n", event, payload))
}

fn log_failed_turn(request_id: &str, session_id: &str, reply: &ChatReplyDto) {
    if reply.failed {
        log::warn!(
            "Turn failed (request_id={}, session={}): {}",
            request_id,
            session_id,
            reply.reply
        );
    }
}

/// An empty body means "no persona"; anything else must parse.
fn parse_create_request(body: &[u8]) -> Result<CreateSessionRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateSessionRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("invalid session request: {}", e)))
}

#[post("/api/sessions")]
pub async fn create_session(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let request = parse_create_request(&body)?;
    request.validate()?;

    let session = state.session_service.create_session(request.persona_id).await?;
    let view = state.session_service.session_view(&session.id).await?;
    Ok(HttpResponse::Created().json(view))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.session_view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/api/sessions/{id}")]
pub async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.session_service.delete_session(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/api/sessions/{id}/persona")]
pub async fn select_persona(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SelectPersonaRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    state
        .session_service
        .select_persona(&id, &request.persona_id)
        .await?;
    let view = state.session_service.session_view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/api/sessions/{id}/persona")]
pub async fn back_to_personas(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.session_service.back_to_personas(&id).await?;
    let view = state.session_service.session_view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/api/sessions/{id}/clear")]
pub async fn clear_conversation(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.session_service.clear_conversation(&id).await?;
    let view = state.session_service.session_view(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[get("/api/sessions/{id}/suggestions")]
pub async fn get_suggestions(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let suggestions = state.session_service.suggestions(&id).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

#[get("/api/sessions/{id}/sources")]
pub async fn get_sources(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let sources = state.session_service.sources(&id).await?;
    Ok(HttpResponse::Ok().json(sources))
}

#[post("/api/sessions/{id}/messages")]
pub async fn send_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let request = request.into_inner();

    let reply = state
        .session_service
        .send_message(&id, &request.prompt, request.local_time)
        .await?;
    let request_id = get_request_id(&req).unwrap_or_else(|| "-".to_string());
    log_failed_turn(&request_id, &id, &reply);
    Ok(HttpResponse::Ok().json(reply))
}

/// Streams `delta` events while the assistant writes, then one `done` event
/// carrying the full reply. Failures after the stream opened arrive as an
/// `error` event.
#[post("/api/sessions/{id}/messages/stream")]
pub async fn stream_message(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let request = request.into_inner();
    let id = id.into_inner();

    // unknown sessions get a plain 404 instead of an event stream
    state.session_service.get_session(&id).await?;

    let (text_tx, text_rx) = mpsc::unbounded::<String>();
    let (done_tx, done_rx) = oneshot::channel();

    let request_id = get_request_id(&req).unwrap_or_else(|| "-".to_string());
    let service = state.session_service.clone();
    actix_web::rt::spawn(async move {
        let result = service
            .stream_message(&id, &request.prompt, request.local_time, text_tx)
            .await;
        if let Ok(reply) = &result {
            log_failed_turn(&request_id, &id, reply);
        }
        if done_tx.send(result).is_err() {
            log::debug!("Stream for session {} closed before the turn finished", id);
        }
    });

    let deltas = text_rx.map(|text| {
        Ok::<_, actix_web::Error>(sse_frame("delta", &serde_json::json!({ "text": text })))
    });
    let done = stream::once(async move {
        let frame = match done_rx.await {
            Ok(Ok(reply)) => sse_frame("done", &reply),
            Ok(Err(err)) => sse_frame(
                "error",
                &ErrorResponse {
                    error: err.to_string(),
                    code: err.error_code(),
                },
            ),
            Err(_) => sse_frame(
                "error",
                &ErrorResponse {
                    error: "turn aborted".to_string(),
                    code: "INTERNAL_ERROR",
                },
            ),
        };
        Ok::<_, actix_web::Error>(frame)
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(deltas.chain(done)))
}
