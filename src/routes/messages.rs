use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{open_message, InboxQuery};
use crate::models::{InboxParams, InboxResponse, SendMessageRequest};
use crate::routes::{error_response, storage_error, validation_error, AppState, Viewer};
use crate::services::PostgresError;

/// Configure messaging routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/messages/{receiver_id}", web::post().to(send_message))
        .route("/inbox", web::get().to(inbox))
        .route("/inbox/{message_id}", web::get().to(view_message))
        .route("/inbox/{message_id}/reply", web::post().to(send_reply));
}

/// Send a message to a user
///
/// POST /api/v1/messages/{receiver_id}
///
/// Request body:
/// ```json
/// {
///   "subject": "string (max 80)",
///   "body": "string"
/// }
/// ```
async fn send_message(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
    req: web::Json<SendMessageRequest>,
) -> impl Responder {
    let receiver_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    if receiver_id == viewer.id {
        return error_response(StatusCode::BAD_REQUEST, "Invalid receiver", "you cannot message yourself");
    }

    if let Err(e) = state.postgres.get_user(receiver_id).await {
        return storage_error("Failed to fetch receiver", e);
    }

    match state
        .postgres
        .create_message(viewer.id, receiver_id, &req.subject, &req.body)
        .await
    {
        Ok(message) => {
            tracing::info!("User {} sent message {} to {}", viewer.id, message.id, receiver_id);
            HttpResponse::Created().json(message)
        }
        Err(e) => storage_error("Failed to send message", e),
    }
}

/// Inbox endpoint
///
/// GET /api/v1/inbox?sorting=received&sorting=unread&q={search}
///
/// `sorting` is repeatable; unknown values are ignored and the default is
/// `received`.
async fn inbox(
    state: web::Data<AppState>,
    viewer: Viewer,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let params = InboxParams::from_pairs(query.into_inner());
    let inbox_query = InboxQuery::new(viewer.id, &params.sorting, params.q.as_deref());

    let messages = match state.postgres.messages_for_viewer(viewer.id).await {
        Ok(messages) => messages,
        Err(e) => return storage_error("Failed to fetch messages", e),
    };

    let messages = inbox_query.apply(messages);

    tracing::info!(
        "Returning {} messages for user {} (facets: {:?})",
        messages.len(),
        viewer.id,
        inbox_query.facets()
    );

    HttpResponse::Ok().json(InboxResponse {
        total_results: messages.len(),
        messages,
    })
}

/// View a message
///
/// GET /api/v1/inbox/{message_id}
///
/// Visible to both parties. The receiver opening an unread message marks
/// it read.
async fn view_message(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
) -> impl Responder {
    let message_id = path.into_inner();

    let mut envelope = match state.postgres.get_message(message_id).await {
        Ok(envelope) if envelope.involves(viewer.id) => envelope,
        Ok(_) => {
            return storage_error(
                "Failed to fetch message",
                PostgresError::NotFound(format!("message {}", message_id)),
            )
        }
        Err(e) => return storage_error("Failed to fetch message", e),
    };

    if open_message(&mut envelope.message, viewer.id) {
        if let Err(e) = state.postgres.mark_read(message_id, viewer.id).await {
            return storage_error("Failed to mark message read", e);
        }
        tracing::debug!("Message {} marked read by {}", message_id, viewer.id);
    }

    HttpResponse::Ok().json(envelope)
}

/// Reply to a message
///
/// POST /api/v1/inbox/{message_id}/reply
///
/// The reply goes to the other party of the original message.
async fn send_reply(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
    req: web::Json<SendMessageRequest>,
) -> impl Responder {
    let message_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let original = match state.postgres.get_message(message_id).await {
        Ok(envelope) if envelope.involves(viewer.id) => envelope,
        Ok(_) => {
            return storage_error(
                "Failed to fetch message",
                PostgresError::NotFound(format!("message {}", message_id)),
            )
        }
        Err(e) => return storage_error("Failed to fetch message", e),
    };

    let receiver_id = original.counterparty_id(viewer.id);

    match state
        .postgres
        .create_message(viewer.id, receiver_id, &req.subject, &req.body)
        .await
    {
        Ok(message) => {
            tracing::info!("User {} replied to message {} with {}", viewer.id, message_id, message.id);
            HttpResponse::Created().json(message)
        }
        Err(e) => storage_error("Failed to send reply", e),
    }
}
