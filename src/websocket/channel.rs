use crate::utils::jwt::decode_jwt;
use crate::websocket::hub::NotificationHub;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        WebSocketUpgrade,
    },
    response::IntoResponse,
    Extension,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;

/// First frame the client must send after connecting; carries the
/// session token.
#[derive(Deserialize)]
struct RegisterFrame {
    event: String,
    token: String,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Extension(hub): Extension<NotificationHub>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: NotificationHub) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // The connection is anonymous until a register frame arrives.
    let user_id = loop {
        match ws_receiver.next().await {
            Some(Ok(Message::Text(text))) => match parse_register(&text) {
                Some(user_id) => break user_id,
                None => {
                    let _ = ws_sender.send(Message::Close(None)).await;
                    return;
                }
            },
            Some(Ok(Message::Close(_))) | None => return,
            Some(Ok(_)) => continue,
            Some(Err(_)) => return,
        }
    };

    let (conn_id, mut rx) = hub.subscribe(user_id);
    tracing::info!("WebSocket registered for user {}", user_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.unsubscribe(user_id, conn_id);
    tracing::info!("WebSocket disconnected for user {}", user_id);
}

fn parse_register(text: &str) -> Option<i32> {
    let frame: RegisterFrame = serde_json::from_str(text).ok()?;
    if frame.event != "register" {
        return None;
    }
    let claims = decode_jwt(&frame.token).ok()?;
    claims.sub.parse().ok()
}
