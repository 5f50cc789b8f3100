//! The HTTP surface: room creation and existence checks as plain REST
//! endpoints, plus the WebSocket upgrade that hands a connection to a
//! room.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wordrush_protocol::RoomCode;
use wordrush_room::{RoomError, RoomRegistry};

use crate::{codegen, connection};

/// Shared state injected into every handler.
pub struct AppState {
    pub rooms: RoomRegistry,
}

/// Builds the full application router.
///
/// # Errors
/// Fails if `allow_origin` is not `*` and not a valid header value.
pub fn router(rooms: RoomRegistry, allow_origin: &str) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { rooms });
    Ok(Router::new()
        .route("/api/create-room", post(create_room))
        .route("/api/join-room/:code", get(join_room))
        .route("/ws/:code/:name", get(attach_player))
        .with_state(state)
        .layer(cors_layer(allow_origin)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(allow_origin: &str) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(if allow_origin == "*" {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allow_origin.parse::<HeaderValue>()?)
    })
}

/// `POST /api/create-room` — spawns a room under a fresh code and
/// returns the code as plain text.
async fn create_room(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    let mut rng = StdRng::from_os_rng();
    loop {
        let code = codegen::room_code(&mut rng);
        match state.rooms.create(code.clone()).await {
            Ok(_) => return Ok(code.to_string()),
            Err(RoomError::CodeInUse(_)) => continue,
            Err(e) => {
                tracing::error!(error = %e, "room creation failed");
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }
}

/// `GET /api/join-room/:code` — existence check a client runs before
/// opening the WebSocket.
async fn join_room(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, StatusCode> {
    if state.rooms.contains(&RoomCode::new(code)).await {
        Ok("OK")
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// `GET /ws/:code/:name` — upgrades to a WebSocket and attaches the
/// named player to the room.
async fn attach_player(
    ws: WebSocketUpgrade,
    Path((code, name)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    if name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let code = RoomCode::new(code);
    let Some(room) = state.rooms.lookup(&code).await else {
        return Err(StatusCode::NOT_FOUND);
    };
    Ok(ws.on_upgrade(move |socket| connection::drive(socket, room, name)))
}
