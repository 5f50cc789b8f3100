//! Per-connection glue between one WebSocket and one room.
//!
//! Each accepted socket splits into two halves driven by two tasks: a
//! write pump draining the player's outbound channel into the socket,
//! and a read loop decoding client frames into room events. When either
//! side finishes the other is aborted and the connection ends.
//!
//! A rejoin under the same name closes the displaced player's outbound
//! channel inside the engine; the write pump here observes that as
//! end-of-stream and shuts the stale socket down.

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use wordrush_protocol::{ClientMessage, Codec, JsonCodec, ServerMessage};
use wordrush_room::RoomHandle;

/// Drives one player's WebSocket until it closes, the player is
/// displaced by a rejoin, or the room goes away.
pub async fn drive(socket: WebSocket, room: RoomHandle, name: String) {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    if room.join(name.clone(), outbound_tx).await.is_err() {
        tracing::warn!(room = %room.code(), player = %name, "join failed: room unavailable");
        return;
    }
    tracing::debug!(room = %room.code(), player = %name, "connection attached");

    let (sink, stream) = socket.split();
    let mut write_task = tokio::spawn(write_pump(sink, outbound_rx));
    let mut read_task = tokio::spawn(read_loop(stream, room, name));

    tokio::select! {
        _ = &mut write_task => read_task.abort(),
        _ = &mut read_task => write_task.abort(),
    }
}

/// Encodes each queued server message and writes it to the socket.
/// Ends when the channel closes (player displaced) or the write fails
/// (peer gone).
async fn write_pump(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound_rx: mpsc::UnboundedReceiver<ServerMessage>,
) {
    let codec = JsonCodec;
    while let Some(msg) = outbound_rx.recv().await {
        let text = match codec.encode_text(&msg) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode server message");
                continue;
            }
        };
        if sink.send(Message::Text(text)).await.is_err() {
            return;
        }
    }
    // Channel closed: this transport was invalidated by a rejoin.
    let _ = sink.send(Message::Close(None)).await;
}

/// Decodes inbound frames into room events. Malformed payloads are
/// dropped with a diagnostic, never answered or disconnected over.
async fn read_loop(mut stream: SplitStream<WebSocket>, room: RoomHandle, name: String) {
    let codec = JsonCodec;
    while let Some(frame) = stream.next().await {
        let msg = match frame {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(room = %room.code(), player = %name, error = %e, "socket error");
                break;
            }
        };
        let payload = match msg {
            Message::Text(text) => text.into_bytes(),
            Message::Binary(bytes) => bytes,
            Message::Close(_) => break,
            // Pings are answered by axum; pong frames carry nothing.
            _ => continue,
        };
        let submitted = match codec.decode::<ClientMessage>(&payload) {
            Ok(ClientMessage::Guess { text }) => room.guess(name.clone(), text).await,
            Ok(ClientMessage::Settings { settings }) => room.change_settings(settings).await,
            Err(e) => {
                tracing::debug!(
                    room = %room.code(),
                    player = %name,
                    error = %e,
                    "dropping malformed client message"
                );
                continue;
            }
        };
        // Submission fails only when the room engine is gone.
        if submitted.is_err() {
            break;
        }
    }
    tracing::debug!(room = %room.code(), player = %name, "connection detached");
}
