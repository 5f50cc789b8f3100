//! Integration tests for the room engine.
//!
//! A single-word lexicon makes the secret deterministic, so tests can
//! submit the exact winning guess. Timer scenarios run with
//! `start_paused` — the Tokio clock auto-advances to the next armed
//! deadline whenever every task is idle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use wordrush_lexicon::Lexicon;
use wordrush_protocol::{RoomCode, RoomSettings, ServerMessage};
use wordrush_room::{spawn_room, PlayerSender, RoomHandle};

// =========================================================================
// Helpers
// =========================================================================

fn lexicon(tsv: &str) -> Arc<Lexicon> {
    Arc::new(Lexicon::from_reader(tsv.as_bytes()).unwrap())
}

fn room(tsv: &str) -> RoomHandle {
    spawn_room(
        RoomCode::from("test-room-code"),
        lexicon(tsv),
        RoomSettings::default(),
    )
    .unwrap()
}

fn transport() -> (PlayerSender, UnboundedReceiver<ServerMessage>) {
    mpsc::unbounded_channel()
}

async fn recv(rx: &mut UnboundedReceiver<ServerMessage>) -> ServerMessage {
    tokio::time::timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("timed out waiting for message")
        .expect("channel closed")
}

/// Asserts nothing arrives within the window (auto-advancing past any
/// armed deadlines under a paused clock).
async fn assert_silent(rx: &mut UnboundedReceiver<ServerMessage>, window: Duration) {
    let result = tokio::time::timeout(window, rx.recv()).await;
    assert!(result.is_err(), "expected silence, got {:?}", result.unwrap());
}

fn scoreboard_of(msg: ServerMessage) -> Vec<(String, u32)> {
    match msg {
        ServerMessage::Scoreboard { players } => {
            let mut entries: Vec<(String, u32)> =
                players.into_iter().map(|e| (e.name, e.score)).collect();
            entries.sort();
            entries
        }
        other => panic!("expected Scoreboard, got {other:?}"),
    }
}

fn displayed_of(msg: ServerMessage) -> String {
    match msg {
        ServerMessage::Word { displayed, .. } => displayed,
        other => panic!("expected Word, got {other:?}"),
    }
}

// =========================================================================
// Joins
// =========================================================================

#[tokio::test]
async fn test_join_receives_word_and_scoreboard() {
    let handle = room("planet\tthird rock\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();

    let word = recv(&mut rx).await;
    assert_eq!(displayed_of(word), "_ _ _ _ _ _");

    let board = scoreboard_of(recv(&mut rx).await);
    assert_eq!(board, vec![("ada".to_string(), 0)]);
}

#[tokio::test]
async fn test_second_join_broadcasts_scoreboard_to_everyone() {
    let handle = room("planet\tthird rock\n");
    let (tx_a, mut rx_a) = transport();
    let (tx_b, mut rx_b) = transport();

    handle.join("ada", tx_a).await.unwrap();
    let _ = recv(&mut rx_a).await; // Word
    let _ = recv(&mut rx_a).await; // Scoreboard [ada]

    handle.join("bob", tx_b).await.unwrap();
    let _ = recv(&mut rx_b).await; // Word (direct to joiner)
    let board_b = scoreboard_of(recv(&mut rx_b).await);
    let board_a = scoreboard_of(recv(&mut rx_a).await);

    let expected = vec![("ada".to_string(), 0), ("bob".to_string(), 0)];
    assert_eq!(board_a, expected);
    assert_eq!(board_b, expected);
}

#[tokio::test]
async fn test_rejoin_invalidates_previous_transport() {
    let handle = room("planet\tthird rock\n");
    let (tx_old, mut rx_old) = transport();
    handle.join("ada", tx_old).await.unwrap();
    let _ = recv(&mut rx_old).await; // Word
    let _ = recv(&mut rx_old).await; // Scoreboard

    let (tx_new, mut rx_new) = transport();
    handle.join("ada", tx_new).await.unwrap();

    // The new transport is live and brought up to date.
    let _ = recv(&mut rx_new).await; // Word
    let board = scoreboard_of(recv(&mut rx_new).await);
    assert_eq!(board, vec![("ada".to_string(), 0)]);

    // The old sender was dropped by the engine: once its queued
    // messages are drained, the channel reports closed.
    while rx_old.try_recv().is_ok() {}
    assert!(rx_old.recv().await.is_none());
}

// =========================================================================
// Guesses
// =========================================================================

#[tokio::test]
async fn test_two_joins_then_correct_guess() {
    let handle = room("planet\tthird rock\n");
    let (tx_a, mut rx_a) = transport();
    let (tx_b, mut rx_b) = transport();

    handle.join("ada", tx_a).await.unwrap();
    let _ = recv(&mut rx_a).await;
    let _ = recv(&mut rx_a).await;
    handle.join("bob", tx_b).await.unwrap();
    let _ = recv(&mut rx_b).await;
    let _ = recv(&mut rx_b).await;
    let _ = recv(&mut rx_a).await;

    handle.guess("bob", "planet").await.unwrap();

    // Everyone sees the echo with correct = true.
    for rx in [&mut rx_a, &mut rx_b] {
        match recv(rx).await {
            ServerMessage::Guess {
                guess,
                player,
                correct,
            } => {
                assert_eq!(guess, "planet");
                assert_eq!(player, "bob");
                assert!(correct);
            }
            other => panic!("expected Guess, got {other:?}"),
        }
    }

    // Fully hidden word of length 6 pays 6 + 1.
    let expected = vec![("ada".to_string(), 0), ("bob".to_string(), 7)];
    assert_eq!(scoreboard_of(recv(&mut rx_a).await), expected);
    assert_eq!(scoreboard_of(recv(&mut rx_b).await), expected);

    // Both get the fresh round: all-hidden mask, solved word never shown.
    assert_eq!(displayed_of(recv(&mut rx_a).await), "_ _ _ _ _ _");
    assert_eq!(displayed_of(recv(&mut rx_b).await), "_ _ _ _ _ _");
}

#[tokio::test]
async fn test_incorrect_guess_echoes_raw_text_and_rebroadcasts_word() {
    let handle = room("planet\tthird rock\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await;
    let _ = recv(&mut rx).await;

    handle.guess("ada", "Mars??").await.unwrap();

    match recv(&mut rx).await {
        ServerMessage::Guess {
            guess, correct, ..
        } => {
            assert_eq!(guess, "Mars??", "echo must be the raw, non-normalized text");
            assert!(!correct);
        }
        other => panic!("expected Guess, got {other:?}"),
    }

    // No score change, no new round — the same all-hidden word again.
    assert_eq!(displayed_of(recv(&mut rx).await), "_ _ _ _ _ _");
}

#[tokio::test]
async fn test_guess_normalization_matches_through_punctuation() {
    let handle = room("gopher\tburrowing rodent\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await;
    let _ = recv(&mut rx).await;

    handle.guess("ada", "Go pher!!").await.unwrap();

    match recv(&mut rx).await {
        ServerMessage::Guess { correct, .. } => assert!(correct),
        other => panic!("expected Guess, got {other:?}"),
    }
}

#[tokio::test]
async fn test_only_the_guesser_is_credited() {
    let handle = room("planet\tthird rock\n");
    let (tx_a, mut rx_a) = transport();
    let (tx_b, mut rx_b) = transport();
    handle.join("ada", tx_a).await.unwrap();
    let _ = recv(&mut rx_a).await;
    let _ = recv(&mut rx_a).await;
    handle.join("bob", tx_b).await.unwrap();
    let _ = recv(&mut rx_b).await;
    let _ = recv(&mut rx_b).await;
    let _ = recv(&mut rx_a).await;

    handle.guess("ada", "planet").await.unwrap();
    let _ = recv(&mut rx_a).await; // Guess echo
    let board = scoreboard_of(recv(&mut rx_a).await);
    assert_eq!(
        board,
        vec![("ada".to_string(), 7), ("bob".to_string(), 0)]
    );
}

// =========================================================================
// Timer ticks (paused clock)
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_ticks_reveal_one_letter_at_a_time_then_stall() {
    let handle = room("cat\tfeline\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await; // Word
    let _ = recv(&mut rx).await; // Scoreboard

    // Three ticks, one reveal each; underscore count shrinks by one.
    for remaining in (0..3).rev() {
        let displayed = displayed_of(recv(&mut rx).await);
        let hidden = displayed.split(' ').filter(|s| *s == "_").count();
        assert_eq!(hidden, remaining);
    }

    // Fully revealed: the next fire stops the timer instead of
    // rearming, and nothing further is emitted without a new event.
    assert_silent(&mut rx, Duration::from_secs(60)).await;
}

#[tokio::test(start_paused = true)]
async fn test_late_guess_on_fully_revealed_word_restarts_the_round() {
    let handle = room("cat\tfeline\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await;
    let _ = recv(&mut rx).await;
    for _ in 0..3 {
        let _ = recv(&mut rx).await; // reveal ticks
    }
    assert_silent(&mut rx, Duration::from_secs(60)).await;

    // The stalled round still accepts the (now fully visible) answer.
    handle.guess("ada", "cat").await.unwrap();
    match recv(&mut rx).await {
        ServerMessage::Guess { correct, .. } => assert!(correct),
        other => panic!("expected Guess, got {other:?}"),
    }
    // Zero letters were hidden, so the reward bottoms out at 1.
    assert_eq!(
        scoreboard_of(recv(&mut rx).await),
        vec![("ada".to_string(), 1)]
    );
    // Fresh round, timer rearmed: the next tick reveals again.
    assert_eq!(displayed_of(recv(&mut rx).await), "_ _ _");
    let displayed = displayed_of(recv(&mut rx).await);
    assert_eq!(displayed.split(' ').filter(|s| *s == "_").count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_correct_guess_rearms_timer_to_a_full_interval() {
    let handle = room("cat\tfeline\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await;
    let _ = recv(&mut rx).await;

    // Let 4 of the 5 interval seconds elapse, then solve the round.
    tokio::time::advance(Duration::from_secs(4)).await;
    handle.guess("ada", "cat").await.unwrap();
    let _ = recv(&mut rx).await; // Guess echo
    let _ = recv(&mut rx).await; // Scoreboard
    let _ = recv(&mut rx).await; // Word (fresh round)

    // The old deadline (1s away) was discarded; nothing fires within
    // the next 4 seconds.
    assert_silent(&mut rx, Duration::from_secs(4)).await;
    let displayed = displayed_of(recv(&mut rx).await);
    assert_eq!(displayed.split(' ').filter(|s| *s == "_").count(), 2);
}

// =========================================================================
// Settings
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_settings_change_keeps_current_word_and_rearms_timer() {
    let handle = room("planet\tthird rock\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await;
    let _ = recv(&mut rx).await;

    let new_settings = RoomSettings {
        interval_seconds: 2,
        min_length: 3,
        max_length: 10,
    };
    handle.change_settings(new_settings).await.unwrap();

    match recv(&mut rx).await {
        ServerMessage::Settings { settings } => assert_eq!(settings, new_settings),
        other => panic!("expected Settings, got {other:?}"),
    }

    // The in-progress word is untouched; the next reveal arrives on the
    // new, shorter cadence.
    let displayed = displayed_of(recv(&mut rx).await);
    assert_eq!(displayed.split(' ').filter(|s| *s == "_").count(), 5);
}

#[tokio::test]
async fn test_settings_with_no_qualifying_words_are_rejected() {
    // Only a 6-letter word exists; 3..=4 holds nothing.
    let handle = room("planet\tthird rock\n");
    let (tx, mut rx) = transport();
    handle.join("ada", tx).await.unwrap();
    let _ = recv(&mut rx).await;
    let _ = recv(&mut rx).await;

    handle
        .change_settings(RoomSettings {
            interval_seconds: 5,
            min_length: 3,
            max_length: 4,
        })
        .await
        .unwrap();

    // No Settings broadcast; a later guess still works against the
    // unchanged round.
    handle.guess("ada", "planet").await.unwrap();
    match recv(&mut rx).await {
        ServerMessage::Guess { correct, .. } => assert!(correct),
        other => panic!("expected Guess (no Settings should precede it), got {other:?}"),
    }
}
