//! The room engine: an isolated Tokio task that owns one room's game
//! state.
//!
//! Every mutating input — joins, guesses, settings changes, and reveal
//! timer fires — arrives through one ordered stream consumed by this
//! single task, so no two state transitions ever interleave. A join
//! that races a guess is applied strictly before or after it, never
//! partially. The engine is the only writer of round state; the player
//! registry is the one piece shared outside the task and sits behind a
//! read/write lock.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, RwLock};
use wordrush_lexicon::Lexicon;
use wordrush_protocol::{RoomCode, RoomSettings, ServerMessage};

use crate::broadcast::Broadcaster;
use crate::registry::{PlayerRegistry, PlayerSender};
use crate::round::Round;
use crate::timer::RevealTimer;
use crate::RoomError;

/// Event channel capacity. Kept at 1 so a connection task cannot queue
/// a burst of events ahead of the room worker: submitting a second
/// event waits until the first has been accepted.
const EVENT_CHANNEL_CAPACITY: usize = 1;

/// An event on a room's single ordered stream.
#[derive(Debug)]
pub enum RoomEvent {
    /// A player attaching to the room. `sender` is the transport handle
    /// the engine will deliver outbound messages through.
    Join { name: String, sender: PlayerSender },

    /// A guess at the current word. `text` is raw, exactly as typed.
    Guess { player: String, text: String },

    /// Wholesale settings replacement.
    ChangeSettings(RoomSettings),
}

/// Handle to a running room engine. Cheap to clone — connection tasks
/// hold one each and submit events through it.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    events: mpsc::Sender<RoomEvent>,
}

impl RoomHandle {
    /// The room's code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Submits a join for `name` with the given outbound transport.
    pub async fn join(&self, name: impl Into<String>, sender: PlayerSender) -> Result<(), RoomError> {
        self.submit(RoomEvent::Join {
            name: name.into(),
            sender,
        })
        .await
    }

    /// Submits a guess on behalf of `player`.
    pub async fn guess(
        &self,
        player: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), RoomError> {
        self.submit(RoomEvent::Guess {
            player: player.into(),
            text: text.into(),
        })
        .await
    }

    /// Submits a settings replacement.
    pub async fn change_settings(&self, settings: RoomSettings) -> Result<(), RoomError> {
        self.submit(RoomEvent::ChangeSettings(settings)).await
    }

    /// Pushes an event into the room's stream. Blocks while the engine
    /// is busy with a previous event (capacity-1 handoff).
    pub async fn submit(&self, event: RoomEvent) -> Result<(), RoomError> {
        self.events
            .send(event)
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }
}

/// The engine itself. Owns all round state; runs inside one Tokio task.
struct RoomEngine {
    code: RoomCode,
    lexicon: Arc<Lexicon>,
    settings: RoomSettings,
    round: Round,
    registry: Arc<RwLock<PlayerRegistry>>,
    broadcaster: Broadcaster,
    timer: RevealTimer,
    events: mpsc::Receiver<RoomEvent>,
    rng: StdRng,
}

impl RoomEngine {
    /// Consumes events and timer fires until the event stream closes
    /// (every handle dropped, i.e. process shutdown).
    async fn run(mut self) {
        tracing::info!(room = %self.code, "room engine started");

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
                () = self.timer.fired() => self.handle_tick().await,
            }
        }

        tracing::info!(room = %self.code, "room engine stopped");
    }

    async fn handle_event(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::Join { name, sender } => self.handle_join(name, sender).await,
            RoomEvent::Guess { player, text } => self.handle_guess(player, text).await,
            RoomEvent::ChangeSettings(settings) => self.handle_change_settings(settings).await,
        }
    }

    /// Registers the player, arms the timer if the room was empty, and
    /// brings the joiner up to date.
    ///
    /// Name collision is an explicit replace-and-invalidate: the new
    /// transport displaces the old entry; dropping the old sender
    /// closes the orphaned outbound channel, which ends the stale
    /// connection's write pump. The score carries over.
    async fn handle_join(&mut self, name: String, sender: PlayerSender) {
        let (was_empty, displaced) = {
            let mut registry = self.registry.write().await;
            let was_empty = registry.is_empty();
            (was_empty, registry.insert(name.clone(), sender))
        };

        if displaced.is_some() {
            tracing::debug!(room = %self.code, player = %name, "rejoin replaced previous transport");
        }
        tracing::info!(room = %self.code, player = %name, "player joined");

        if was_empty {
            self.timer.arm(self.settings.interval());
        }

        self.broadcaster.send_to(&name, self.round.word_update()).await;
        self.broadcaster.broadcast_scoreboard().await;
    }

    /// Echoes the guess to everyone; on a correct guess credits the
    /// guesser, starts a fresh round, and rearms the timer. Always
    /// finishes by broadcasting the current word view — after a correct
    /// guess that is the NEW round's clue and all-hidden mask, so the
    /// solved word is never spelled out.
    async fn handle_guess(&mut self, player: String, text: String) {
        let correct = self.round.matches(&text);

        self.broadcaster
            .broadcast(&ServerMessage::Guess {
                guess: text,
                player: player.clone(),
                correct,
            })
            .await;

        if correct {
            // A reveal tick that already fired lowers the reward: a
            // fully hidden word of length L is worth L + 1.
            let points = self.round.unrevealed() as u32 + 1;
            let new_score = self.registry.write().await.credit(&player, points);
            tracing::info!(
                room = %self.code,
                player = %player,
                points,
                score = new_score,
                "correct guess"
            );

            self.broadcaster.broadcast_scoreboard().await;
            self.start_round();
        }

        self.broadcaster.broadcast(&self.round.word_update()).await;
    }

    /// Adopts the new settings wholesale and rearms the timer from zero
    /// elapsed. The in-progress word and mask are untouched. A range
    /// with no qualifying words is rejected so the next round's
    /// selection can never fail.
    async fn handle_change_settings(&mut self, settings: RoomSettings) {
        if !self
            .lexicon
            .has_words_in(settings.min_length, settings.max_length)
        {
            tracing::warn!(
                room = %self.code,
                min = settings.min_length,
                max = settings.max_length,
                "rejected settings: no words in requested length range"
            );
            return;
        }

        let (min_length, max_length) =
            Lexicon::clamp_range(settings.min_length, settings.max_length);
        self.settings = RoomSettings {
            interval_seconds: settings.interval_seconds,
            min_length,
            max_length,
        };
        self.timer.arm(self.settings.interval());
        tracing::info!(
            room = %self.code,
            interval = self.settings.interval_seconds,
            min = min_length,
            max = max_length,
            "settings changed"
        );

        self.broadcaster
            .broadcast(&ServerMessage::Settings {
                settings: self.settings,
            })
            .await;
    }

    /// One reveal per fire while letters remain; once the word is fully
    /// exposed the timer stops instead of rearming, and the round
    /// stalls until a late correct guess or a settings change.
    async fn handle_tick(&mut self) {
        match self.round.reveal_next(&mut self.rng) {
            Ok(pos) => {
                tracing::trace!(room = %self.code, pos, "revealed position");
                self.broadcaster.broadcast(&self.round.word_update()).await;
                self.timer.arm(self.settings.interval());
            }
            Err(_) => {
                tracing::debug!(room = %self.code, "word fully revealed — timer stopped");
                self.timer.disarm();
            }
        }
    }

    /// Draws a fresh word under the current settings and rearms the
    /// timer to a full interval.
    fn start_round(&mut self) {
        match self.lexicon.random_word(
            &mut self.rng,
            self.settings.min_length,
            self.settings.max_length,
        ) {
            Ok(word_clue) => {
                tracing::debug!(
                    room = %self.code,
                    len = word_clue.word.chars().count(),
                    "new round started"
                );
                self.round = Round::new(word_clue.clone());
                self.timer.arm(self.settings.interval());
            }
            Err(e) => {
                // Settings are validated against the lexicon before
                // adoption, so this path is unreachable in normal
                // operation. Stall the round rather than kill the room.
                tracing::error!(room = %self.code, error = %e, "word selection failed — round stalled");
                self.timer.disarm();
            }
        }
    }
}

/// Spawns a room engine task and returns the handle for submitting
/// events.
///
/// The first round's word is drawn before the task starts, so an
/// impossible settings range surfaces here instead of inside the actor.
pub fn spawn_room(
    code: RoomCode,
    lexicon: Arc<Lexicon>,
    settings: RoomSettings,
) -> Result<RoomHandle, RoomError> {
    let mut rng = StdRng::from_os_rng();
    let word_clue = lexicon
        .random_word(&mut rng, settings.min_length, settings.max_length)?
        .clone();

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let registry = Arc::new(RwLock::new(PlayerRegistry::new()));

    let engine = RoomEngine {
        code: code.clone(),
        lexicon,
        settings,
        round: Round::new(word_clue),
        broadcaster: Broadcaster::new(Arc::clone(&registry)),
        registry,
        timer: RevealTimer::new(),
        events: rx,
        rng,
    };

    tokio::spawn(engine.run());

    Ok(RoomHandle { code, events: tx })
}
