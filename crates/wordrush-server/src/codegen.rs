//! Room code generation: three short words joined by hyphens, e.g.
//! `tidal-onyx-fern`. Easy to read aloud and type on a phone.

use rand::seq::IndexedRandom;
use rand::Rng;
use wordrush_protocol::RoomCode;

const WORDS: &[&str] = &[
    "amber", "aspen", "birch", "blaze", "bloom", "brook", "cedar", "cliff",
    "cloud", "coral", "crest", "delta", "drift", "dusk", "ember", "fern",
    "flint", "frost", "gale", "glade", "grove", "harbor", "hazel", "heron",
    "indigo", "ivory", "jade", "lark", "lotus", "maple", "marsh", "meadow",
    "mist", "moss", "north", "ocean", "onyx", "opal", "otter", "pearl",
    "pine", "quartz", "raven", "reef", "ridge", "river", "sage", "slate",
    "spark", "stone", "storm", "summit", "thorn", "tidal", "topaz", "vale",
    "willow", "wren",
];

/// Draws a fresh candidate room code. Uniqueness is the caller's
/// concern — retry on collision against the room registry.
pub fn room_code(rng: &mut impl Rng) -> RoomCode {
    let mut parts = Vec::with_capacity(3);
    for _ in 0..3 {
        // WORDS is non-empty, so choose never returns None.
        if let Some(word) = WORDS.choose(rng) {
            parts.push(*word);
        }
    }
    RoomCode::new(parts.join("-"))
}
