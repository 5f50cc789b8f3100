//! The reveal mask: per-position hidden/revealed state of the active
//! word, plus the schedule that picks which letter is shown next.

use rand::Rng;

/// Precondition violation: every position is already revealed.
///
/// Callers are expected to check [`RevealMask::unrevealed`] (or stop the
/// timer, as the engine does) before asking for another reveal.
#[derive(Debug, thiserror::Error)]
#[error("all positions already revealed")]
pub struct AllRevealed;

/// One boolean per letter position: `false` = hidden, `true` = revealed.
///
/// The hidden count is maintained incrementally — never recomputed by
/// scanning — so bookkeeping stays O(1) per reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealMask {
    revealed: Vec<bool>,
    unrevealed: usize,
}

impl RevealMask {
    /// An all-hidden mask of the given length.
    pub fn new(len: usize) -> Self {
        Self {
            revealed: vec![false; len],
            unrevealed: len,
        }
    }

    /// Number of positions in the mask.
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    /// Whether the mask has zero positions.
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Number of positions still hidden.
    pub fn unrevealed(&self) -> usize {
        self.unrevealed
    }

    /// Whether the position is revealed.
    pub fn is_revealed(&self, pos: usize) -> bool {
        self.revealed[pos]
    }

    /// Picks the position to reveal next: uniform among the currently
    /// hidden positions, so every hidden letter is equally likely
    /// regardless of how many are already shown.
    ///
    /// Draws an integer in `[0, unrevealed)` and walks the mask counting
    /// hidden positions until the draw is reached. Does not mutate.
    ///
    /// # Errors
    /// [`AllRevealed`] if nothing is hidden.
    pub fn next_reveal(&self, rng: &mut impl Rng) -> Result<usize, AllRevealed> {
        if self.unrevealed == 0 {
            return Err(AllRevealed);
        }
        let draw = rng.random_range(0..self.unrevealed);
        let mut hidden_seen = 0;
        for (pos, revealed) in self.revealed.iter().enumerate() {
            if !revealed {
                if hidden_seen == draw {
                    return Ok(pos);
                }
                hidden_seen += 1;
            }
        }
        unreachable!("draw < unrevealed count")
    }

    /// Marks a position revealed, decrementing the hidden count exactly
    /// once. Revealing an already-revealed position is a no-op.
    pub fn reveal(&mut self, pos: usize) {
        debug_assert!(!self.revealed[pos], "position {pos} revealed twice");
        if !self.revealed[pos] {
            self.revealed[pos] = true;
            self.unrevealed -= 1;
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
