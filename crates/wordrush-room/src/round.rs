//! One round: the active secret word and its reveal mask, from
//! selection until someone guesses it (or it stalls fully revealed).

use rand::Rng;
use wordrush_lexicon::WordClue;
use wordrush_protocol::ServerMessage;

use crate::mask::{AllRevealed, RevealMask};

/// The active word, its clue, and the per-position reveal state.
#[derive(Debug, Clone)]
pub struct Round {
    clue: String,
    /// The secret, one element per letter position.
    letters: Vec<char>,
    /// The secret normalized the same way guesses are, computed once.
    normalized: String,
    mask: RevealMask,
}

/// Strips every non-alphabetic character and lowercases the rest.
/// Applied to both the guess and the secret before comparison.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Round {
    /// Starts a round with a freshly selected word and an all-hidden mask.
    pub fn new(word_clue: WordClue) -> Self {
        let letters: Vec<char> = word_clue.word.chars().collect();
        let mask = RevealMask::new(letters.len());
        Self {
            clue: word_clue.clue,
            normalized: normalize(&word_clue.word),
            letters,
            mask,
        }
    }

    /// The round's display clue.
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// Number of letter positions still hidden.
    pub fn unrevealed(&self) -> usize {
        self.mask.unrevealed()
    }

    /// Whether the guess matches the secret after normalization.
    pub fn matches(&self, guess: &str) -> bool {
        normalize(guess) == self.normalized
    }

    /// Reveals one more position, chosen uniformly among the hidden ones.
    ///
    /// # Errors
    /// [`AllRevealed`] if the word is fully exposed.
    pub fn reveal_next(&mut self, rng: &mut impl Rng) -> Result<usize, AllRevealed> {
        let pos = self.mask.next_reveal(rng)?;
        self.mask.reveal(pos);
        Ok(pos)
    }

    /// The masked word: one character per position, `_` for hidden,
    /// joined by single spaces.
    pub fn displayed(&self) -> String {
        let mut out = String::with_capacity(self.letters.len() * 2);
        for (pos, letter) in self.letters.iter().enumerate() {
            if pos > 0 {
                out.push(' ');
            }
            if self.mask.is_revealed(pos) {
                out.push(*letter);
            } else {
                out.push('_');
            }
        }
        out
    }

    /// The WordUpdate message describing the round's current view.
    pub fn word_update(&self) -> ServerMessage {
        ServerMessage::Word {
            clue: self.clue.clone(),
            displayed: self.displayed(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn round(word: &str) -> Round {
        Round::new(WordClue {
            word: word.into(),
            clue: "a clue".into(),
        })
    }

    #[test]
    fn test_new_round_is_fully_hidden() {
        let r = round("gopher");
        assert_eq!(r.unrevealed(), 6);
        assert_eq!(r.displayed(), "_ _ _ _ _ _");
    }

    #[test]
    fn test_guess_ignores_non_alphabetic_characters() {
        let r = round("gopher");
        assert!(r.matches("Gopher!!"));
        assert!(r.matches("go pher"));
        assert!(!r.matches("gopherx"));
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        let r = round("gopher");
        assert!(r.matches("GOPHER"));
        assert!(r.matches("gOpHeR"));
    }

    #[test]
    fn test_empty_guess_does_not_match() {
        let r = round("gopher");
        assert!(!r.matches(""));
        assert!(!r.matches("!!! ???"));
    }

    #[test]
    fn test_reveal_shows_the_letter_at_that_position() {
        let mut r = round("cat");
        let mut rng = StdRng::seed_from_u64(5);
        let pos = r.reveal_next(&mut rng).unwrap();
        let displayed = r.displayed();
        let shown: Vec<&str> = displayed.split(' ').collect();
        assert_eq!(shown.len(), 3);
        let expected = "cat".chars().nth(pos).unwrap().to_string();
        assert_eq!(shown[pos], expected);
        assert_eq!(shown.iter().filter(|s| **s == "_").count(), 2);
    }

    #[test]
    fn test_fully_revealed_displayed_has_no_underscores() {
        let mut r = round("owl");
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..3 {
            r.reveal_next(&mut rng).unwrap();
        }
        assert_eq!(r.unrevealed(), 0);
        assert_eq!(r.displayed(), "o w l");
        assert!(r.reveal_next(&mut rng).is_err());
    }

    #[test]
    fn test_word_update_shape() {
        let r = round("cat");
        match r.word_update() {
            ServerMessage::Word { clue, displayed } => {
                assert_eq!(clue, "a clue");
                assert_eq!(displayed, "_ _ _");
            }
            other => panic!("expected Word, got {other:?}"),
        }
    }
}
