use crate::{RandomSource, MAX_HINTS};
use std::collections::{BTreeSet, HashSet};

/// Letter selection for free reveals and paid hints.
pub struct HintEngine;

impl HintEngine {
    /// Distinct guessable letters of `word`, in alphabetical order.
    pub fn letters(word: &str) -> BTreeSet<char> {
        word.chars().filter(|c| *c != ' ').collect()
    }

    /// Letters of `word` that are not yet revealed.
    pub fn unrevealed_letters(word: &str, guessed: &HashSet<char>) -> Vec<char> {
        Self::letters(word)
            .into_iter()
            .filter(|c| !guessed.contains(c))
            .collect()
    }

    pub fn hints_remaining(hints_used: u32) -> u32 {
        MAX_HINTS.saturating_sub(hints_used)
    }

    pub fn quota_exhausted(hints_used: u32) -> bool {
        hints_used >= MAX_HINTS
    }

    /// Pick one unrevealed letter uniformly, or `None` if nothing is left.
    pub fn pick_hint_letter(
        word: &str,
        guessed: &HashSet<char>,
        rng: &mut dyn RandomSource,
    ) -> Option<char> {
        let unrevealed = Self::unrevealed_letters(word, guessed);
        if unrevealed.is_empty() {
            return None;
        }
        Some(unrevealed[rng.next_index(unrevealed.len())])
    }

    /// Choose up to `count` distinct letters by drawing positions of `word`
    /// and redrawing whenever the position holds a space or a letter that
    /// was already chosen.
    pub fn free_reveals(word: &str, count: usize, rng: &mut dyn RandomSource) -> Vec<char> {
        let chars: Vec<char> = word.chars().collect();
        let target = count.min(Self::letters(word).len());
        let mut revealed = Vec::with_capacity(target);

        while revealed.len() < target {
            let letter = chars[rng.next_index(chars.len())];
            if letter != ' ' && !revealed.contains(&letter) {
                revealed.push(letter);
            }
        }

        revealed
    }
}
