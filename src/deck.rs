//! Flashcard deck and the "next card" picker.
//!
//! The deck is a fixed list of single Hanzi with an emoji hint. The selector
//! remembers only the index it showed last so two presses of "next" never land
//! on the same card (unless the deck has a single entry).

/// One flashcard: a single Hanzi plus a pictogram hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flashcard {
    pub character: &'static str,
    pub emoji: &'static str,
}

const fn card(character: &'static str, emoji: &'static str) -> Flashcard {
    Flashcard { character, emoji }
}

pub const DECK: &[Flashcard] = &[
    card("人", "🧑"), card("天", "☀️"), card("月", "🌙"), card("口", "👄"), card("耳", "👂"),
    card("眼", "👀"), card("鼻", "👃"), card("手", "✋"), card("腳", "🦶"), card("男", "👦"),
    card("女", "👧"), card("門", "🚪"), card("衣", "👕"), card("大", "🦒"), card("小", "🐜"),
    card("水", "💧"), card("魚", "🐟"), card("果", "🍎"), card("菜", "🥬"), card("米", "🍚"),
];

/// Picks cards at random from a deck, never repeating the previous pick.
#[derive(Debug, Clone)]
pub struct FlashcardSelector<'d> {
    deck: &'d [Flashcard],
    last_shown: Option<usize>,
}

impl<'d> FlashcardSelector<'d> {
    /// Returns `None` for an empty deck.
    pub fn new(deck: &'d [Flashcard]) -> Option<Self> {
        if deck.is_empty() {
            return None;
        }
        Some(Self { deck, last_shown: None })
    }

    pub fn last_shown(&self) -> Option<usize> {
        self.last_shown
    }

    /// Draw the next card. `rng(bound)` must return an index in `0..bound`.
    ///
    /// With a previous pick we draw from the `len - 1` other slots and step over
    /// the previous index, which keeps the choice uniform without a retry loop.
    pub fn draw_next(&mut self, mut rng: impl FnMut(usize) -> usize) -> &'d Flashcard {
        let len = self.deck.len();
        let idx = match self.last_shown {
            _ if len == 1 => 0,
            None => rng(len) % len,
            Some(prev) => {
                let i = rng(len - 1) % (len - 1);
                if i >= prev { i + 1 } else { i }
            }
        };
        self.last_shown = Some(idx);
        &self.deck[idx]
    }
}

/// Index in `0..bound` from the browser's crypto source.
///
/// A random `u32` reduced modulo `bound`, so smaller indices are favoured by at
/// most `bound / 2^32`. Negligible for a deck of a few dozen cards.
#[cfg(feature = "rng")]
pub fn random_index(bound: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as usize % bound,
        Err(err) => {
            tracing::debug!(%err, "getrandom unavailable, using clock index");
            clock_index(bound)
        }
    }
}

#[cfg(not(feature = "rng"))]
pub fn random_index(bound: usize) -> usize {
    clock_index(bound)
}

fn clock_index(bound: usize) -> usize {
    if bound == 0 {
        return 0;
    }
    let now = crate::performance_now();
    // Linear transform and modulus; good enough to shuffle flashcards.
    (now as u64 as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
        % bound
}
