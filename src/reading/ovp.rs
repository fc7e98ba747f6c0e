/// Pivot split for RSVP display.
///
/// The highlighted letter sits at `floor(len / 2)`, counted in chars. This is a
/// fixed approximation of the optimal recognition point: it ignores glyph width,
/// vowel position and word length beyond the midpoint itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSplit<'a> {
    pub left: &'a str,
    pub pivot: &'a str,
    pub right: &'a str,
}

/// Splits a word into `left`, `pivot` and `right` around its midpoint.
///
/// An empty word yields three empty parts; the tokenizer never produces one.
pub fn split_at_midpoint(word: &str) -> WordSplit<'_> {
    let mid = word.chars().count() / 2;
    let mut boundaries = word.char_indices().map(|(i, _)| i).skip(mid);

    let Some(pivot_start) = boundaries.next() else {
        return WordSplit {
            left: word,
            pivot: "",
            right: "",
        };
    };
    let pivot_end = boundaries.next().unwrap_or(word.len());

    WordSplit {
        left: &word[..pivot_start],
        pivot: &word[pivot_start..pivot_end],
        right: &word[pivot_end..],
    }
}
