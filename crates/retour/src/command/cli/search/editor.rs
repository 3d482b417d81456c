//! Cursor-aware editing of the filter text.
//!
//! Every function takes the current text and a cursor position and returns
//! the edited text with the new cursor position. Positions count characters,
//! not bytes, and out-of-range positions are clamped to the text.

/// Number of characters in `text`, the largest valid cursor position.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Returns the byte index of the character at position `pos`.
///
/// Since each character in a string can contain multiple bytes, it's necessary to calculate
/// the byte index based on the index of the character.
fn byte_index(text: &str, pos: usize) -> usize {
    text.char_indices()
        .map(|(i, _)| i)
        .nth(pos)
        .unwrap_or(text.len())
}

/// Split `text` into the parts before and after the cursor at `pos`.
pub fn split_at_cursor(text: &str, pos: usize) -> (&str, &str) {
    text.split_at(byte_index(text, pos))
}

/// Splice `inserted` into `text` at `pos`; the cursor lands after the inserted text.
pub fn insert_at(text: &str, pos: usize, inserted: &str) -> (String, usize) {
    let pos = pos.min(char_len(text));
    let idx = byte_index(text, pos);

    let mut edited = String::with_capacity(text.len() + inserted.len());
    edited.push_str(&text[..idx]);
    edited.push_str(inserted);
    edited.push_str(&text[idx..]);
    (edited, pos + char_len(inserted))
}

/// Remove the character immediately before `pos`. No-op at position 0.
pub fn delete_before_cursor(text: &str, pos: usize) -> (String, usize) {
    let pos = pos.min(char_len(text));
    if pos == 0 {
        return (text.to_owned(), 0);
    }
    delete_range(text, pos - 1, pos)
}

/// Remove the characters in `[from, to)`; the cursor moves to `from`.
///
/// Both bounds are clamped to the text. When `from >= to` nothing is removed
/// and the cursor stays at the clamped `to`.
pub fn delete_range(text: &str, from: usize, to: usize) -> (String, usize) {
    let len = char_len(text);
    let (from, to) = (from.min(len), to.min(len));
    if from >= to {
        return (text.to_owned(), to);
    }

    let (start, end) = (byte_index(text, from), byte_index(text, to));
    let mut edited = String::with_capacity(text.len() - (end - start));
    edited.push_str(&text[..start]);
    edited.push_str(&text[end..]);
    (edited, from)
}

/// Remove everything from `pos` to the end of the text; the cursor stays put.
pub fn delete_to_end(text: &str, pos: usize) -> (String, usize) {
    let pos = pos.min(char_len(text));
    let idx = byte_index(text, pos);
    (text[..idx].to_owned(), pos)
}

/// Start of the word before `pos`, as used by "delete previous word".
///
/// Skips the spaces directly before `pos`, then the run of non-space
/// characters before those.
pub fn word_start_before(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = pos.min(chars.len());

    while pos > 0 && chars[pos - 1] == ' ' {
        pos -= 1;
    }
    while pos > 0 && chars[pos - 1] != ' ' {
        pos -= 1;
    }
    pos
}
