//! Extraction of words from raw text tokens.
//!
//! A word starts at the first letter, digit or backslash of a token, or at a
//! hyphen directly followed by a digit. It then runs over letters and digits,
//! plus a few punctuation marks when their neighbors make them part of the
//! word:
//!
//! | mark  | kept when                                          |
//! |-------|----------------------------------------------------|
//! | `\`   | followed by a letter or digit                      |
//! | `'`   | followed by a letter                               |
//! | `-`   | between two letters, or followed by a digit        |
//! | `.`   | between two letters or digits                      |
//! | `,`   | between two digits                                 |
//! | `:`   | between two digits                                 |
//! | `::`  | between two letters or digits                      |
//!
//! Letters are lower-cased. Anything outside ASCII is junk.
//!
//! # Examples
//!
//! ```
//! use llrb_tree::wordify::{tokens, wordify};
//!
//! assert_eq!(wordify("\"Don't!\""), "don't");
//! assert_eq!(wordify("1,000.50)"), "1,000.50");
//! assert_eq!(wordify("std::swap()"), "std::swap");
//!
//! let words: Vec<_> = tokens("Rock-n-roll -- e.g. at 12:30!").collect();
//! assert_eq!(words, ["rock-n-roll", "e.g", "at", "12:30"]);
//! ```

use alloc::string::String;

fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_letter_or_digit(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Reads `text` one byte at a time, with NUL past either end.
struct Cursor<'a> {
    text: &'a [u8],
}

impl Cursor<'_> {
    fn at(&self, index: usize) -> u8 {
        self.text.get(index).copied().unwrap_or(0)
    }

    fn before(&self, index: usize, distance: usize) -> u8 {
        index.checked_sub(distance).map_or(0, |i| self.at(i))
    }

    fn starts_word(&self, index: usize) -> bool {
        let b = self.at(index);
        is_letter_or_digit(b) || b == b'\\' || (b == b'-' && is_digit(self.at(index + 1)))
    }

    fn keeps(&self, index: usize) -> bool {
        let (prev, b, next) = (self.before(index, 1), self.at(index), self.at(index + 1));
        match b {
            _ if is_letter_or_digit(b) => true,
            b'\\' => is_letter_or_digit(next),
            b'\'' => is_letter(next),
            b'-' => (is_letter(prev) && is_letter(next)) || is_digit(next),
            b'.' => is_letter_or_digit(prev) && is_letter_or_digit(next),
            b',' => is_digit(prev) && is_digit(next),
            b':' => {
                (is_digit(prev) && is_digit(next))
                    || (next == b':' && is_letter_or_digit(prev) && is_letter_or_digit(self.at(index + 2)))
                    || (prev == b':' && is_letter_or_digit(next) && is_letter_or_digit(self.before(index, 2)))
            }
            _ => false,
        }
    }
}

/// Returns the first word of `raw`, lower-cased, or an empty string if `raw`
/// holds none.
///
/// The word ends at the first byte that cannot continue it. A hyphen that
/// cannot continue the word simply ends it; any other stop discards the whole
/// word unless the byte before it is a letter or digit.
#[must_use]
pub fn wordify(raw: &str) -> String {
    let cursor = Cursor { text: raw.as_bytes() };
    let mut word = String::new();
    let Some(start) = (0..cursor.text.len()).find(|&i| cursor.starts_word(i)) else {
        return word;
    };
    let mut index = start;
    while index == start || cursor.keeps(index) {
        word.push(char::from(cursor.at(index).to_ascii_lowercase()));
        index += 1;
    }
    if cursor.at(index) != b'-' && !is_letter_or_digit(cursor.before(index, 1)) {
        word.clear();
    }
    word
}

/// Splits `line` on whitespace and yields the word of every token that has one.
pub fn tokens(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().map(wordify).filter(|word| !word.is_empty())
}
