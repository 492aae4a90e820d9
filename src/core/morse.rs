//! Text normalization and Morse encoding.

use crate::domain::model::WORD_SEPARATOR;
use std::collections::HashMap;
use std::sync::LazyLock;

static MORSE_TABLE: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ('A', ".-"),
        ('B', "-..."),
        ('C', "-.-."),
        ('D', "-.."),
        ('E', "."),
        ('F', "..-."),
        ('G', "--."),
        ('H', "...."),
        ('I', ".."),
        ('J', ".---"),
        ('K', "-.-"),
        ('L', ".-.."),
        ('M', "--"),
        ('N', "-."),
        ('O', "---"),
        ('P', ".--."),
        ('Q', "--.-"),
        ('R', ".-."),
        ('S', "..."),
        ('T', "-"),
        ('U', "..-"),
        ('V', "...-"),
        ('W', ".--"),
        ('X', "-..-"),
        ('Y', "-.--"),
        ('Z', "--.."),
        ('0', "-----"),
        ('1', ".----"),
        ('2', "..---"),
        ('3', "...--"),
        ('4', "....-"),
        ('5', "....."),
        ('6', "-...."),
        ('7', "--..."),
        ('8', "---.."),
        ('9', "----."),
        ('.', ".-.-.-"),
        (',', "--..--"),
        ('?', "..--.."),
        (' ', WORD_SEPARATOR),
    ])
});

/// Returns the code for an upper-case character, or `None` if it has no code.
pub fn lookup(c: char) -> Option<&'static str> {
    MORSE_TABLE.get(&c).copied()
}

pub fn is_supported(c: char) -> bool {
    MORSE_TABLE.contains_key(&c)
}

/// Upper-cases `text` and drops every character without a Morse code.
pub fn normalize(text: &str) -> String {
    text.to_uppercase().chars().filter(|c| is_supported(*c)).collect()
}

/// Encodes normalized text as space-separated codes, with `/` for each space.
///
/// Characters missing from the table encode to an empty code, so they still
/// take a slot between separators but sound nothing.
pub fn encode(normalized: &str) -> String {
    normalized
        .chars()
        .map(|c| lookup(c).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn encode_text(text: &str) -> String {
    encode(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_alphabet_digits_and_punctuation() {
        // 26 letters, 10 digits, three punctuation marks and the space.
        assert_eq!(MORSE_TABLE.len(), 40);
        assert!(('A'..='Z').chain('0'..='9').all(is_supported));
        assert!(['.', ',', '?', ' '].into_iter().all(is_supported));
        assert!(!is_supported('@'));
        assert!(!is_supported('a'));
    }

    #[test]
    fn test_every_code_matches_international_morse() {
        let expected = [
            ('A', ".-"), ('B', "-..."), ('C', "-.-."), ('D', "-.."), ('E', "."),
            ('F', "..-."), ('G', "--."), ('H', "...."), ('I', ".."), ('J', ".---"),
            ('K', "-.-"), ('L', ".-.."), ('M', "--"), ('N', "-."), ('O', "---"),
            ('P', ".--."), ('Q', "--.-"), ('R', ".-."), ('S', "..."), ('T', "-"),
            ('U', "..-"), ('V', "...-"), ('W', ".--"), ('X', "-..-"), ('Y', "-.--"),
            ('Z', "--.."),
            ('0', "-----"), ('1', ".----"), ('2', "..---"), ('3', "...--"), ('4', "....-"),
            ('5', "....."), ('6', "-...."), ('7', "--..."), ('8', "---.."), ('9', "----."),
            ('.', ".-.-.-"), (',', "--..--"), ('?', "..--.."), (' ', "/"),
        ];

        assert_eq!(expected.len(), MORSE_TABLE.len());
        for (c, code) in expected {
            assert_eq!(lookup(c), Some(code), "wrong code for {:?}", c);
        }
    }

    #[test]
    fn test_encode_single_characters() {
        assert_eq!(encode("A"), ".-");
        assert_eq!(encode("0"), "-----");
        assert_eq!(encode("?"), "..--..");
        assert_eq!(encode(","), "--..--");
        assert_eq!(encode("."), ".-.-.-");
    }

    #[test]
    fn test_space_encodes_to_word_separator() {
        let separator = encode(" ");
        assert_eq!(separator, WORD_SEPARATOR);
        assert!(MORSE_TABLE
            .iter()
            .filter(|(c, _)| **c != ' ')
            .all(|(_, code)| *code != separator));
    }

    #[test]
    fn test_normalize_drops_unsupported() {
        assert_eq!(normalize("A@B"), "AB");
        assert_eq!(normalize("@#"), "");
        assert_eq!(normalize("hello, world?"), "HELLO, WORLD?");
        assert_eq!(normalize("tab\there\nnewline"), "TABHERENEWLINE");
        assert_eq!(normalize("Straße"), "STRASSE");
    }

    #[test]
    fn test_encode_words() {
        assert_eq!(encode_text("sos"), "... --- ...");
        assert_eq!(encode_text("A B"), ".- / -...");
        assert_eq!(encode_text("a@b"), ".- -...");
        assert_eq!(encode(""), "");
    }

    #[test]
    fn test_unknown_character_encodes_empty() {
        assert_eq!(encode("A@B"), ".-  -...");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let text = "Breaking news, 2024?";
        assert_eq!(encode_text(text), encode_text(text));
    }
}
