//! Character frequency analysis over a request body
//!
//! Used by the chunked-transfer test pages to show that the reassembled body
//! has the expected character distribution.

use std::collections::HashMap;

/// Bodies with this many characters or fewer are not analysed
pub const ANALYSIS_THRESHOLD: usize = 100;

/// Number of entries kept in a report
pub const TOP_ENTRIES: usize = 10;

/// How a counted character is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharLabel {
    Printable(char),
    Space,
    Newline,
    /// Counted and ranked, but not displayed
    Hidden,
}

impl CharLabel {
    fn for_char(ch: char) -> Self {
        match ch {
            ' ' => CharLabel::Space,
            '\n' => CharLabel::Newline,
            c if c.is_whitespace() || c.is_control() || is_invisible(c) => CharLabel::Hidden,
            c => CharLabel::Printable(c),
        }
    }
}

/// Format characters (Cf), private use (Co) and noncharacters
fn is_invisible(ch: char) -> bool {
    let cp = ch as u32;
    matches!(
        cp,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
            | 0xE000..=0xF8FF
            | 0xF0000..=0xFFFFD
            | 0x100000..=0x10FFFD
            | 0xFDD0..=0xFDEF
    ) || cp & 0xFFFE == 0xFFFE
}

/// One ranked character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub ch: char,
    pub count: usize,
}

impl CharCount {
    pub fn label(&self) -> CharLabel {
        CharLabel::for_char(self.ch)
    }
}

/// Most frequent characters, by descending count. Ties keep the order in
/// which the characters first appear in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharFrequencyReport {
    entries: Vec<CharCount>,
}

impl CharFrequencyReport {
    /// Analyse `text`, or `None` if it is at or below the threshold
    pub fn analyze(text: &str) -> Option<Self> {
        if text.chars().count() <= ANALYSIS_THRESHOLD {
            return None;
        }
        Some(Self::tally(text, TOP_ENTRIES))
    }

    fn tally(text: &str, keep: usize) -> Self {
        let mut slots: HashMap<char, usize> = HashMap::new();
        let mut entries: Vec<CharCount> = Vec::new();

        for ch in text.chars() {
            match slots.get(&ch) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    slots.insert(ch, entries.len());
                    entries.push(CharCount { ch, count: 1 });
                }
            }
        }

        // sort_by is stable, so first-occurrence order survives among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(keep);
        Self { entries }
    }

    /// Ranked entries, including hidden characters
    pub fn entries(&self) -> &[CharCount] {
        &self.entries
    }

    /// Ranked entries that are displayed
    pub fn visible(&self) -> impl Iterator<Item = (CharLabel, usize)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.label(), entry.count))
            .filter(|(label, _)| *label != CharLabel::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_is_not_analysed() {
        assert!(CharFrequencyReport::analyze(&"x".repeat(100)).is_none());
        assert!(CharFrequencyReport::analyze(&"x".repeat(101)).is_some());
    }

    #[test]
    fn test_single_character_body() {
        let report = CharFrequencyReport::analyze(&"a".repeat(600)).unwrap();
        assert_eq!(report.entries(), &[CharCount { ch: 'a', count: 600 }]);
    }

    #[test]
    fn test_top_entries_are_non_increasing() {
        let mut text = String::new();
        for (i, ch) in "abcdefghijklmnop".chars().enumerate() {
            text.push_str(&ch.to_string().repeat(i + 1));
        }
        let report = CharFrequencyReport::analyze(&text).unwrap();

        assert_eq!(report.entries().len(), TOP_ENTRIES);
        assert_eq!(report.entries()[0], CharCount { ch: 'p', count: 16 });
        assert!(report.entries().windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let text = "zyx".repeat(40);
        let report = CharFrequencyReport::analyze(&text).unwrap();
        let order: Vec<char> = report.entries().iter().map(|e| e.ch).collect();
        assert_eq!(order, vec!['z', 'y', 'x']);
    }

    #[test]
    fn test_labels() {
        let text = format!("{}{}{}{}", "a".repeat(50), " ".repeat(40), "\n".repeat(30), "\t".repeat(20));
        let report = CharFrequencyReport::analyze(&text).unwrap();

        assert_eq!(report.entries().len(), 4);
        let visible: Vec<_> = report.visible().collect();
        assert_eq!(
            visible,
            vec![
                (CharLabel::Printable('a'), 50),
                (CharLabel::Space, 40),
                (CharLabel::Newline, 30),
            ]
        );
    }

    #[test]
    fn test_format_characters_are_hidden() {
        let text = format!("{}{}", "\u{200B}".repeat(60), "a".repeat(50));
        let report = CharFrequencyReport::analyze(&text).unwrap();

        assert_eq!(report.entries()[0], CharCount { ch: '\u{200B}', count: 60 });
        assert_eq!(report.entries()[0].label(), CharLabel::Hidden);
        assert_eq!(report.visible().collect::<Vec<_>>(), vec![(CharLabel::Printable('a'), 50)]);

        for ch in ['\u{00AD}', '\u{FEFF}', '\u{E000}', '\u{2028}', '\u{3000}', '\u{FFFF}'] {
            assert_eq!(CharLabel::for_char(ch), CharLabel::Hidden, "U+{:04X}", ch as u32);
        }
        assert_eq!(CharLabel::for_char('é'), CharLabel::Printable('é'));
        assert_eq!(CharLabel::for_char('👋'), CharLabel::Printable('👋'));
    }
}
