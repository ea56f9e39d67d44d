// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use colored::Colorize;

const HL_TEXT: &str = "bright yellow";
const HL_BG: &str = "red";

pub trait HighlightExt {
    fn highlight_list_pos(&self, list_pos: &[(usize, usize)]) -> String;
}

impl HighlightExt for str {
    /// Highlight multiple substrings from `start` to `end` (byte positions).
    ///
    /// Positions must be sorted; overlapping positions are skipped.
    fn highlight_list_pos(&self, list_pos: &[(usize, usize)]) -> String {
        let mut result = String::new();
        let mut pos = 0;
        for (start, end) in list_pos {
            if *start < pos {
                continue;
            }
            result.push_str(&self[pos..*start]);
            result.push_str(
                &self[*start..*end]
                    .color(HL_TEXT)
                    .bold()
                    .on_color(HL_BG)
                    .to_string(),
            );
            pos = *end;
        }
        result.push_str(&self[pos..]);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_list_pos() {
        assert_eq!(
            "%1 and <b>%2</b>".highlight_list_pos(&[(0, 2), (10, 12)]),
            "%1".color(HL_TEXT).bold().on_color(HL_BG).to_string()
                + " and <b>"
                + &"%2".color(HL_TEXT).bold().on_color(HL_BG).to_string()
                + "</b>"
        );
    }

    #[test]
    fn test_highlight_overlap() {
        assert_eq!(
            "abcdef".highlight_list_pos(&[(1, 4), (2, 3)]),
            "a".to_string() + &"bcd".color(HL_TEXT).bold().on_color(HL_BG).to_string() + "ef"
        );
    }

    #[test]
    fn test_highlight_none() {
        assert_eq!("abc".highlight_list_pos(&[]), "abc");
    }
}
