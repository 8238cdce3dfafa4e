// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MarkdownV2 escaping for the Telegram Bot API.
//!
//! Telegram's MarkdownV2 parse mode reserves 18 characters outside code
//! spans. Inline code (`` ` ``) and fenced code blocks (`` ``` ``) are
//! copied verbatim; everything else gets backslash-escaped.

/// Characters reserved by MarkdownV2 outside code spans.
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes text for Telegram MarkdownV2 parse mode.
///
/// Model output routinely contains code, so code spans are detected and
/// left untouched. An unclosed span runs to the end of the text verbatim.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find('`') {
            Some(start) => {
                let (plain, from_tick) = rest.split_at(start);
                escape_into(plain, &mut out);

                let fence = if from_tick.starts_with("```") { "```" } else { "`" };
                match from_tick[fence.len()..].find(fence) {
                    Some(end) => {
                        let span_len = fence.len() + end + fence.len();
                        out.push_str(&from_tick[..span_len]);
                        rest = &from_tick[span_len..];
                    }
                    None => {
                        // Unclosed code span: leave the remainder as-is.
                        out.push_str(from_tick);
                        rest = "";
                    }
                }
            }
            None => {
                escape_into(rest, &mut out);
                rest = "";
            }
        }
    }

    out
}

/// Escapes every reserved character in a non-code segment.
fn escape_into(segment: &str, out: &mut String) {
    for ch in segment.chars() {
        if RESERVED.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
}
