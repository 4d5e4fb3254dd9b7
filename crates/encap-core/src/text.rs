//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Line/column values of 0 are treated as 1 (defensive clamping)
//!
//! Columns count Unicode scalar values (chars), not bytes, so positions
//! reported to users stay meaningful for non-ASCII source.

// ============================================================================
// Position Conversions
// ============================================================================

/// Convert a byte offset to 1-indexed line and column.
///
/// Columns count Unicode scalar values (chars), not bytes.
///
/// # Arguments
///
/// * `content` - The file content as a string
/// * `offset` - The byte offset (0-indexed)
///
/// # Returns
///
/// A `(line, col)` tuple where both are 1-indexed.
/// If `offset` exceeds content length, returns position at end of content.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let target = offset;
    let mut line = 1u32;
    let mut col = 1u32;
    let mut current_offset = 0usize;

    for ch in content.chars() {
        if current_offset >= target {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
        current_offset += ch.len_utf8();
    }

    (line, col)
}

/// Convert 1-indexed line and column to byte offset.
///
/// Columns count Unicode scalar values (chars), not bytes.
///
/// # Arguments
///
/// * `content` - The file content as a string
/// * `line` - The 1-indexed line number
/// * `col` - The 1-indexed column number
///
/// # Returns
///
/// The byte offset into the string. If the position is beyond the content,
/// returns the content length.
pub fn position_to_byte_offset(content: &str, line: u32, col: u32) -> usize {
    let line = line.max(1);
    let col = col.max(1);

    let mut current_line = 1u32;

    for (i, ch) in content.char_indices() {
        if current_line == line {
            // Found the line, now count columns
            let mut current_col = 1u32;
            for (j, c) in content[i..].char_indices() {
                if current_col == col {
                    return i + j;
                }
                if c == '\n' {
                    break;
                }
                current_col += 1;
            }
            // Column beyond end of line - clamp to end
            let line_end = content[i..]
                .find('\n')
                .map(|p| i + p)
                .unwrap_or(content.len());
            return line_end;
        }
        if ch == '\n' {
            current_line += 1;
        }
    }

    // Line not found - return end of content
    content.len()
}

// ============================================================================
// Line Utilities
// ============================================================================

/// Get the byte offset of the start of a line.
///
/// Returns the offset of the first character on the given 1-indexed line.
/// Returns `None` if the line doesn't exist or has no content.
pub fn line_start_offset(content: &str, line: u32) -> Option<usize> {
    if line == 0 {
        return None;
    }
    if line == 1 {
        return if content.is_empty() { None } else { Some(0) };
    }

    let mut current_line = 1u32;
    for (i, ch) in content.char_indices() {
        if ch == '\n' {
            current_line += 1;
            if current_line == line {
                // Check if there's content after this newline
                if i + 1 < content.len() {
                    return Some(i + 1);
                } else {
                    return None; // Line exists but has no content (trailing newline)
                }
            }
        }
    }
    None
}

/// Extract the text of a 1-indexed line, without its trailing newline.
///
/// Returns `None` if the line doesn't exist.
pub fn extract_line(content: &str, line: u32) -> Option<&str> {
    let start = line_start_offset(content, line)?;
    let end = content[start..]
        .find('\n')
        .map(|p| start + p)
        .unwrap_or(content.len());
    Some(&content[start..end])
}

/// Count the number of lines in the content.
pub fn line_count(content: &str) -> u32 {
    let newlines = content.bytes().filter(|&b| b == b'\n').count() as u32;
    if content.is_empty() {
        0
    } else if content.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod position_tests {
        use super::*;

        #[test]
        fn offset_to_position_simple() {
            let content = "line1\nline2\nline3\n";
            assert_eq!(byte_offset_to_position(content, 0), (1, 1));
            assert_eq!(byte_offset_to_position(content, 4), (1, 5));
            assert_eq!(byte_offset_to_position(content, 5), (1, 6)); // newline char
            assert_eq!(byte_offset_to_position(content, 6), (2, 1));
            assert_eq!(byte_offset_to_position(content, 12), (3, 1));
        }

        #[test]
        fn offset_to_position_clamps_past_end() {
            let content = "short";
            assert_eq!(byte_offset_to_position(content, 100), (1, 6));
        }

        #[test]
        fn offset_to_position_empty() {
            assert_eq!(byte_offset_to_position("", 0), (1, 1));
            assert_eq!(byte_offset_to_position("", 10), (1, 1));
        }

        #[test]
        fn offset_to_position_multibyte() {
            // "héllo" - é is 2 bytes, so 'l' starts at byte 3 but col 3
            let content = "héllo\nworld";
            assert_eq!(byte_offset_to_position(content, 3), (1, 3));
            assert_eq!(byte_offset_to_position(content, 7), (2, 1));
        }

        #[test]
        fn position_to_offset_simple() {
            let content = "line1\nline2\n";
            assert_eq!(position_to_byte_offset(content, 1, 1), 0);
            assert_eq!(position_to_byte_offset(content, 1, 5), 4);
            assert_eq!(position_to_byte_offset(content, 2, 1), 6);
            assert_eq!(position_to_byte_offset(content, 2, 3), 8);
        }

        #[test]
        fn position_to_offset_clamps() {
            let content = "ab\ncd";
            // Column past end of line clamps to line end
            assert_eq!(position_to_byte_offset(content, 1, 50), 2);
            // Line past end clamps to content length
            assert_eq!(position_to_byte_offset(content, 9, 1), 5);
            // Zero coordinates are treated as 1
            assert_eq!(position_to_byte_offset(content, 0, 0), 0);
        }

        #[test]
        fn position_offset_round_trip() {
            let content = "package main\n\nfunc f() {\n\treturn\n}\n";
            for offset in [0, 5, 13, 14, 25, 30] {
                let (line, col) = byte_offset_to_position(content, offset);
                assert_eq!(position_to_byte_offset(content, line, col), offset);
            }
        }
    }

    mod line_tests {
        use super::*;

        #[test]
        fn line_start_offsets() {
            let content = "aa\nbb\ncc";
            assert_eq!(line_start_offset(content, 1), Some(0));
            assert_eq!(line_start_offset(content, 2), Some(3));
            assert_eq!(line_start_offset(content, 3), Some(6));
            assert_eq!(line_start_offset(content, 4), None);
            assert_eq!(line_start_offset(content, 0), None);
        }

        #[test]
        fn line_start_offset_trailing_newline() {
            let content = "aa\n";
            assert_eq!(line_start_offset(content, 1), Some(0));
            assert_eq!(line_start_offset(content, 2), None);
        }

        #[test]
        fn extract_line_simple() {
            let content = "first\nsecond\nthird\n";
            assert_eq!(extract_line(content, 1), Some("first"));
            assert_eq!(extract_line(content, 2), Some("second"));
            assert_eq!(extract_line(content, 3), Some("third"));
            assert_eq!(extract_line(content, 4), None);
        }

        #[test]
        fn extract_line_no_trailing_newline() {
            let content = "only";
            assert_eq!(extract_line(content, 1), Some("only"));
        }

        #[test]
        fn line_counts() {
            assert_eq!(line_count(""), 0);
            assert_eq!(line_count("a"), 1);
            assert_eq!(line_count("a\n"), 1);
            assert_eq!(line_count("a\nb"), 2);
            assert_eq!(line_count("a\nb\n"), 2);
        }
    }
}
