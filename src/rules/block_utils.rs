//! Line classifiers for the block format check.
//!
//! Every predicate looks at one raw line, terminator included. The plain form
//! only matches a marker at column zero; the `is_sub_*` form matches the same
//! marker after leading whitespace has been stripped, which is how nested
//! content (a fence inside a list item, a quote inside a quote) is recognised.

/// Opening/closing token of a fenced code block
pub const CODE_FENCE: &str = "```";

/// Opening/closing token of a display math block
pub const MATH_FENCE: &str = "$$";

const BULLET_PREFIXES: [&str; 3] = ["* ", "- ", "+ "];
const BARE_BULLETS: [&str; 3] = ["*\n", "-\n", "+\n"];

#[inline]
fn strip_indent(line: &str) -> &str {
    line.trim_start()
}

/// True if the line is empty or only whitespace
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the part of `line` before the first occurrence of `token`.
///
/// When the token is absent the whole line is returned.
pub fn indent_before<'a>(line: &'a str, token: &str) -> &'a str {
    match line.find(token) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// `* item`, `- item`, `+ item`, or a bare marker followed by the terminator
pub fn is_list_marker(line: &str) -> bool {
    BULLET_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) || BARE_BULLETS.contains(&line)
}

/// Digits followed by `". "`, e.g. `3. item`
pub fn is_ordered_list_marker(line: &str) -> bool {
    let number = line.split_once(". ").map_or(line, |(head, _)| head);
    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
}

pub fn is_quote_marker(line: &str) -> bool {
    line.starts_with("> ") || line == ">\n"
}

/// Anything may follow the backticks (usually a language tag)
pub fn is_code_fence_marker(line: &str) -> bool {
    line.starts_with(CODE_FENCE)
}

pub fn is_math_fence_marker(line: &str) -> bool {
    line.starts_with(MATH_FENCE)
}

pub fn is_sub_list_marker(line: &str) -> bool {
    is_list_marker(strip_indent(line))
}

pub fn is_sub_ordered_list_marker(line: &str) -> bool {
    is_ordered_list_marker(strip_indent(line))
}

pub fn is_sub_quote_marker(line: &str) -> bool {
    is_quote_marker(strip_indent(line))
}

pub fn is_sub_code_fence_marker(line: &str) -> bool {
    is_code_fence_marker(strip_indent(line))
}

pub fn is_sub_math_fence_marker(line: &str) -> bool {
    is_math_fence_marker(strip_indent(line))
}

/// An indented code fence that is not also a flush-left one
pub fn is_strict_sub_code_fence_marker(line: &str) -> bool {
    is_sub_code_fence_marker(line) && !is_code_fence_marker(line)
}

/// An indented math fence that is not also a flush-left one
pub fn is_strict_sub_math_fence_marker(line: &str) -> bool {
    is_sub_math_fence_marker(line) && !is_math_fence_marker(line)
}
