//! Block format check: nesting and indentation of lists, quotes, code fences
//! and math fences.
//!
//! The check is a single forward pass. Fences toggle their block state on every
//! occurrence, so the first fence of a kind opens a block and the next one
//! closes it. Indentation symmetry is verified on the closing fence, and
//! list/quote adjacency is verified on every line outside a block.
use crate::config::Config;
use crate::rule::{Violation, ViolationKind};
use crate::rules::block_utils::{
    CODE_FENCE, MATH_FENCE, indent_before, is_blank, is_list_marker, is_ordered_list_marker,
    is_sub_code_fence_marker, is_sub_list_marker, is_sub_math_fence_marker, is_sub_ordered_list_marker,
    is_sub_quote_marker,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockFormatConfig {
    /// Accept indented code fences as long as open and close match
    pub allow_code_indent: bool,
}

/// Mutable state of one document scan. Built fresh for every document.
#[derive(Debug)]
struct ScanState<'a> {
    previous_line: &'a str,
    line_number: usize,
    in_code_block: bool,
    in_math_block: bool,
    code_open_line: &'a str,
    math_open_line: &'a str,
}

impl<'a> ScanState<'a> {
    fn new() -> Self {
        Self {
            previous_line: "",
            line_number: 1,
            in_code_block: false,
            in_math_block: false,
            code_open_line: "",
            math_open_line: "",
        }
    }

    #[inline]
    fn inside_block(&self) -> bool {
        self.in_code_block || self.in_math_block
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockFormatChecker {
    config: BlockFormatConfig,
}

impl BlockFormatChecker {
    pub fn new(config: BlockFormatConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(BlockFormatConfig {
            allow_code_indent: config.global.allow_code_indent,
        })
    }

    pub fn name(&self) -> &'static str {
        "block-format"
    }

    /// Scan one document and return its violations in line order.
    ///
    /// Lines must keep their terminators. A block left open at the end of the
    /// document is not reported.
    pub fn check(&self, lines: &[&str]) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut state = ScanState::new();

        for &line in lines {
            if is_sub_code_fence_marker(line) {
                self.check_code_fence(&mut state, line, &mut violations);
            }

            if is_sub_math_fence_marker(line) {
                Self::check_math_fence(&mut state, line, &mut violations);
            }

            if !state.inside_block() {
                Self::check_adjacency(&state, line, &mut violations);
            }

            state.previous_line = line;
            state.line_number += 1;
        }

        if state.inside_block() {
            log::debug!(
                "[{}] document ends inside a {} block",
                self.name(),
                if state.in_code_block { "code" } else { "math" }
            );
        }

        violations
    }

    fn check_code_fence<'a>(&self, state: &mut ScanState<'a>, line: &'a str, violations: &mut Vec<Violation>) {
        state.in_code_block = !state.in_code_block;

        if state.in_code_block {
            state.code_open_line = line;
            return;
        }

        // Anchored to the last line inside the block
        let anchor = state.line_number - 1;
        let indent_in = indent_before(state.code_open_line, CODE_FENCE);
        let indent_out = indent_before(line, CODE_FENCE);

        if indent_in != indent_out {
            violations.push(Violation::new(
                anchor,
                state.code_open_line,
                line,
                ViolationKind::CodeError,
            ));
        }

        if !self.config.allow_code_indent && indent_in.len() + indent_out.len() > 0 {
            violations.push(Violation::new(
                anchor,
                state.code_open_line,
                line,
                ViolationKind::CodeIndentError,
            ));
        }

        if is_blank(state.previous_line) {
            violations.push(Violation::new(
                anchor,
                state.previous_line,
                line,
                ViolationKind::CodeBoundaryEmptyLineError,
            ));
        }
    }

    fn check_math_fence<'a>(state: &mut ScanState<'a>, line: &'a str, violations: &mut Vec<Violation>) {
        state.in_math_block = !state.in_math_block;

        if state.in_math_block {
            state.math_open_line = line;
            return;
        }

        if indent_before(state.math_open_line, MATH_FENCE) != indent_before(line, MATH_FENCE) {
            violations.push(Violation::new(
                state.line_number,
                state.math_open_line,
                line,
                ViolationKind::LatexError,
            ));
        }
    }

    fn check_adjacency(state: &ScanState<'_>, line: &str, violations: &mut Vec<Violation>) {
        let previous = state.previous_line;
        if is_blank(previous) {
            return;
        }

        if is_list_marker(line) || is_ordered_list_marker(line) {
            let continues_nested_context = is_sub_list_marker(previous)
                || is_sub_ordered_list_marker(previous)
                || is_sub_code_fence_marker(previous)
                || is_sub_math_fence_marker(previous);

            if !continues_nested_context {
                violations.push(Violation::new(state.line_number, previous, line, ViolationKind::ListError));
            }
        }

        if is_sub_quote_marker(line) && !is_sub_quote_marker(previous) {
            violations.push(Violation::new(state.line_number, previous, line, ViolationKind::QuoteError));
        }
    }
}
