use std::ops::Range;

use crate::lexer::lex_closing_tag;
use crate::lexer::lex_opening_tag;
use crate::lexer::memstr;

const TAG_OPEN: &[u8] = b"{%";
const INLINE_OPEN: &[u8] = b"{#";
const INLINE_CLOSE: &[u8] = b"#}";

/// A `{% comment %}...{% endcomment %}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan<'a> {
	/// Byte range of the whole occurrence, from `{%` to the final `%}`.
	pub range: Range<usize>,
	/// The full matched text.
	pub text: &'a str,
	/// The annotation between the quotes of the opening tag, if any.
	pub annotation: Option<&'a str>,
	/// Everything between the opening and closing tags, untrimmed.
	pub content: &'a str,
}

/// A `{# ... #}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan<'a> {
	/// Byte range of the whole occurrence, from `{#` to `#}`.
	pub range: Range<usize>,
	/// The full matched text.
	pub text: &'a str,
	/// The text between the delimiters with surrounding whitespace removed.
	pub content: &'a str,
}

/// Find every block comment in `source`, left to right and without overlap.
///
/// The first `{% endcomment %}` after an opening tag closes it, so block
/// comments do not nest. An opening tag without any closing tag after it is
/// left alone, and so is every opening tag after it.
pub fn scan_blocks(source: &str) -> Vec<BlockSpan<'_>> {
	let bytes = source.as_bytes();
	let mut spans = Vec::new();
	let mut search_from = 0;

	while let Some(found) = memstr(&bytes[search_from..], TAG_OPEN) {
		let open_start = search_from + found;

		let Some(opening) = lex_opening_tag(source, open_start) else {
			search_from = open_start + 1;
			continue;
		};

		let Some((close_start, close_end)) = find_closing_tag(source, opening.end) else {
			break;
		};

		spans.push(BlockSpan {
			range: open_start..close_end,
			text: &source[open_start..close_end],
			annotation: opening.annotation.map(|range| &source[range]),
			content: &source[opening.end..close_start],
		});

		search_from = close_end;
	}

	spans
}

/// Find the first `{% endcomment %}` at or after `from`, returning the byte
/// offsets of its `{%` and just past its `%}`.
fn find_closing_tag(source: &str, from: usize) -> Option<(usize, usize)> {
	let bytes = source.as_bytes();
	let mut search_from = from;

	while let Some(found) = memstr(&bytes[search_from..], TAG_OPEN) {
		let close_start = search_from + found;

		if let Some(close_end) = lex_closing_tag(source, close_start) {
			return Some((close_start, close_end));
		}

		search_from = close_start + 1;
	}

	None
}

/// Find every inline comment in `source`, left to right and without overlap.
///
/// The first `#}` after `{#` ends the comment, and the comment may span
/// several lines.
pub fn scan_inline(source: &str) -> Vec<InlineSpan<'_>> {
	let bytes = source.as_bytes();
	let mut spans = Vec::new();
	let mut search_from = 0;

	while let Some(found) = memstr(&bytes[search_from..], INLINE_OPEN) {
		let open_start = search_from + found;
		let inner_start = open_start + INLINE_OPEN.len();

		let Some(close) = memstr(&bytes[inner_start..], INLINE_CLOSE) else {
			break;
		};
		let close_start = inner_start + close;
		let close_end = close_start + INLINE_CLOSE.len();

		spans.push(InlineSpan {
			range: open_start..close_end,
			text: &source[open_start..close_end],
			content: source[inner_start..close_start].trim(),
		});

		search_from = close_end;
	}

	spans
}
