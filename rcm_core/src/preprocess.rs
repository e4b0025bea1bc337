use std::borrow::Cow;
use std::ops::Range;

use serde::Serialize;

use crate::Position;
use crate::convert::Guard;
use crate::convert::convert_block;
use crate::convert::convert_inline;
use crate::marker::BlockDirective;
use crate::marker::InlineDirective;
use crate::marker::Marker;
use crate::position::LineTable;
use crate::scanner::scan_blocks;
use crate::scanner::scan_inline;

/// Rewrites template comments into HTML comments.
///
/// Block comments are converted first, then inline comments are converted in
/// the result. Inline comments written inside a block comment therefore end up
/// converted inside the block's HTML comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preprocessor {
	guard: Guard,
}

impl Preprocessor {
	pub fn new(guard: Guard) -> Self {
		Self { guard }
	}

	pub fn guard(&self) -> Guard {
		self.guard
	}

	pub fn process(&self, source: &str) -> String {
		let guard = self.guard;
		let blocks = scan_blocks(source);
		let intermediate = splice(source, &blocks, |span| &span.range, |span| {
			convert_block(span, guard)
		});

		let inline = scan_inline(&intermediate);
		let output = splice(&intermediate, &inline, |span| &span.range, |span| {
			convert_inline(span, guard)
		});

		output.into_owned()
	}
}

/// Rewrite every template comment in `source` using the Django guard.
///
/// ```rust
/// use rcm_core::transform;
///
/// assert_eq!(
/// 	transform("<p>{# todo: copy #}</p>"),
/// 	"<p>{% verbatim %}<!-- todo: copy -->{% endverbatim %}</p>"
/// );
/// assert_eq!(transform("{# !hide secret #}"), "{# !hide secret #}");
/// ```
pub fn transform(source: &str) -> String {
	Preprocessor::default().process(source)
}

/// Replace each span's range in `source` with its converted text. Spans must
/// be sorted and must not overlap.
fn splice<'a, S>(
	source: &'a str,
	spans: &[S],
	range: impl Fn(&S) -> &Range<usize>,
	convert: impl Fn(&S) -> Cow<'a, str>,
) -> Cow<'a, str> {
	if spans.is_empty() {
		return Cow::Borrowed(source);
	}

	let mut output = String::with_capacity(source.len());
	let mut cursor = 0;

	for span in spans {
		let range = range(span);
		output.push_str(&source[cursor..range.start]);
		output.push_str(&convert(span));
		cursor = range.end;
	}

	output.push_str(&source[cursor..]);
	Cow::Owned(output)
}

/// Which syntax a comment occurrence was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentForm {
	/// `{# ... #}`
	Inline,
	/// `{% comment %}...{% endcomment %}`
	Block,
}

/// A comment found by [`inspect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
	pub form: CommentForm,
	pub marker: Marker,
	/// The block note after marker removal. Always `None` for inline comments.
	pub note: Option<String>,
	/// The text that ends up inside the HTML comment, before escaping. Hidden
	/// comments report their content as written.
	pub content: String,
	pub position: Position,
}

/// List the comments in `source` without rewriting anything.
///
/// Block comments are reported first, in source order, followed by inline
/// comments. Inline comments inside a converted block become part of its HTML
/// comment and are not reported on their own. A hidden block is kept as
/// written, so the inline comments inside it are still rewritten and are
/// reported.
pub fn inspect(source: &str) -> Vec<Occurrence> {
	let table = LineTable::new(source);
	let blocks = scan_blocks(source);
	let mut occurrences = Vec::new();
	let mut converted_blocks = Vec::new();

	for span in &blocks {
		let directive = BlockDirective::parse(span.annotation);
		if directive.marker != Marker::Hide {
			converted_blocks.push(span.range.clone());
		}

		occurrences.push(Occurrence {
			form: CommentForm::Block,
			marker: directive.marker,
			note: directive.note.map(ToString::to_string),
			content: span.content.trim().to_string(),
			position: table.position(span.range.start, span.range.end),
		});
	}

	let inside_converted_block = |range: &Range<usize>| {
		converted_blocks
			.iter()
			.any(|block| range.start < block.end && block.start < range.end)
	};

	for span in scan_inline(source) {
		if inside_converted_block(&span.range) {
			continue;
		}

		let directive = InlineDirective::parse(span.content);
		occurrences.push(Occurrence {
			form: CommentForm::Inline,
			marker: directive.marker,
			note: None,
			content: directive.content.to_string(),
			position: table.position(span.range.start, span.range.end),
		});
	}

	occurrences
}
