use std::ops::Range;

use logos::Logos;

/// Tokens found between `{%` and `%}` in a block comment tag.
#[derive(Logos, Debug, PartialEq)]
enum TagToken {
	#[token("comment")]
	Comment,
	#[token("endcomment")]
	EndComment,
	#[token("%}")]
	TagClose,
	#[regex(r"\s+")]
	Whitespace,
	#[regex(r#"["'][^"']*["']"#)]
	Annotation,
}

/// Where the lexer is inside an opening `{% comment "..." %}` tag.
enum OpeningContext {
	/// Directly after `{%`, only whitespace may precede the tag name.
	Start,
	/// After the `comment` keyword.
	Keyword,
	/// After whitespace following the keyword; an annotation may start here.
	KeywordSpace,
	/// After the quoted annotation.
	Annotation,
	/// After whitespace following the annotation.
	AnnotationSpace,
}

/// A recognized `{% comment %}` or `{% comment "annotation" %}` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpeningTag {
	/// Byte offset just past the closing `%}`.
	pub end: usize,
	/// Byte range of the annotation text without its quotes.
	pub annotation: Option<Range<usize>>,
}

/// Recognize an opening block comment tag whose `{%` starts at `start`.
///
/// Returns `None` when the text at `start` is not an opening tag, e.g. for
/// `{% commentary %}`, `{% comment"note" %}` or `{% comment "a" "b" %}`.
pub(crate) fn lex_opening_tag(source: &str, start: usize) -> Option<OpeningTag> {
	let offset = start + 2;
	let mut lexer = TagToken::lexer(source.get(offset..)?);
	let mut context = OpeningContext::Start;
	let mut annotation = None;

	while let Some(token) = lexer.next() {
		let Ok(token) = token else {
			return None;
		};

		context = match (context, token) {
			(OpeningContext::Start, TagToken::Whitespace) => OpeningContext::Start,
			(OpeningContext::Start, TagToken::Comment) => OpeningContext::Keyword,
			(OpeningContext::Keyword, TagToken::Whitespace) => OpeningContext::KeywordSpace,
			(OpeningContext::KeywordSpace, TagToken::Annotation) => {
				let span = lexer.span();
				// Strip the surrounding quote characters.
				annotation = Some(offset + span.start + 1..offset + span.end - 1);
				OpeningContext::Annotation
			}
			(OpeningContext::Annotation, TagToken::Whitespace) => OpeningContext::AnnotationSpace,
			(
				OpeningContext::Keyword
				| OpeningContext::KeywordSpace
				| OpeningContext::Annotation
				| OpeningContext::AnnotationSpace,
				TagToken::TagClose,
			) => {
				return Some(OpeningTag {
					end: offset + lexer.span().end,
					annotation,
				});
			}
			_ => return None,
		};
	}

	None
}

/// Recognize a closing `{% endcomment %}` tag whose `{%` starts at `start`,
/// returning the byte offset just past its `%}`.
pub(crate) fn lex_closing_tag(source: &str, start: usize) -> Option<usize> {
	let offset = start + 2;
	let mut lexer = TagToken::lexer(source.get(offset..)?);
	let mut seen_keyword = false;

	while let Some(token) = lexer.next() {
		match (seen_keyword, token) {
			(_, Ok(TagToken::Whitespace)) => {}
			(false, Ok(TagToken::EndComment)) => seen_keyword = true,
			(true, Ok(TagToken::TagClose)) => return Some(offset + lexer.span().end),
			_ => return None,
		}
	}

	None
}

/// Find the first occurrence of `needle` in `haystack`.
pub fn memstr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}
