use serde::Serialize;

/// Leading token that leaves a comment untouched for the template engine to
/// strip.
pub const HIDE_TOKEN: &str = "!hide";
/// Leading token that skips the guard so the template engine evaluates the
/// comment content.
pub const RENDER_TOKEN: &str = "!render";

/// How a single comment occurrence should be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
	/// No marker: the comment is converted and wrapped in the guard pair.
	Default,
	/// `!hide`: the comment is left exactly as written.
	Hide,
	/// `!render`: the comment is converted without a guard.
	Render,
}

impl Marker {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Default => "default",
			Self::Hide => "hide",
			Self::Render => "render",
		}
	}
}

/// Strip `token` from the start of `text` when it stands as a whole word,
/// returning the remainder with leading whitespace removed.
///
/// `!hidden` does not match `!hide`; `!hide` and `!hide note` do.
fn strip_token<'a>(text: &'a str, token: &str) -> Option<&'a str> {
	let rest = text.strip_prefix(token)?;

	match rest.chars().next() {
		None => Some(rest),
		Some(ch) if ch.is_whitespace() => Some(rest.trim_start()),
		Some(_) => None,
	}
}

/// The classified content of an inline `{# ... #}` comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineDirective<'a> {
	pub marker: Marker,
	/// The text to place in the HTML comment. For [`Marker::Render`] the
	/// render token has been removed; for [`Marker::Hide`] this is the input.
	pub content: &'a str,
}

impl<'a> InlineDirective<'a> {
	/// Classify the trimmed content of an inline comment.
	pub fn parse(content: &'a str) -> Self {
		if strip_token(content, HIDE_TOKEN).is_some() {
			return Self {
				marker: Marker::Hide,
				content,
			};
		}

		if let Some(rest) = strip_token(content, RENDER_TOKEN) {
			let marker = if strip_token(rest, HIDE_TOKEN).is_some() {
				Marker::Hide
			} else {
				Marker::Render
			};
			let content = if marker == Marker::Hide { content } else { rest };

			return Self { marker, content };
		}

		Self {
			marker: Marker::Default,
			content,
		}
	}
}

/// The classified annotation of a block `{% comment "..." %}` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDirective<'a> {
	pub marker: Marker,
	/// The note shown as `[note]` in the output. `None` when the tag had no
	/// annotation or nothing remained after removing the render token.
	pub note: Option<&'a str>,
}

impl<'a> BlockDirective<'a> {
	/// Classify the optional annotation of a block comment's opening tag.
	pub fn parse(annotation: Option<&'a str>) -> Self {
		let Some(annotation) = annotation else {
			return Self {
				marker: Marker::Default,
				note: None,
			};
		};

		if strip_token(annotation, HIDE_TOKEN).is_some() {
			return Self {
				marker: Marker::Hide,
				note: Some(annotation),
			};
		}

		if let Some(rest) = strip_token(annotation, RENDER_TOKEN) {
			// A hide token anywhere in the rest hides, even when glued to the note.
			let hides = rest
				.match_indices(HIDE_TOKEN)
				.any(|(index, _)| strip_token(&rest[index..], HIDE_TOKEN).is_some());
			if hides {
				return Self {
					marker: Marker::Hide,
					note: Some(annotation),
				};
			}

			return Self {
				marker: Marker::Render,
				note: Some(rest).filter(|rest| !rest.is_empty()),
			};
		}

		Self {
			marker: Marker::Default,
			note: Some(annotation),
		}
	}
}
