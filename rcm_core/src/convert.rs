use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

use crate::escape::escape_html_comment;
use crate::marker::BlockDirective;
use crate::marker::InlineDirective;
use crate::marker::Marker;
use crate::scanner::BlockSpan;
use crate::scanner::InlineSpan;

/// The tag pair wrapped around a converted comment so the template engine
/// outputs it literally instead of evaluating template syntax inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Guard {
	/// `{% verbatim %}...{% endverbatim %}` for Django templates.
	#[default]
	Django,
	/// `{% raw %}...{% endraw %}` for Jinja and minijinja templates.
	Jinja,
}

impl Guard {
	pub fn open(self) -> &'static str {
		match self {
			Self::Django => "{% verbatim %}",
			Self::Jinja => "{% raw %}",
		}
	}

	pub fn close(self) -> &'static str {
		match self {
			Self::Django => "{% endverbatim %}",
			Self::Jinja => "{% endraw %}",
		}
	}

	pub fn wrap(self, text: &str) -> String {
		format!("{}{text}{}", self.open(), self.close())
	}
}

/// Build `<!-- content -->`, or `<!-- [note] content -->` when a non-empty
/// note is given. Both parts are escaped.
pub fn html_comment(content: &str, note: Option<&str>) -> String {
	let content = escape_html_comment(content);

	match note.filter(|note| !note.is_empty()) {
		Some(note) => format!("<!-- [{}] {content} -->", escape_html_comment(note)),
		None => format!("<!-- {content} -->"),
	}
}

/// Convert one block comment occurrence.
pub fn convert_block<'a>(span: &BlockSpan<'a>, guard: Guard) -> Cow<'a, str> {
	let directive = BlockDirective::parse(span.annotation);
	let comment = || html_comment(span.content.trim(), directive.note);

	match directive.marker {
		Marker::Hide => Cow::Borrowed(span.text),
		Marker::Render => Cow::Owned(comment()),
		Marker::Default => Cow::Owned(guard.wrap(&comment())),
	}
}

/// Convert one inline comment occurrence.
pub fn convert_inline<'a>(span: &InlineSpan<'a>, guard: Guard) -> Cow<'a, str> {
	let directive = InlineDirective::parse(span.content);

	match directive.marker {
		Marker::Hide => Cow::Borrowed(span.text),
		Marker::Render => Cow::Owned(html_comment(directive.content, None)),
		Marker::Default => Cow::Owned(guard.wrap(&html_comment(directive.content, None))),
	}
}
