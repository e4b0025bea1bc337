/// The sequence that terminates an HTML comment early.
pub const HTML_COMMENT_TERMINATOR: &str = "--";

/// Make `text` safe to place between `<!--` and `-->`.
///
/// Every `--` is replaced with `- -`. Matches are taken left to right without
/// overlap, so `----` becomes `- -- -` rather than `- - - -`.
pub fn escape_html_comment(text: &str) -> String {
	text.replace(HTML_COMMENT_TERMINATOR, "- -")
}
