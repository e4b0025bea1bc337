use serde::Serialize;

/// A location in template source. `line` and `column` are 1-indexed, the
/// column counts characters and `offset` counts bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
	pub line: usize,
	pub column: usize,
	pub offset: usize,
}

impl Point {
	pub fn new(line: usize, column: usize, offset: usize) -> Self {
		Self {
			line,
			column,
			offset,
		}
	}
}

/// The start and end of a comment occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
	pub start: Point,
	pub end: Point,
}

/// Pre-computed table of line-start byte offsets for efficient offset-to-point
/// conversion. Built once per source (O(n)), then each lookup is a binary
/// search.
pub(crate) struct LineTable<'a> {
	source: &'a str,
	/// Byte offsets of the start of each line. `line_starts[0]` is always 0.
	line_starts: Vec<usize>,
}

impl<'a> LineTable<'a> {
	pub fn new(source: &'a str) -> Self {
		let mut line_starts = vec![0];
		for (i, byte) in source.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(i + 1);
			}
		}
		Self {
			source,
			line_starts,
		}
	}

	/// Convert a byte offset that lies on a character boundary into a
	/// [`Point`].
	pub fn point(&self, offset: usize) -> Point {
		let line_idx = match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insert) => insert.saturating_sub(1),
		};
		let line_start = self.line_starts[line_idx];
		let column = self
			.source
			.get(line_start..offset)
			.map_or(offset - line_start, |text| text.chars().count())
			+ 1;

		Point::new(line_idx + 1, column, offset)
	}

	pub fn position(&self, start: usize, end: usize) -> Position {
		Position {
			start: self.point(start),
			end: self.point(end),
		}
	}
}
