use std::fmt::Display;

/// 1-based line and column of a point in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcPos {
    pub line: u32,
    pub col: u32,
}

impl Default for SrcPos {
    fn default() -> Self {
        Self { line: 1, col: 1 }
    }
}

/// Half-open byte range `[start, end)` plus the position of `start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
    pub pos: SrcPos,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32, pos: SrcPos) -> Self {
		Self { start, end, pos }
	}

	/// Span running from the start of `self` to the end of `last`.
	pub fn to(&self, last: &SrcSpan) -> Self {
		Self {
			start: self.start,
			end: last.end,
			pos: self.pos,
		}
	}

	pub fn len(&self) -> u32 {
		self.end - self.start
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

impl Display for SrcPos {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Line {}, col {}", self.line, self.col)
	}
}
