use std::collections::VecDeque;

use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Literal, Token, TokenKind};
use crate::utils::prelude::{SrcPos, SrcSpan};

pub type LexResult = std::result::Result<Token, LexicalError>;

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	line: u32,
	col: u32,
	start: u32,
	start_pos: SrcPos,
	lexeme: String,
	pending: VecDeque<LexicalError>,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,

			line: 1,
			col: 1,
			start: 0,
			start_pos: SrcPos::default(),
			lexeme: String::new(),
			pending: VecDeque::new(),
			finished: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		if let Some(err) = self.pending.pop_front() {
			return Err(err);
		}

		loop {
			self.begin_token();

			let ch = match self.ch {
				Some(ch) => ch,
				// zero-length end-of-stream token at the final position
				None => return Ok(self.make_token(TokenKind::Eof, Literal::Nil)),
			};

			return match ch {
				'(' => Ok(self.eat_one_char(TokenKind::LParen)),
				')' => Ok(self.eat_one_char(TokenKind::RParen)),
				'{' => Ok(self.eat_one_char(TokenKind::LBrace)),
				'}' => Ok(self.eat_one_char(TokenKind::RBrace)),
				';' => Ok(self.eat_one_char(TokenKind::Semicolon)),
				',' => Ok(self.eat_one_char(TokenKind::Comma)),
				'+' => Ok(self.eat_one_char(TokenKind::Plus)),
				'-' => Ok(self.eat_one_char(TokenKind::Minus)),
				'*' => Ok(self.eat_one_char(TokenKind::Asterisk)),
				'!' => Ok(self.eat_with_equal(TokenKind::Bang, TokenKind::NotEqual)),
				'=' => Ok(self.eat_with_equal(TokenKind::Assign, TokenKind::Equal)),
				'<' => Ok(self.eat_with_equal(TokenKind::LessThan, TokenKind::LessThanOrEqual)),
				'>' => Ok(self.eat_with_equal(TokenKind::GreaterThan, TokenKind::GreaterThanOrEqual)),
				'&' => self.eat_paired(ch, TokenKind::And),
				'|' => self.eat_paired(ch, TokenKind::Or),
				'/' => {
					if self.next_ch == Some('/') {
						self.skip_comment();
						continue;
					}

					Ok(self.eat_one_char(TokenKind::Slash))
				},
				' ' | '\r' | '\t' | '\n' => {
					self.next_char();
					continue;
				},
				'0'..='9' => self.lex_number(),
				c if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_ident()),
				c => {
					self.next_char();

					// one error per byte of a multi-byte character
					let width = c.len_utf8() as u32;
					for offset in 1..width {
						let err = self.byte_error(c, offset);
						self.pending.push_back(err);
					}

					Err(self.byte_error(c, 0))
				}
			};
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		if let Some(ch) = ch {
			self.lexeme.push(ch);

			if ch == '\n' {
				self.line += 1;
				self.col = 1;
			} else {
				// columns count bytes
				self.col += ch.len_utf8() as u32;
			}
		}

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position = self.position + self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn begin_token(&mut self) {
		self.start = self.position;
		self.start_pos = SrcPos { line: self.line, col: self.col };
		self.lexeme.clear();
	}

	fn current_span(&self) -> SrcSpan {
		SrcSpan::from(self.start, self.position, self.start_pos)
	}

	fn make_token(&mut self, kind: TokenKind, literal: Literal) -> Token {
		let lexeme = std::mem::take(&mut self.lexeme);

		Token::new(kind, lexeme, literal, self.current_span())
	}

	fn error(&self, error: LexicalErrorType) -> LexicalError {
		LexicalError {
			error,
			location: self.current_span(),
		}
	}

	fn byte_error(&self, tok: char, offset: u32) -> LexicalError {
		let pos = SrcPos { line: self.start_pos.line, col: self.start_pos.col + offset };

		LexicalError {
			error: LexicalErrorType::UnrecognizedToken { tok },
			location: SrcSpan::from(self.start + offset, self.start + offset + 1, pos),
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		self.next_char();

		self.make_token(kind, Literal::Nil)
	}

	fn eat_with_equal(&mut self, single: TokenKind, double: TokenKind) -> Token {
		self.next_char();

		if self.ch == Some('=') {
			self.next_char();
			return self.make_token(double, Literal::Nil);
		}

		self.make_token(single, Literal::Nil)
	}

	fn eat_paired(&mut self, ch: char, kind: TokenKind) -> LexResult {
		self.next_char();

		if self.ch == Some(ch) {
			self.next_char();
			return Ok(self.make_token(kind, Literal::Nil));
		}

		Err(self.error(LexicalErrorType::UnpairedOperator { tok: ch }))
	}

	fn skip_comment(&mut self) {
		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}
	}

	fn lex_ident(&mut self) -> Token {
		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			self.next_char();
		}

        match str_to_keyword(&self.lexeme) {
			Some((kind, literal)) => self.make_token(kind, literal),
			None => self.make_token(TokenKind::Ident, Literal::Nil),
		}
	}

	fn lex_number(&mut self) -> LexResult {
		while let Some('0'..='9') = self.ch {
			self.next_char();
		}

		match self.lexeme.parse::<i64>() {
			Ok(value) => Ok(self.make_token(TokenKind::Int, Literal::Int(value))),
			Err(_) => Err(self.error(LexicalErrorType::IntegerOverflow)),
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(&token, Ok(token) if token.is(TokenKind::Eof)) {
			self.finished = true;
		}

		Some(token)
	}
}

/// Scans the whole source. The token list always ends with an end-of-stream
/// token; lexical errors are collected and never stop the scan.
pub fn scan(src: &str) -> (Vec<Token>, Vec<LexicalError>) {
	let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));

	let mut tokens = vec![];
	let mut errors = vec![];

	for result in lexer {
		match result {
			Ok(token) => tokens.push(token),
			Err(err) => errors.push(err),
		}
	}

	(tokens, errors)
}
