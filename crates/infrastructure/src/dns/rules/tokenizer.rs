use compact_str::CompactString;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Invalid,
    Arrow,
    Text,
    Comment,
    Dash,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Invalid => "invalid",
            TokenKind::Arrow => "arrow",
            TokenKind::Text => "text",
            TokenKind::Comment => "comment",
            TokenKind::Dash => "dash",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexeme. `start..end` is its byte span in the source.
///
/// For comments the span includes the leading `#` but `value` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub value: CompactString,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize, value: &str) -> Self {
        Self {
            kind,
            start,
            end,
            value: CompactString::from(value),
        }
    }
}

fn is_text_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == ':'
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Restartable scanner over rule source.
///
/// The cursor is a plain byte offset, so callers can save it with
/// [`offset`](Self::offset) and go back with [`rewind`](Self::rewind).
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to `pos`, clamped to the source and pulled back to
    /// the nearest char boundary.
    pub fn rewind(&mut self, pos: usize) {
        let mut pos = pos.min(self.source.len());
        while !self.source.is_char_boundary(pos) {
            pos -= 1;
        }
        self.pos = pos;
    }

    /// The token `next_token` would return, without moving the cursor.
    pub fn peek(&mut self) -> Token {
        let saved = self.pos;
        let token = self.next_token();
        self.pos = saved;
        token
    }

    pub fn next_token(&mut self) -> Token {
        let rest = &self.source[self.pos..];
        let skipped = rest.len() - rest.trim_start_matches(is_blank).len();
        self.pos += skipped;

        let start = self.pos;
        let mut chars = self.source[start..].chars();
        let Some(c) = chars.next() else {
            return Token::new(TokenKind::Eof, start, start, "");
        };
        let following = chars.next();

        match c {
            '-' if following == Some('>') => self.emit(TokenKind::Arrow, start, start + 2),
            '-' => self.emit(TokenKind::Dash, start, start + 1),
            '>' => self.emit(TokenKind::Arrow, start, start + 1),
            '#' => {
                let body = &self.source[start + 1..];
                let len = body.find(['\n', '\r']).unwrap_or(body.len());
                self.pos = start + 1 + len;
                Token::new(TokenKind::Comment, start, self.pos, &body[..len])
            }
            c if is_text_char(c) => {
                let rest = &self.source[start..];
                let len = rest.find(|c: char| !is_text_char(c)).unwrap_or(rest.len());
                self.emit(TokenKind::Text, start, start + len)
            }
            other => self.emit(TokenKind::Invalid, start, start + other.len_utf8()),
        }
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Token {
        self.pos = end;
        Token::new(kind, start, end, &self.source[start..end])
    }
}

/// Yields tokens up to, not including, end of input.
impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
