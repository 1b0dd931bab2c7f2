//! Single-line tokenizer for MiniScript source
//!
//! The editing engine never parses a whole program; it only needs to recognize
//! block keywords, brackets, quotes and whitespace on one line at a time. The
//! lexer is lazy (tokens are produced on demand) and tolerant: a lexical error
//! yields a terminal [`TokenKind::Error`] token covering the rest of the line
//! instead of failing, so callers can simply stop scanning that line.

/// Words the lexer reports as [`TokenKind::Keyword`]
pub const KEYWORDS: &[&str] = &[
    "break", "continue", "else", "end", "for", "function", "if", "in", "isa", "new", "null",
    "then", "repeat", "return", "while", "and", "or", "not", "true", "false",
];

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    String,
    Number,
    Colon,
    Comma,
    Dot,
    LParen,
    RParen,
    LSquare,
    RSquare,
    LCurly,
    RCurly,
    Operator,
    /// End of line (also produced for `;` statement separators)
    Eol,
    /// A character the lexer does not recognize; scanning may continue
    Unknown,
    /// Lexical error; always the last token before `Eol`
    Error,
}

/// A token with its text and extent on the line (in chars)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text. Compound keywords are normalized to a single space
    /// (`end   if` becomes `end if`); everything else is the raw source slice.
    pub text: String,
    /// Offset of the first char of the token
    pub start: usize,
    /// Offset one past the last char of the token
    pub end: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// True for a keyword token with exactly this text
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }
}

/// Identifier chars: letters, digits, underscore and anything above U+009F
pub fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || c > '\u{009F}'
}

/// Whitespace that separates tokens (line breaks never appear inside a line)
pub fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Lazy tokenizer over a single line.
#[derive(Debug, Clone)]
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    peeked: Option<Token>,
    finished: bool,
}

impl Lexer {
    pub fn new(line: &str) -> Self {
        Self {
            chars: line.chars().collect(),
            position: 0,
            peeked: None,
            finished: false,
        }
    }

    /// True once every token, including the terminating `Eol`, has been taken
    pub fn at_end(&self) -> bool {
        self.peeked.is_none() && self.finished
    }

    /// Look at the next token without consuming it. Returns `Eol` past the end.
    pub fn peek(&mut self) -> &Token {
        let tok = match self.peeked.take() {
            Some(tok) => tok,
            None => self.scan(),
        };
        self.peeked.insert(tok)
    }

    /// Consume and return the next token. Returns `Eol` past the end.
    pub fn next_token(&mut self) -> Token {
        match self.peeked.take() {
            Some(tok) => tok,
            None => self.scan(),
        }
    }

    fn eol(&mut self) -> Token {
        self.finished = true;
        let len = self.chars.len();
        Token::new(TokenKind::Eol, "", len, len)
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.chars.len() && is_whitespace(self.chars[self.position]) {
            self.position += 1;
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn scan(&mut self) -> Token {
        if self.finished {
            return self.eol();
        }
        self.skip_whitespace();

        let len = self.chars.len();
        if self.position >= len {
            return self.eol();
        }

        let start = self.position;
        let c = self.chars[start];
        let next = self.chars.get(start + 1).copied();

        // Comment runs to end of line
        if c == '/' && next == Some('/') {
            self.position = len;
            return self.eol();
        }

        if c == ';' {
            self.position += 1;
            return Token::new(TokenKind::Eol, ";", start, self.position);
        }

        if c == '"' {
            return self.scan_string(start);
        }

        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            return self.scan_number(start);
        }

        if is_identifier_char(c) {
            return self.scan_word(start);
        }

        self.position += 1;
        let kind = match c {
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LSquare,
            ']' => TokenKind::RSquare,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,
            '=' | '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '^' => {
                if self.chars.get(self.position) == Some(&'=') {
                    self.position += 1;
                }
                TokenKind::Operator
            }
            '@' => TokenKind::Operator,
            _ => TokenKind::Unknown,
        };
        Token::new(kind, self.slice(start, self.position), start, self.position)
    }

    fn scan_string(&mut self, start: usize) -> Token {
        let len = self.chars.len();
        let mut i = start + 1;
        while i < len {
            if self.chars[i] == '"' {
                if self.chars.get(i + 1) == Some(&'"') {
                    i += 2;
                    continue;
                }
                self.position = i + 1;
                return Token::new(TokenKind::String, self.slice(start, i + 1), start, i + 1);
            }
            i += 1;
        }
        // Missing closing quote: the rest of the line is unparseable, only Eol may follow
        self.position = len;
        Token::new(TokenKind::Error, self.slice(start, len), start, len)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let len = self.chars.len();
        let mut i = start;
        let mut seen_dot = false;
        while i < len {
            let c = self.chars[i];
            if c.is_ascii_digit() {
                i += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                i += 1;
            } else if (c == 'e' || c == 'E') && i > start {
                // Exponent, with optional sign
                let mut j = i + 1;
                if matches!(self.chars.get(j), Some('+') | Some('-')) {
                    j += 1;
                }
                if self.chars.get(j).is_some_and(|d| d.is_ascii_digit()) {
                    i = j;
                    seen_dot = true;
                } else {
                    break;
                }
            } else {
                break;
            }
        }
        self.position = i;
        Token::new(TokenKind::Number, self.slice(start, i), start, i)
    }

    fn scan_word(&mut self, start: usize) -> Token {
        let len = self.chars.len();
        let mut i = start;
        while i < len && is_identifier_char(self.chars[i]) {
            i += 1;
        }
        self.position = i;
        let word = self.slice(start, i);

        if !KEYWORDS.contains(&word.as_str()) {
            return Token::new(TokenKind::Identifier, word, start, i);
        }

        // `end <word>` and `else if` lex as one compound keyword
        if word == "end" || word == "else" {
            let save = self.position;
            self.skip_whitespace();
            let follow_start = self.position;
            let mut j = follow_start;
            while j < len && is_identifier_char(self.chars[j]) {
                j += 1;
            }
            let follow = self.slice(follow_start, j);
            let combine = if word == "end" {
                !follow.is_empty()
            } else {
                follow == "if"
            };
            if combine {
                self.position = j;
                return Token::new(TokenKind::Keyword, format!("{} {}", word, follow), start, j);
            }
            self.position = save;
        }

        Token::new(TokenKind::Keyword, word, start, i)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including the terminating `Eol`
    fn next(&mut self) -> Option<Token> {
        if self.at_end() {
            return None;
        }
        let tok = self.next_token();
        if tok.kind == TokenKind::Eol && tok.text.is_empty() {
            self.finished = true;
        }
        Some(tok)
    }
}

/// Tokenize a whole line, ending with an `Eol` token
pub fn tokenize(line: &str) -> Vec<Token> {
    Lexer::new(line).collect()
}
