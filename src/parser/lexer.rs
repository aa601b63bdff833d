//! Lexer (tokenizer) for HoleyC source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The parser only depends on the [`TokenSource`] trait, so any producer of
//! classified, positioned tokens can stand in for [`Lexer`].
//!
//! `//` and `#` start comments that run to the end of the line.

use super::ast::SourceLocation;
use std::fmt;
use tracing::trace;

/// Token classes of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Id,
    IntLiteral,
    StrLiteral,
    CharLiteral,

    // Keywords
    If,
    Else,
    While,
    Return,
    FromConsole,
    ToConsole,
    Int,
    IntPtr,
    Char,
    CharPtr,
    Bool,
    BoolPtr,
    Void,
    True,
    False,
    NullPtr,

    // Operators
    Assign,     // =
    Equals,     // ==
    NotEquals,  // !=
    Less,       // <
    LessEq,     // <=
    Greater,    // >
    GreaterEq,  // >=
    Cross,      // +
    Dash,       // -
    Star,       // *
    Slash,      // /
    And,        // and
    Or,         // or
    Not,        // !
    CrossCross, // ++
    DashDash,   // --
    At,         // @
    Carat,      // ^

    // Punctuation
    LParen,    // (
    RParen,    // )
    LCurly,    // {
    RCurly,    // }
    LBrace,    // [
    RBrace,    // ]
    Comma,     // ,
    Semicolon, // ;

    // End of file
    Eof,
}

impl TokenKind {
    /// Keywords that spell a type, in the order the grammar lists them.
    pub const TYPES: [TokenKind; 7] = [
        TokenKind::Int,
        TokenKind::IntPtr,
        TokenKind::Char,
        TokenKind::CharPtr,
        TokenKind::Bool,
        TokenKind::BoolPtr,
        TokenKind::Void,
    ];

    pub fn is_type(self) -> bool {
        Self::TYPES.contains(&self)
    }

    fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "int" => TokenKind::Int,
            "intptr" => TokenKind::IntPtr,
            "char" => TokenKind::Char,
            "charptr" => TokenKind::CharPtr,
            "bool" => TokenKind::Bool,
            "boolptr" => TokenKind::BoolPtr,
            "void" => TokenKind::Void,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "FROMCONSOLE" => TokenKind::FromConsole,
            "TOCONSOLE" => TokenKind::ToConsole,
            "NULLPTR" => TokenKind::NullPtr,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Id => "identifier",
            TokenKind::IntLiteral => "int literal",
            TokenKind::StrLiteral => "string literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Return => "'return'",
            TokenKind::FromConsole => "'FROMCONSOLE'",
            TokenKind::ToConsole => "'TOCONSOLE'",
            TokenKind::Int => "'int'",
            TokenKind::IntPtr => "'intptr'",
            TokenKind::Char => "'char'",
            TokenKind::CharPtr => "'charptr'",
            TokenKind::Bool => "'bool'",
            TokenKind::BoolPtr => "'boolptr'",
            TokenKind::Void => "'void'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::NullPtr => "'NULLPTR'",
            TokenKind::Assign => "'='",
            TokenKind::Equals => "'=='",
            TokenKind::NotEquals => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEq => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEq => "'>='",
            TokenKind::Cross => "'+'",
            TokenKind::Dash => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'!'",
            TokenKind::CrossCross => "'++'",
            TokenKind::DashDash => "'--'",
            TokenKind::At => "'@'",
            TokenKind::Carat => "'^'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LCurly => "'{'",
            TokenKind::RCurly => "'}'",
            TokenKind::LBrace => "'['",
            TokenKind::RBrace => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// Decoded payload of literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Int(i32),
    Str(String),
    Char(char),
}

/// A classified token with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
    pub value: Option<TokenValue>,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Token {
            kind,
            location,
            value: None,
        }
    }

    pub fn with_value(kind: TokenKind, location: SourceLocation, value: TokenValue) -> Self {
        Token {
            kind,
            location,
            value: Some(value),
        }
    }

    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Id, Some(TokenValue::Str(name))) => write!(f, "identifier '{}'", name),
            (TokenKind::IntLiteral, Some(TokenValue::Int(n))) => write!(f, "int literal {}", n),
            (TokenKind::StrLiteral, Some(TokenValue::Str(s))) => {
                write!(f, "string literal {:?}", s)
            }
            (TokenKind::CharLiteral, Some(TokenValue::Char(c))) => {
                write!(f, "char literal {:?}", c)
            }
            (kind, _) => write!(f, "{}", kind),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lexical error at {}: {}",
            self.location, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Anything that can hand the parser one token at a time.
///
/// Implementations must eventually yield a [`TokenKind::Eof`] token and keep
/// yielding it if asked again.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

/// Lexer for HoleyC source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        trace!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        let kind = match ch {
            '"' => return self.string_literal(loc),
            '\'' => return self.char_literal(loc),
            '0'..='9' => return self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(ch, loc)),

            '+' => self.either('+', TokenKind::CrossCross, TokenKind::Cross),
            '-' => self.either('-', TokenKind::DashDash, TokenKind::Dash),
            '=' => self.either('=', TokenKind::Equals, TokenKind::Assign),
            '!' => self.either('=', TokenKind::NotEquals, TokenKind::Not),
            '<' => self.either('=', TokenKind::LessEq, TokenKind::Less),
            '>' => self.either('=', TokenKind::GreaterEq, TokenKind::Greater),
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '@' => TokenKind::At,
            '^' => TokenKind::Carat,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,
            '[' => TokenKind::LBrace,
            ']' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: '{}'", ch),
                    location: loc,
                })
            }
        };

        Ok(Token::new(kind, loc))
    }

    /// Pick the two-character kind if `second` follows, else the one-character kind.
    fn either(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance(); // consume closing quote
                    return Ok(Token::with_value(
                        TokenKind::StrLiteral,
                        loc,
                        TokenValue::Str(string),
                    ));
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    string.push(self.escape_sequence()?);
                }
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse character literal; the opening quote is already consumed
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let value = match self.advance() {
            Some('\\') => self.escape_sequence()?,
            Some('\n') | Some('\'') | None => {
                return Err(LexError {
                    message: "Empty or unterminated character literal".to_string(),
                    location: loc,
                })
            }
            Some(ch) => ch,
        };

        if self.advance() != Some('\'') {
            return Err(LexError {
                message: "Expected closing quote in character literal".to_string(),
                location: loc,
            });
        }

        Ok(Token::with_value(
            TokenKind::CharLiteral,
            loc,
            TokenValue::Char(value),
        ))
    }

    /// Decode the character after a backslash
    fn escape_sequence(&mut self) -> Result<char, LexError> {
        let loc = self.current_location();
        let escaped = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file in escape sequence".to_string(),
            location: loc,
        })?;

        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '0' => Ok('\0'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            '\'' => Ok('\''),
            _ => Err(LexError {
                message: format!("Unknown escape sequence: \\{}", escaped),
                location: loc,
            }),
        }
    }

    /// Parse numeric literal (decimal integers only)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i32>().map_err(|_| LexError {
            message: format!("Integer literal out of range: {}", num_str),
            location: loc,
        })?;

        Ok(Token::with_value(
            TokenKind::IntLiteral,
            loc,
            TokenValue::Int(value),
        ))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match TokenKind::keyword(&ident) {
            Some(kind) => Token::new(kind, loc),
            None => Token::with_value(TokenKind::Id, loc, TokenValue::Str(ident)),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        if self.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, self.current_location()));
        }

        self.scan_token()
    }
}
