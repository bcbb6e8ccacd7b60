use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Integer(i64),
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
    Id(String),
    Assign,
    Begin,
    End,
    Semi,
    Dot,
    Eof,
}

/// The kind of a [`Token`] with its payload stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
    Id,
    Assign,
    Begin,
    End,
    Semi,
    Dot,
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Integer(_) => TokenKind::Integer,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Multiply => TokenKind::Multiply,
            Token::Divide => TokenKind::Divide,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Id(_) => TokenKind::Id,
            Token::Assign => TokenKind::Assign,
            Token::Begin => TokenKind::Begin,
            Token::End => TokenKind::End,
            Token::Semi => TokenKind::Semi,
            Token::Dot => TokenKind::Dot,
            Token::Eof => TokenKind::Eof,
        }
    }

    /// Reserved words are matched exactly; `begin` is an identifier.
    pub fn keyword(word: &str) -> Option<Token> {
        match word {
            "BEGIN" => Some(Token::Begin),
            "END" => Some(Token::End),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Integer => "integer",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Id => "identifier",
            TokenKind::Assign => "':='",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Semi => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(value) => write!(f, "integer {}", value),
            Token::Id(name) => write!(f, "identifier `{}`", name),
            other => fmt::Display::fmt(&other.kind(), f),
        }
    }
}
