use tracing::trace;

use crate::error::LexError;
use crate::token::Token;

pub struct Lexer {
    text: Vec<char>,
    pos: usize,
    current_char: Option<char>,
    token_start: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let current_char = chars.first().copied();
        Lexer {
            text: chars,
            pos: 0,
            current_char,
            token_start: 0,
        }
    }

    /// Offset of the first character of the token most recently returned.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.current_char = self.text.get(self.pos).copied();
    }

    fn peek(&self) -> Option<char> {
        self.text.get(self.pos + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn integer(&mut self) -> Result<i64, LexError> {
        let start = self.pos;
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        let lexeme: String = self.text[start..self.pos].iter().collect();
        lexeme
            .parse()
            .map_err(|_| LexError::IntegerOutOfRange { lexeme, pos: start })
    }

    fn identifier(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }
        let word: String = self.text[start..self.pos].iter().collect();
        Token::keyword(&word).unwrap_or(Token::Id(word))
    }

    /// Returns the next token. Once input is exhausted every call yields `Token::Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.pos;

        let Some(ch) = self.current_char else {
            return Ok(Token::Eof);
        };

        let token = if ch.is_alphabetic() {
            self.identifier()
        } else if ch.is_ascii_digit() {
            Token::Integer(self.integer()?)
        } else if ch == ':' && self.peek() == Some('=') {
            self.advance();
            self.advance();
            Token::Assign
        } else {
            let token = match ch {
                ';' => Token::Semi,
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Multiply,
                '/' => Token::Divide,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '.' => Token::Dot,
                _ => return Err(LexError::InvalidCharacter { ch, pos: self.pos }),
            };
            self.advance();
            token
        };

        trace!(?token, pos = self.token_start, "lexed token");
        Ok(token)
    }
}

/// Lexes all of `text`, ending with (and including) `Token::Eof`.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
