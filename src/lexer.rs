use std::iter::Peekable;
use std::str::CharIndices;


#[derive(Clone, Copy, Hash, Debug, Eq, PartialEq)]
pub enum TokenCategory {
    Int,
    Plus,
    Times,
    Pow,
    OpenPar,
    ClosePar,
    EOF,
    BadToken,
}

#[derive(Debug, Default, Eq, PartialEq, Ord, PartialOrd, Clone, Copy)]
pub struct Position(pub u64, pub u64);

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Token<'a>(pub TokenCategory, pub Option<&'a str>, pub Position);

impl<'a> Token<'a> {
    pub fn category(&self) -> TokenCategory { self.0 }
    pub fn lexeme(&self) -> Option<&'a str>  { self.1 }
    pub fn position(&self) -> Position       { self.2 }

    /// Lexeme text, empty for `EOF`.
    pub fn text(&self) -> &'a str {
        self.1.unwrap_or("")
    }
}

/// Lazy token stream over a source string. Yields exactly one `EOF` token
/// and then ends.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: u64,
    col: u64,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
            line: 1,
            col: 1,
            done: false,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        next
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        let len = self.input.len();
        self.chars.peek().map_or(len, |&(i, _)| i)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.done {
            return None;
        }

        loop {
            let pos = Position(self.line, self.col);
            let (start, chr) = match self.bump() {
                Some(next) => next,
                None => {
                    self.done = true;
                    return Some(Token(TokenCategory::EOF, None, pos));
                }
            };

            let category = match chr {
                c if c.is_whitespace() => continue,
                '0'..='9' => {
                    while let Some('0'..='9') = self.peek_char() {
                        self.bump();
                    }
                    TokenCategory::Int
                }
                '*' => {
                    if self.peek_char() == Some('*') {
                        self.bump();
                        TokenCategory::Pow
                    } else {
                        TokenCategory::Times
                    }
                }
                '+' => TokenCategory::Plus,
                '(' => TokenCategory::OpenPar,
                ')' => TokenCategory::ClosePar,
                _ => TokenCategory::BadToken,
            };

            let end = self.offset();
            return Some(Token(category, Some(&self.input[start..end]), pos));
        }
    }
}

pub fn lex<'a>(input: &'a str) -> Vec<Token<'a>> {
    Lexer::new(input).collect()
}


#[cfg(test)]
mod test {
    use super::{Token, TokenCategory, Position, Lexer, lex};

    #[test]
    fn sequence() {
        assert_eq!(lex("(12+3)*45 ** 6"), vec![
            Token(TokenCategory::OpenPar,  Some("("),  Position(1, 1)),
            Token(TokenCategory::Int,      Some("12"), Position(1, 2)),
            Token(TokenCategory::Plus,     Some("+"),  Position(1, 4)),
            Token(TokenCategory::Int,      Some("3"),  Position(1, 5)),
            Token(TokenCategory::ClosePar, Some(")"),  Position(1, 6)),
            Token(TokenCategory::Times,    Some("*"),  Position(1, 7)),
            Token(TokenCategory::Int,      Some("45"), Position(1, 8)),
            Token(TokenCategory::Pow,      Some("**"), Position(1, 11)),
            Token(TokenCategory::Int,      Some("6"),  Position(1, 14)),
            Token(TokenCategory::EOF,      None,       Position(1, 15)),
        ]);
    }

    #[test]
    fn repeated_stars() {
        assert_eq!(lex("*****"), vec![
            Token(TokenCategory::Pow,   Some("**"), Position(1, 1)),
            Token(TokenCategory::Pow,   Some("**"), Position(1, 3)),
            Token(TokenCategory::Times, Some("*"),  Position(1, 5)),
            Token(TokenCategory::EOF,   None,       Position(1, 6)),
        ]);
    }

    #[test]
    fn bad_tokens() {
        assert_eq!(lex("1+@2 -x"), vec![
            Token(TokenCategory::Int,      Some("1"), Position(1, 1)),
            Token(TokenCategory::Plus,     Some("+"), Position(1, 2)),
            Token(TokenCategory::BadToken, Some("@"), Position(1, 3)),
            Token(TokenCategory::Int,      Some("2"), Position(1, 4)),
            Token(TokenCategory::BadToken, Some("-"), Position(1, 6)),
            Token(TokenCategory::BadToken, Some("x"), Position(1, 7)),
            Token(TokenCategory::EOF,      None,      Position(1, 8)),
        ]);

        assert_eq!(lex("ñ"), vec![
            Token(TokenCategory::BadToken, Some("ñ"), Position(1, 1)),
            Token(TokenCategory::EOF,      None,      Position(1, 2)),
        ]);
    }

    #[test]
    fn whitespace_is_insignificant() {
        let categories = |s| lex(s).iter().map(|t| t.category()).collect::<Vec<_>>();
        assert_eq!(categories("1 + 2"), categories("1+2"));
        assert_eq!(categories("\t( 1 )\r\n"), categories("(1)"));
    }

    #[test]
    fn newlines() {
        assert_eq!(lex("1\n+ 2\n"), vec![
            Token(TokenCategory::Int,  Some("1"), Position(1, 1)),
            Token(TokenCategory::Plus, Some("+"), Position(2, 1)),
            Token(TokenCategory::Int,  Some("2"), Position(2, 3)),
            Token(TokenCategory::EOF,  None,      Position(3, 1)),
        ]);
    }

    #[test]
    fn empty() {
        assert_eq!(lex(""), vec![Token(TokenCategory::EOF, None, Position(1, 1))]);
        assert_eq!(lex("   "), vec![Token(TokenCategory::EOF, None, Position(1, 4))]);
    }

    #[test]
    fn single_eof() {
        let mut lexer = Lexer::new("7");
        assert_eq!(lexer.next().map(|t| t.category()), Some(TokenCategory::Int));
        assert_eq!(lexer.next().map(|t| t.category()), Some(TokenCategory::EOF));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }
}
