use std::fmt;

use crate::lexer::*;
use crate::ast::*;

// Grammar:
// Prog    -> Expr eof
// Expr    -> Term ( + Term )*
// Term    -> PowTerm ( * PowTerm )*
// PowTerm -> Fact ( ** PowTerm )?
// Fact    -> int | ( Expr )

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SyntaxError(pub &'static str, pub Position);

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Position(line, col) = self.1;
        write!(f, "syntax error: {} at line {} col {}", self.0, line, col)
    }
}

impl std::error::Error for SyntaxError {}

type ParseResult<'t, 'a, T> = Result<(T, &'t [Token<'a>]), SyntaxError>;

fn current<'t, 'a>(ts: &'t [Token<'a>]) -> Option<TokenCategory> {
    ts.first().map(|tok| tok.category())
}

fn position<'t, 'a>(ts: &'t [Token<'a>]) -> Position {
    ts.first().map(|tok| tok.position()).unwrap_or_default()
}

fn expect<'t, 'a>(ts: &'t [Token<'a>], expected: TokenCategory) -> ParseResult<'t, 'a, Token<'a>> {
    match ts.split_first() {
        Some((tok, rest)) if tok.category() == expected => Ok((*tok, rest)),
        Some((tok, _)) => Err(SyntaxError("unexpected token", tok.position())),
        None => Err(SyntaxError("unexpected end of input", Position::default())),
    }
}

fn prog<'t, 'a>(ts: &'t [Token<'a>]) -> ParseResult<'t, 'a, Node<'a>> {
    let (expr, rest) = expr(ts)?;
    let (eof, rest) = expect(rest, TokenCategory::EOF)?;
    Ok((Node::prog(eof, expr), rest))
}

fn expr<'t, 'a>(ts: &'t [Token<'a>]) -> ParseResult<'t, 'a, Node<'a>> {
    let (mut node, mut rest) = term(ts)?;

    while current(rest) == Some(TokenCategory::Plus) {
        let (op, rest_) = expect(rest, TokenCategory::Plus)?;
        let (right, rest_) = term(rest_)?;
        node = Node::plus(op, node, right);
        rest = rest_;
    }

    Ok((node, rest))
}

fn term<'t, 'a>(ts: &'t [Token<'a>]) -> ParseResult<'t, 'a, Node<'a>> {
    let (mut node, mut rest) = pow_term(ts)?;

    while current(rest) == Some(TokenCategory::Times) {
        let (op, rest_) = expect(rest, TokenCategory::Times)?;
        let (right, rest_) = pow_term(rest_)?;
        node = Node::times(op, node, right);
        rest = rest_;
    }

    Ok((node, rest))
}

// The right-recursive production is unrolled: operands are collected left to
// right and folded from the right.
fn pow_term<'t, 'a>(ts: &'t [Token<'a>]) -> ParseResult<'t, 'a, Node<'a>> {
    let (mut last, mut rest) = fact(ts)?;
    let mut bases = Vec::new();

    while current(rest) == Some(TokenCategory::Pow) {
        let (op, rest_) = expect(rest, TokenCategory::Pow)?;
        let (exponent, rest_) = fact(rest_)?;
        bases.push((op, last));
        last = exponent;
        rest = rest_;
    }

    let node = bases.into_iter()
        .rev()
        .fold(last, |exponent, (op, base)| Node::pow(op, base, exponent));
    Ok((node, rest))
}

fn fact<'t, 'a>(ts: &'t [Token<'a>]) -> ParseResult<'t, 'a, Node<'a>> {
    match current(ts) {
        Some(TokenCategory::Int) => {
            let (tok, rest) = expect(ts, TokenCategory::Int)?;
            Ok((Node::int(tok), rest))
        }
        Some(TokenCategory::OpenPar) => {
            let (_, rest) = expect(ts, TokenCategory::OpenPar)?;
            let (expr, rest) = expr(rest)?;
            let (_, rest) = expect(rest, TokenCategory::ClosePar)?;
            Ok((expr, rest))
        }
        Some(TokenCategory::BadToken) => Err(SyntaxError("unrecognized character", position(ts))),
        Some(_) => Err(SyntaxError("expected integer or '('", position(ts))),
        None => Err(SyntaxError("unexpected end of input", Position::default())),
    }
}

pub fn parse<'t, 'a>(ts: &'t [Token<'a>]) -> Result<Node<'a>, SyntaxError> {
    prog(ts).map(|(p, _)| p)
}

pub fn parse_str<'a>(input: &'a str) -> Result<Node<'a>, SyntaxError> {
    parse(&lex(input))
}


#[cfg(test)]
mod test {
    use crate::lexer::{Position, Token, TokenCategory, lex};
    use crate::ast::Node;
    use crate::lisp::emit_lisp;
    use super::{SyntaxError, parse, parse_str};

    fn shape(s: &str) -> String {
        emit_lisp(&parse_str(s).unwrap())
    }

    #[test]
    fn parses() {
        assert_eq!(shape("42"), "42");
        assert_eq!(shape("1 + 2"), "(+ 1 2)");
        assert_eq!(shape("1 + 2 + 3"), "(+ (+ 1 2) 3)");
        assert_eq!(shape("1 * 2 * 3"), "(* (* 1 2) 3)");
        assert_eq!(shape("2 + 3 * 4"), "(+ 2 (* 3 4))");
        assert_eq!(shape("2 * 3 + 4"), "(+ (* 2 3) 4)");
        assert_eq!(shape("(2 + 3) * 4"), "(* (+ 2 3) 4)");
        assert_eq!(shape("2 * (3 + 4)"), "(* 2 (+ 3 4))");
        assert_eq!(shape("2 ** 3 ** 2"), "(expt 2 (expt 3 2))");
        assert_eq!(shape("(2 ** 3) ** 2"), "(expt (expt 2 3) 2)");
        assert_eq!(shape("2 * 3 ** 2"), "(* 2 (expt 3 2))");
        assert_eq!(shape("3 ** 2 * 2"), "(* (expt 3 2) 2)");
        assert_eq!(shape("((((7))))"), "7");
    }

    #[test]
    fn left_leaning_chain() {
        let p = parse_str("1+2+3").unwrap();
        let expr = match &p {
            Node::Prog(_, expr) => expr,
            other => panic!("expected Prog, got {:?}", other),
        };
        match &**expr {
            Node::Plus(outer, l, r) => {
                assert_eq!(*outer, Token(TokenCategory::Plus, Some("+"), Position(1, 4)));
                assert!(matches!(**l, Node::Plus(..)));
                assert!(matches!(**r, Node::Int(Token(_, Some("3"), _))));
            }
            other => panic!("expected Plus, got {:?}", other),
        }
    }

    #[test]
    fn anchors_carry_positions() {
        let p = parse_str("10\n** 2").unwrap();
        assert_eq!(p.anchor(), &Token(TokenCategory::EOF, None, Position(2, 5)));
        let pow = p.children()[0];
        assert_eq!(pow.anchor(), &Token(TokenCategory::Pow, Some("**"), Position(2, 1)));
        assert_eq!(
            pow.children()[1].anchor(),
            &Token(TokenCategory::Int, Some("2"), Position(2, 4)));
    }

    #[test]
    fn long_chains() {
        let sum = shape(&vec!["1"; 100_000].join("+"));
        assert!(sum.starts_with("(+ (+ (+ "));
        assert!(sum.ends_with(" 1) 1) 1)"));

        let tower = shape(&vec!["1"; 100_000].join("**"));
        assert!(tower.starts_with("(expt 1 (expt 1 (expt 1 "));
        assert!(tower.ends_with("(expt 1 1))))"));
    }

    #[test]
    fn parse_error() {
        assert_eq!(
            parse_str("1+"),
            Err(SyntaxError("expected integer or '('", Position(1, 3))));
        assert_eq!(
            parse_str("1+@2"),
            Err(SyntaxError("unrecognized character", Position(1, 3))));
        assert_eq!(
            parse_str(""),
            Err(SyntaxError("expected integer or '('", Position(1, 1))));
        assert_eq!(
            parse_str("(1 + 2"),
            Err(SyntaxError("unexpected token", Position(1, 7))));
        assert_eq!(
            parse_str("1 2"),
            Err(SyntaxError("unexpected token", Position(1, 3))));
        assert_eq!(
            parse_str("(1))"),
            Err(SyntaxError("unexpected token", Position(1, 4))));
        assert_eq!(
            parse_str("2 *** 3"),
            Err(SyntaxError("expected integer or '('", Position(1, 5))));
        assert_eq!(
            parse_str("()"),
            Err(SyntaxError("expected integer or '('", Position(1, 2))));
    }

    #[test]
    fn missing_eof() {
        let toks = lex("1 +");
        assert_eq!(
            parse(&toks[..1]),
            Err(SyntaxError("unexpected end of input", Position(0, 0))));
        assert_eq!(
            parse(&toks[..2]),
            Err(SyntaxError("unexpected end of input", Position(0, 0))));
    }
}
