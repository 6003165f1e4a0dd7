use std::convert::Infallible;
use std::fmt;
use std::mem;

use crate::lexer::{Position, Token, TokenCategory};


#[derive(PartialEq)]
pub enum Node<'a> {
    Prog(Token<'a>, Box<Node<'a>>),
    Plus(Token<'a>, Box<Node<'a>>, Box<Node<'a>>),
    Times(Token<'a>, Box<Node<'a>>, Box<Node<'a>>),
    Pow(Token<'a>, Box<Node<'a>>, Box<Node<'a>>),
    Int(Token<'a>),
}

/// One step of a depth-first traversal. Binary nodes report `Between` once,
/// after their left subtree and before their right one.
#[derive(Debug, Clone, Copy)]
pub enum Event<'n, 'a> {
    Enter(&'n Node<'a>),
    Between(&'n Node<'a>),
    Leave(&'n Node<'a>),
}

impl<'a> Node<'a> {
    pub fn prog(eof: Token<'a>, expr: Node<'a>) -> Node<'a> {
        Node::Prog(eof, Box::new(expr))
    }
    pub fn plus(anchor: Token<'a>, l: Node<'a>, r: Node<'a>) -> Node<'a> {
        Node::Plus(anchor, Box::new(l), Box::new(r))
    }
    pub fn times(anchor: Token<'a>, l: Node<'a>, r: Node<'a>) -> Node<'a> {
        Node::Times(anchor, Box::new(l), Box::new(r))
    }
    pub fn pow(anchor: Token<'a>, l: Node<'a>, r: Node<'a>) -> Node<'a> {
        Node::Pow(anchor, Box::new(l), Box::new(r))
    }
    pub fn int(anchor: Token<'a>) -> Node<'a> {
        Node::Int(anchor)
    }

    /// The token this node reports diagnostics against. `Prog` is anchored
    /// on the terminating `EOF`.
    pub fn anchor(&self) -> &Token<'a> {
        match self {
            Node::Prog(tok, _) => tok,
            Node::Plus(tok, _, _) | Node::Times(tok, _, _) | Node::Pow(tok, _, _) => tok,
            Node::Int(tok) => tok,
        }
    }

    pub fn children(&self) -> Vec<&Node<'a>> {
        match self {
            Node::Prog(_, expr) => vec![&**expr],
            Node::Plus(_, l, r) | Node::Times(_, l, r) | Node::Pow(_, l, r) => vec![&**l, &**r],
            Node::Int(_) => vec![],
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Prog(..) => "Prog",
            Node::Plus(..) => "Plus",
            Node::Times(..) => "Times",
            Node::Pow(..) => "Pow",
            Node::Int(_) => "Int",
        }
    }

    /// Visits the tree depth-first with an explicit stack, so chains of any
    /// length are walked without recursion. Stops at the first error.
    pub fn try_walk<'n, E, F>(&'n self, mut visit: F) -> Result<(), E>
        where F: FnMut(Event<'n, 'a>) -> Result<(), E>
    {
        let mut stack = vec![Event::Enter(self)];
        while let Some(event) = stack.pop() {
            visit(event)?;
            if let Event::Enter(node) = event {
                stack.push(Event::Leave(node));
                for (i, child) in node.children().into_iter().enumerate().rev() {
                    stack.push(Event::Enter(child));
                    if i > 0 {
                        stack.push(Event::Between(node));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn walk<'n, F>(&'n self, mut visit: F)
        where F: FnMut(Event<'n, 'a>)
    {
        let walked: Result<(), Infallible> = self.try_walk(|event| {
            visit(event);
            Ok(())
        });
        let _ = walked;
    }

    fn detach_children(&mut self, out: &mut Vec<Node<'a>>) {
        match self {
            Node::Prog(_, expr) => detach(expr, out),
            Node::Plus(_, l, r) | Node::Times(_, l, r) | Node::Pow(_, l, r) => {
                detach(l, out);
                detach(r, out);
            }
            Node::Int(_) => {}
        }
    }
}

fn detach<'a>(child: &mut Box<Node<'a>>, out: &mut Vec<Node<'a>>) {
    if let Node::Int(_) = **child {
        return;
    }
    let leaf = Node::Int(Token(TokenCategory::EOF, None, Position::default()));
    out.push(mem::replace(&mut **child, leaf));
}

// Inner nodes are moved onto a work list and swapped for leaves, so dropping
// a long chain never recurses.
impl<'a> Drop for Node<'a> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl<'a> fmt::Debug for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.try_walk(|event| match event {
            Event::Enter(Node::Int(tok)) => {
                let Position(line, col) = tok.position();
                write!(f, "Int({:?} at {}:{})", tok.text(), line, col)
            }
            Event::Enter(node) => write!(f, "{}(", node.kind()),
            Event::Between(_) => f.write_str(", "),
            Event::Leave(Node::Int(_)) => Ok(()),
            Event::Leave(_) => f.write_str(")"),
        })
    }
}
