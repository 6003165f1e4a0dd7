use crate::ast::{Event, Node};


pub fn emit_lisp(p: &Node) -> String {
    let mut out = String::new();
    p.walk(|event| match event {
        Event::Enter(Node::Plus(..)) => out.push_str("(+ "),
        Event::Enter(Node::Times(..)) => out.push_str("(* "),
        Event::Enter(Node::Pow(..)) => out.push_str("(expt "),
        Event::Enter(Node::Int(tok)) => out.push_str(tok.text()),
        Event::Enter(Node::Prog(..)) => {}
        Event::Between(_) => out.push(' '),
        Event::Leave(Node::Prog(..)) | Event::Leave(Node::Int(_)) => {}
        Event::Leave(_) => out.push(')'),
    });
    out
}
