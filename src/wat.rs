use crate::ast::{Event, Node};


fn emit_instructions(e: &Node, out: &mut String) {
    e.walk(|event| match event {
        Event::Leave(Node::Plus(..)) => out.push_str("    i32.add\n"),
        Event::Leave(Node::Times(..)) => out.push_str("    i32.mul\n"),
        Event::Leave(Node::Pow(..)) => out.push_str("    call $pow\n"),
        Event::Leave(Node::Int(tok)) => {
            out.push_str(&format!("    i32.const {}\n", tok.text()));
        }
        _ => {}
    });
}

/// Renders a module exporting `start`, which returns the value of `p`.
/// The host must supply `math.pow`.
pub fn emit_wat(p: &Node) -> String {
    let mut out = String::new();
    out.push_str("(module\n");
    out.push_str("  (import \"math\" \"pow\" (func $pow (param i32 i32) (result i32)))\n");
    out.push_str("  (func\n    (export \"start\")\n    (result i32)\n");
    emit_instructions(p, &mut out);
    out.push_str("    return\n  )\n)\n");
    out
}
