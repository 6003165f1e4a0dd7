use crate::ast::{Event, Node};
use crate::lexer::Token;


// Arithmetic is done in uint32_t, which wraps, and the result is reinterpreted
// as int32_t when printed. int_pow mirrors interpreter::int_pow.
const PRELUDE: &str = "\
#include <stdio.h>
#include <stdint.h>

static uint32_t int_pow(uint32_t base, uint32_t exponent) {
    uint32_t result = 1u;

    if ((int32_t) exponent < 0) {
        if (base == 1u) {
            return 1u;
        }
        if (base == UINT32_MAX) {
            return (exponent & 1u) ? base : 1u;
        }
        return 0u;
    }
    while (exponent > 0u) {
        if (exponent & 1u) {
            result *= base;
        }
        base *= base;
        exponent >>= 1;
    }
    return result;
}

";

fn c_literal<'a>(tok: &Token<'a>) -> &'a str {
    // a leading zero would make the literal octal
    let digits = tok.text().trim_start_matches('0');
    if digits.is_empty() { "0" } else { digits }
}

fn emit_expr(e: &Node, out: &mut String) {
    e.walk(|event| match event {
        Event::Enter(Node::Plus(..)) | Event::Enter(Node::Times(..)) => out.push('('),
        Event::Enter(Node::Pow(..)) => out.push_str("int_pow("),
        Event::Enter(Node::Int(tok)) => {
            out.push_str(c_literal(tok));
            out.push('u');
        }
        Event::Enter(Node::Prog(..)) => {}
        Event::Between(Node::Plus(..)) => out.push_str(" + "),
        Event::Between(Node::Times(..)) => out.push_str(" * "),
        Event::Between(_) => out.push_str(", "),
        Event::Leave(Node::Prog(..)) | Event::Leave(Node::Int(_)) => {}
        Event::Leave(_) => out.push(')'),
    });
}

/// Renders a complete C program printing the value of `p`.
pub fn emit_c(p: &Node) -> String {
    let mut out = String::from(PRELUDE);
    out.push_str("int main(void) {\n");
    out.push_str("    printf(\"%d\\n\", (int) (int32_t) ");
    emit_expr(p, &mut out);
    out.push_str(");\n");
    out.push_str("    return 0;\n}\n");
    out
}
