use crate::ast::{Event, Node};
use crate::sem::{SemanticError, literal_value};


/// Integer exponentiation with `i32` wrap-around.
///
/// A negative exponent yields the truncated real result: `1` for base `1`,
/// `1` or `-1` for base `-1`, and `0` otherwise.
pub fn int_pow(base: i32, exponent: i32) -> i32 {
    if exponent >= 0 {
        return base.wrapping_pow(exponent as u32);
    }
    match base {
        1 => 1,
        -1 => if exponent % 2 == 0 { 1 } else { -1 },
        _ => 0,
    }
}

fn operands(values: &mut Vec<i32>) -> (i32, i32) {
    let r = values.pop().unwrap_or_default();
    let l = values.pop().unwrap_or_default();
    (l, r)
}

/// Evaluates `p` in post-order on a value stack.
pub fn eval(p: &Node) -> Result<i32, SemanticError> {
    let mut values = Vec::new();
    p.try_walk(|event| -> Result<(), SemanticError> {
        let node = match event {
            Event::Leave(node) => node,
            _ => return Ok(()),
        };
        let value = match node {
            Node::Prog(..) => return Ok(()),
            Node::Plus(..) => {
                let (l, r) = operands(&mut values);
                l.wrapping_add(r)
            }
            Node::Times(..) => {
                let (l, r) = operands(&mut values);
                l.wrapping_mul(r)
            }
            Node::Pow(..) => {
                let (base, exponent) = operands(&mut values);
                int_pow(base, exponent)
            }
            Node::Int(tok) => literal_value(tok)?,
        };
        values.push(value);
        Ok(())
    })?;
    Ok(values.pop().unwrap_or_default())
}
