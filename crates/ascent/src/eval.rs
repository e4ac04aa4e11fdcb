//! Evaluation of syntax trees.

use crate::syntax::Node;

/// Fold the tree into an integer.
///
/// The walk is post-order over an explicit stack, so long chains of a single
/// operator do not exhaust the call stack. Sums and products wrap around on
/// overflow.
pub fn evaluate(node: &Node) -> u64 {
    enum Frame<'a> {
        Visit(&'a Node),
        Add,
        Mul,
    }

    let mut frames = vec![Frame::Visit(node)];
    let mut values: Vec<u64> = vec![];

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Visit(Node::Int(n)) => values.push(*n),
            Frame::Visit(Node::Add(lhs, rhs)) => {
                frames.extend([Frame::Add, Frame::Visit(&**rhs), Frame::Visit(&**lhs)]);
            }
            Frame::Visit(Node::Mul(lhs, rhs)) => {
                frames.extend([Frame::Mul, Frame::Visit(&**rhs), Frame::Visit(&**lhs)]);
            }
            Frame::Add | Frame::Mul => {
                let (rhs, lhs) = match (values.pop(), values.pop()) {
                    (Some(rhs), Some(lhs)) => (rhs, lhs),
                    _ => unreachable!("operand stack underflow"),
                };
                values.push(match frame {
                    Frame::Add => lhs.wrapping_add(rhs),
                    _ => lhs.wrapping_mul(rhs),
                });
            }
        }
    }

    values.pop().unwrap_or_default()
}
