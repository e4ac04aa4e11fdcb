//! Syntax tree.
//!
//! A tree is a plain [`Node`]; the grammar categories it was reduced into are
//! tracked by the [`Factor`], [`Term`] and [`Expr`] wrappers, so that the
//! reductions in the parser only accept children of the right category.

use std::{fmt, mem};

#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Int(u64),
    Add(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
}

/// The grammar category a node was created in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Factor,
    Term,
    Expr,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Factor => "factor",
            Self::Term => "term",
            Self::Expr => "expr",
        })
    }
}

impl Node {
    /// The category this node was created in, not the one it was last
    /// reduced into: the root of `5` is a `Factor` wrapped in an `Expr`.
    pub fn category(&self) -> Category {
        match self {
            Self::Int(..) => Category::Factor,
            Self::Mul(..) => Category::Term,
            Self::Add(..) => Category::Expr,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Int(..))
    }

    /// The integer leaves, left to right.
    pub fn leaves(&self) -> Vec<u64> {
        let mut leaves = vec![];
        self.walk(&mut |node| {
            if let Self::Int(n) = node {
                leaves.push(*n);
            }
        });
        leaves
    }

    /// The operators of the internal nodes, in source order.
    pub fn operators(&self) -> Vec<char> {
        let mut ops = vec![];
        self.walk(&mut |node| match node {
            Self::Add(..) => ops.push('+'),
            Self::Mul(..) => ops.push('*'),
            Self::Int(..) => (),
        });
        ops
    }

    // in-order traversal without recursion; left spines grow with the input.
    fn walk(&self, f: &mut impl FnMut(&Self)) {
        let mut stack = vec![];
        let mut current = Some(self);
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = match node {
                    Self::Add(lhs, _) | Self::Mul(lhs, _) => Some(&**lhs),
                    Self::Int(..) => None,
                };
            }
            let Some(node) = stack.pop() else { break };
            f(node);
            current = match node {
                Self::Add(_, rhs) | Self::Mul(_, rhs) => Some(&**rhs),
                Self::Int(..) => None,
            };
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Frame<'a> {
            Visit(&'a Node),
            Text(&'static str),
        }

        let mut frames = vec![Frame::Visit(self)];
        while let Some(frame) = frames.pop() {
            let (op, lhs, rhs) = match frame {
                Frame::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Frame::Visit(Self::Int(n)) => {
                    write!(f, "{}", n)?;
                    continue;
                }
                Frame::Visit(Self::Add(lhs, rhs)) => ("(+ ", lhs, rhs),
                Frame::Visit(Self::Mul(lhs, rhs)) => ("(* ", lhs, rhs),
            };
            f.write_str(op)?;
            frames.extend([
                Frame::Text(")"),
                Frame::Visit(&**rhs),
                Frame::Text(" "),
                Frame::Visit(&**lhs),
            ]);
        }
        Ok(())
    }
}

// The derived drop glue recurses along the left spine, which is as long as
// the input. Unlink the subtrees onto a heap stack instead.
impl Drop for Node {
    fn drop(&mut self) {
        fn detach(node: &mut Node, pending: &mut Vec<Node>) {
            if let Node::Add(lhs, rhs) | Node::Mul(lhs, rhs) = node {
                for child in [lhs, rhs] {
                    if !child.is_leaf() {
                        pending.push(mem::replace(&mut **child, Node::Int(0)));
                    }
                }
            }
        }

        if self.is_leaf() {
            return;
        }
        let mut pending = vec![];
        detach(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach(&mut node, &mut pending);
        }
    }
}

macro_rules! categories {
    ($($(#[$m:meta])* $name:ident),*$(,)?) => {$(
        $(#[$m])*
        #[derive(Debug, PartialEq, Eq)]
        #[repr(transparent)]
        pub struct $name {
            node: Node,
        }

        impl $name {
            pub fn node(&self) -> &Node {
                &self.node
            }

            pub fn into_node(self) -> Node {
                self.node
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.node, f)
            }
        }
    )*};
}

categories! {
    /// A tree reduced into `factor`.
    Factor,
    /// A tree reduced into `term`.
    Term,
    /// A tree reduced into `expr`.
    Expr,
}

impl Factor {
    /// factor -> INTEGER
    pub fn int(value: u64) -> Self {
        Self {
            node: Node::Int(value),
        }
    }
}

impl Term {
    /// term -> term '*' factor
    pub fn mul(lhs: Term, rhs: Factor) -> Self {
        Self {
            node: Node::Mul(Box::new(lhs.node), Box::new(rhs.node)),
        }
    }
}

/// term -> factor
impl From<Factor> for Term {
    fn from(factor: Factor) -> Self {
        Self { node: factor.node }
    }
}

impl Expr {
    /// expr -> expr '+' term
    pub fn add(lhs: Expr, rhs: Term) -> Self {
        Self {
            node: Node::Add(Box::new(lhs.node), Box::new(rhs.node)),
        }
    }
}

/// expr -> term
impl From<Term> for Expr {
    fn from(term: Term) -> Self {
        Self { node: term.node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recategorisation_keeps_the_tree() {
        let term = Term::mul(Term::from(Factor::int(2)), Factor::int(3));
        let expr = Expr::from(term);
        assert_eq!(
            *expr.node(),
            Node::Mul(Box::new(Node::Int(2)), Box::new(Node::Int(3)))
        );
        assert_eq!(expr.node().category(), Category::Term);

        let expr = Expr::from(Term::from(Factor::int(5)));
        assert_eq!(expr.node().category(), Category::Factor);
    }

    #[test]
    fn display_prefix_form() {
        let expr = Expr::add(
            Expr::from(Term::from(Factor::int(2))),
            Term::mul(Term::from(Factor::int(3)), Factor::int(4)),
        );
        assert_eq!(expr.to_string(), "(+ 2 (* 3 4))");
        assert_eq!(expr.node().leaves(), [2, 3, 4]);
        assert_eq!(expr.node().operators(), ['+', '*']);
    }

    fn chain(len: usize, op: fn(Box<Node>, Box<Node>) -> Node) -> Node {
        let mut node = Node::Int(1);
        for _ in 1..len {
            node = op(Box::new(node), Box::new(Node::Int(1)));
        }
        node
    }

    #[test]
    fn deep_trees_drop_without_recursion() {
        drop(chain(300_000, Node::Add));
        drop(chain(300_000, Node::Mul));

        // right-leaning and mixed shapes go through the same stack.
        let mut node = Node::Int(0);
        for i in 0..100_000 {
            node = if i % 2 == 0 {
                Node::Mul(Box::new(Node::Int(i)), Box::new(node))
            } else {
                Node::Add(Box::new(node), Box::new(Node::Int(i)))
            };
        }
        drop(node);
    }

    #[test]
    fn deep_trees_display_without_recursion() {
        let rendered = chain(200_000, Node::Add).to_string();
        assert!(rendered.starts_with(&"(+ ".repeat(199_999)));
        assert!(rendered.ends_with(" 1)"));
        assert_eq!(rendered.matches('1').count(), 200_000);
    }
}
