//! S-expression rendering of the tree.
//!
//! Only named children are printed: `1 + 2 * 3` renders as
//! `(binary 1 + (binary 2 * 3))`. Leaf nodes print their lexeme.

use super::{Element, Node, NodeKind};

impl Node {
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        write_sexp(self, &mut out);
        out
    }
}

fn write_sexp(node: &Node, out: &mut String) {
    if node.kind().is_leaf() {
        match node.field_token("token") {
            Some(token) => out.push_str(&token.text),
            None => out.push_str(node.kind().name()),
        }
        return;
    }

    out.push('(');
    out.push_str(node.kind().name());
    if node.kind() == NodeKind::Error {
        out.push(')');
        return;
    }

    for (index, child) in node.children().iter().enumerate() {
        if node.field_of(index).is_none() {
            continue;
        }
        out.push(' ');
        match child {
            Element::Node(child) => write_sexp(child, out),
            Element::Token(token) => out.push_str(&token.text),
        }
    }
    out.push(')');
}
