use indexmap::IndexMap;

use super::{Element, FieldName, Node, NodeKind, Span};
use crate::cst::kind::Constraint;
use crate::error::{SchemaError, SyntaxError};
use crate::lexer::Token;

/// Assembles a [`Node`] child by child.
///
/// [`NodeBuilder::finish`] checks the collected fields against the schema of
/// the kind, so a node that escapes the builder is always well formed.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    kind: NodeKind,
    span: Option<Span>,
    children: Vec<Element>,
    fields: IndexMap<FieldName, Vec<usize>>,
}

impl NodeBuilder {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: None,
            children: Vec::new(),
            fields: IndexMap::new(),
        }
    }

    /// Reopen a finished node to append more children
    pub fn resume(node: Node) -> Self {
        Self {
            kind: node.kind,
            span: None,
            children: node.children,
            fields: node.fields,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Append an unnamed child
    pub fn token(&mut self, token: Token) -> &mut Self {
        self.children.push(Element::Token(token));
        self
    }

    /// Append a child under `name`
    pub fn field(&mut self, name: FieldName, element: impl Into<Element>) -> &mut Self {
        let index = self.children.len();
        self.children.push(element.into());
        self.fields.entry(name).or_default().push(index);
        self
    }

    /// Fix the span instead of deriving it from the tokens
    pub fn span(&mut self, span: Span) -> &mut Self {
        self.span = Some(span);
        self
    }

    pub fn count(&self, name: &str) -> usize {
        self.fields.get(name).map_or(0, Vec::len)
    }

    /// Span the node would get if finished now.
    ///
    /// Taken from the first and last child only, so finishing a node never
    /// walks into its subtrees.
    pub fn current_span(&self) -> Span {
        self.span.unwrap_or_else(|| {
            match (self.children.first(), self.children.last()) {
                (Some(first), Some(last)) => Span::new(first.span().start, last.span().end),
                _ => Span::dummy(),
            }
        })
    }

    /// Check the collected fields against the schema of the kind
    pub fn validate(&self) -> Result<(), SchemaError> {
        let Some(schema) = self.kind.schema() else {
            return Ok(());
        };

        for name in self.fields.keys() {
            if schema.rule(name).is_none() {
                return Err(SchemaError::UnknownField {
                    kind: self.kind,
                    field: name.to_string(),
                });
            }
        }

        for rule in schema.fields {
            let count = self.count(rule.name);
            if !rule.arity.accepts(count) {
                return Err(SchemaError::FieldCount {
                    kind: self.kind,
                    field: rule.name.to_string(),
                    count,
                });
            }
        }

        for constraint in schema.constraints {
            if !self.satisfies(constraint) {
                return Err(SchemaError::Constraint {
                    kind: self.kind,
                    rule: describe(constraint),
                });
            }
        }

        Ok(())
    }

    /// Validate against the schema and build the node
    pub fn finish(self) -> Result<Node, SchemaError> {
        self.validate()?;
        Ok(self.build(None))
    }

    /// Like [`NodeBuilder::finish`], but a schema violation turns the node
    /// into an Error node carrying the violation
    pub fn finish_or_error(self) -> Node {
        match self.validate() {
            Ok(()) => self.build(None),
            Err(error) => {
                let span = self.current_span();
                self.finish_error(SyntaxError::Schema { error, span })
            }
        }
    }

    /// Build an Error node carrying `error`, skipping validation
    pub fn finish_error(mut self, error: SyntaxError) -> Node {
        self.kind = NodeKind::Error;
        self.build(Some(Box::new(error)))
    }

    fn satisfies(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::ExactlyOne(names) => {
                names.iter().filter(|name| self.count(name) > 0).count() == 1
            }
            Constraint::AtMostOne(names) => {
                names.iter().filter(|name| self.count(name) > 0).count() <= 1
            }
            Constraint::Together(names) => {
                let present = names.iter().filter(|name| self.count(name) > 0).count();
                present == 0 || present == names.len()
            }
            Constraint::MinCount(name, min) => self.count(name) >= *min,
        }
    }

    fn build(self, error: Option<Box<SyntaxError>>) -> Node {
        let span = self.current_span();
        Node {
            kind: self.kind,
            span,
            children: self.children,
            fields: self.fields,
            error,
        }
    }
}

fn describe(constraint: &Constraint) -> String {
    match constraint {
        Constraint::ExactlyOne(names) => format!("exactly one of {}", names.join(", ")),
        Constraint::AtMostOne(names) => format!("at most one of {}", names.join(", ")),
        Constraint::Together(names) => format!("all or none of {}", names.join(", ")),
        Constraint::MinCount(name, min) => format!("at least {} '{}'", min, name),
    }
}
