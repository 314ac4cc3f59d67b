//! Incremental reparsing after a text edit.
//!
//! The edited text is re-lexed and compared with the old token stream. The
//! unchanged front and back of the stream are found by token equality (the
//! back compared after shifting by the edit delta). Top-level statements that
//! lie in the unchanged front are reused as they are, and parsing restarts at
//! the first statement that may have been affected. As soon as the fresh
//! parse reaches the start of an old statement inside the unchanged back,
//! that statement and everything after it are reused with shifted spans.
//!
//! Parsing a statement only depends on the tokens from its start onward, so
//! the result is identical to a full parse of the new text.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::ParserConfig;
use crate::cst::{Node, NodeBuilder, NodeKind};
use crate::lexer::{tokenize, Token};
use crate::parser::Parser;
use crate::tree::SyntaxTree;

/// Tokens a statement parse may inspect past its last token
const LOOKAHEAD: usize = 2;

/// Replacement of `start..old_end` in the old text by `new_text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub old_end: usize,
    pub new_text: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("edit range {start}..{end} is inverted")]
    Inverted { start: usize, end: usize },

    #[error("edit range {start}..{end} is out of bounds for text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit boundary {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

impl TextEdit {
    pub fn new(range: std::ops::Range<usize>, new_text: impl Into<String>) -> Self {
        Self {
            start: range.start,
            old_end: range.end,
            new_text: new_text.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset..offset, text)
    }

    pub fn delete(range: std::ops::Range<usize>) -> Self {
        Self::new(range, "")
    }

    /// Change in text length caused by the edit
    pub fn delta(&self) -> isize {
        self.new_text.len() as isize - (self.old_end - self.start) as isize
    }

    pub fn validate(&self, source: &str) -> Result<(), EditError> {
        if self.start > self.old_end {
            return Err(EditError::Inverted {
                start: self.start,
                end: self.old_end,
            });
        }
        if self.old_end > source.len() {
            return Err(EditError::OutOfBounds {
                start: self.start,
                end: self.old_end,
                len: source.len(),
            });
        }
        for offset in [self.start, self.old_end] {
            if !source.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }

    /// Apply the edit to `source`
    pub fn apply(&self, source: &str) -> Result<String, EditError> {
        self.validate(source)?;
        let mut text = String::with_capacity(source.len() + self.new_text.len());
        text.push_str(&source[..self.start]);
        text.push_str(&self.new_text);
        text.push_str(&source[self.old_end..]);
        Ok(text)
    }
}

/// Work done by an incremental reparse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReparseStats {
    /// Top-level statements taken over from the old tree
    pub reused: usize,
    /// Top-level statements parsed again
    pub reparsed: usize,
}

/// Reparse `old` after applying `edit`. The old tree is left untouched.
pub fn reparse(
    old: &SyntaxTree,
    edit: &TextEdit,
    config: ParserConfig,
) -> Result<(SyntaxTree, ReparseStats), EditError> {
    let source = edit.apply(old.source())?;

    if config != *old.config() {
        log::debug!("configuration changed, parsing from scratch");
        let tree = SyntaxTree::parse_with(source, config);
        let stats = ReparseStats {
            reused: 0,
            reparsed: tree.root().child_nodes().count(),
        };
        return Ok((tree, stats));
    }

    let old_tokens: Vec<Token> = old.root().tokens().cloned().collect();
    let new_tokens = tokenize(&source);
    let delta = edit.delta();

    let prefix = old_tokens
        .iter()
        .zip(&new_tokens)
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old_tokens.len().min(new_tokens.len()) - prefix;
    let suffix = old_tokens
        .iter()
        .rev()
        .zip(new_tokens.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a.eq_shifted(b, delta))
        .count();

    // Token index range of each old top-level statement
    let statements: Vec<&Node> = old.root().child_nodes().collect();
    let mut bounds = Vec::with_capacity(statements.len());
    let mut first = 0;
    for statement in &statements {
        let count = statement.token_count();
        bounds.push((first, first + count - 1));
        first += count;
    }

    let mut root = NodeBuilder::new(NodeKind::SourceFile);
    let mut stats = ReparseStats::default();

    // Unchanged front
    let mut resume = 0;
    for (statement, &(_, last)) in statements.iter().zip(&bounds) {
        if last + LOOKAHEAD >= prefix {
            break;
        }
        root.field("statement", (*statement).clone());
        stats.reused += 1;
        resume = last + 1;
    }

    // Changed middle, until the parse lines up with an old statement start
    let starts: HashMap<usize, usize> = bounds
        .iter()
        .enumerate()
        .map(|(index, &(first, _))| (first, index))
        .collect();
    let suffix_start = new_tokens.len() - suffix;
    let new_len = new_tokens.len() as isize;
    let old_len = old_tokens.len() as isize;

    let mut parser = Parser::from_tokens(new_tokens, config);
    parser.seek(resume);

    while !parser.is_at_end() {
        let position = parser.position();
        if position >= suffix_start {
            let old_position = (position as isize - new_len + old_len) as usize;
            if let Some(&index) = starts.get(&old_position) {
                for statement in &statements[index..] {
                    root.field("statement", statement.shifted(delta));
                    stats.reused += 1;
                }
                let eof = parser.tokens().len() - 1;
                parser.seek(eof);
                break;
            }
        }
        root.field("statement", parser.parse_top_level_statement());
        stats.reparsed += 1;
    }

    log::debug!(
        "reparse: {} tokens unchanged in front, {} at the back, {} statements reused, {} reparsed",
        prefix,
        suffix,
        stats.reused,
        stats.reparsed
    );

    let root = parser.finish_root(root);
    Ok((SyntaxTree::from_parts(root, source, config), stats))
}
