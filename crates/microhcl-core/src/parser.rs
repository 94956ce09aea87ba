// microhcl - a parser and document model for HCL1
//
// Copyright (c) 2025 the microhcl contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recursive-descent parser for HCL1.
//!
//! The parser pulls tokens from the lexer with a single token of lookahead
//! and materializes the document root as a [`Value::Object`]. Block labels
//! lower into nested objects and repeated keys fuse by list promotion, so
//!
//! ```hcl
//! chara putit { name = "putit" }
//! chara putit { name = "putit2" }
//! ```
//!
//! yields `{chara: [{putit: {name: "putit"}}, {putit: {name: "putit2"}}]}`.
//!
//! The first lexical or syntactic violation aborts the parse; no recovery is
//! attempted.

use crate::error::{HclError, HclResult};
use crate::lex::{Lexer, Token};
use crate::value::{List, Object, Value};

/// Parses HCL source bytes into a document value.
///
/// A leading UTF-8 byte order mark is skipped. On success the returned value
/// is always an [`Value::Object`].
///
/// # Examples
///
/// ```
/// use microhcl_core::parse;
///
/// let doc = parse(b"foo = \"bar\"").unwrap();
/// assert_eq!(doc.get::<String>("foo").unwrap(), "bar");
/// ```
pub fn parse(input: &[u8]) -> HclResult<Value> {
    tracing::trace!(bytes = input.len(), "parsing HCL document");

    let mut lexer = Lexer::new(input);
    if !lexer.skip_bom() {
        return Err(HclError::syntax("invalid UTF8 BOM", lexer.line()));
    }

    let mut parser = Parser {
        lexer,
        token: Token::Eof,
    };
    parser.advance();
    parser.parse_object_list(false)
}

/// Parses an HCL source string into a document value.
pub fn parse_str(input: &str) -> HclResult<Value> {
    parse(input.as_bytes())
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
}

impl Parser<'_> {
    fn advance(&mut self) {
        loop {
            self.token = self.lexer.next_token();
            // Comment tokens only exist when a preserving lexer is in use;
            // the grammar never sees them.
            if !matches!(self.token, Token::Comment(_)) {
                return;
            }
        }
    }

    fn fail<T>(&self, reason: impl Into<String>) -> HclResult<T> {
        Err(HclError::syntax(reason, self.lexer.line()))
    }

    /// `ObjectList := (KeyPath ObjectItem [COMMA])*`
    ///
    /// The top-level document and every `{ ... }` block body parse through
    /// here; `nested` decides whether `}` ends the list.
    fn parse_object_list(&mut self, nested: bool) -> HclResult<Value> {
        let mut root = Value::Object(Object::new());

        loop {
            if self.token.is_eof() {
                break;
            }
            if nested && matches!(self.token, Token::RBrace) {
                break;
            }

            let keys = self.parse_keys()?;
            let value = self.parse_object_item()?;

            self.advance();
            if matches!(self.token, Token::Comma) {
                self.advance();
            }

            root.merge_keyed(&keys, value)?;
        }

        Ok(root)
    }

    /// Collects the key path of one item: the binding name plus any block
    /// labels. Leaves the `=` or `{` that terminated the path as the current
    /// token.
    fn parse_keys(&mut self) -> HclResult<Vec<String>> {
        let mut keys = Vec::new();

        loop {
            match &self.token {
                Token::Eof => return self.fail("end of file reached"),
                Token::Assign => {
                    if keys.len() > 1 {
                        return self.fail(format!(
                            "nested object expected: LBRACE got: {}",
                            self.token.describe()
                        ));
                    }
                    if keys.is_empty() {
                        return self.fail("expected to find at least one object key");
                    }
                    return Ok(keys);
                }
                Token::LBrace => {
                    if keys.is_empty() {
                        return self.fail("expected IDENT | STRING got: LBRACE");
                    }
                    return Ok(keys);
                }
                Token::Ident(key) | Token::String(key) => {
                    keys.push(key.clone());
                    self.advance();
                }
                Token::Illegal(reason) => {
                    let reason = reason.clone();
                    return self.fail(reason);
                }
                other => {
                    return self.fail(format!(
                        "expected IDENT | STRING | ASSIGN | LBRACE got: {}",
                        other.describe()
                    ));
                }
            }
        }
    }

    /// `ObjectItem := ASSIGN LiteralOrCompound | LBRACE ObjectList RBRACE`
    fn parse_object_item(&mut self) -> HclResult<Value> {
        match self.token {
            Token::Assign => self.parse_value(),
            Token::LBrace => self.parse_block(),
            _ => self.fail("expected start of object ('{') or assignment ('=')"),
        }
    }

    /// Parses the right-hand side of an assignment.
    fn parse_value(&mut self) -> HclResult<Value> {
        self.advance();
        match &self.token {
            Token::Int(_)
            | Token::Float(_)
            | Token::Bool(_)
            | Token::String(_)
            | Token::Heredoc(_)
            | Token::Ident(_) => self.parse_literal(),
            Token::LBrace => self.parse_block(),
            Token::LBrack => self.parse_list(),
            Token::Eof => self.fail("reached end of file"),
            Token::Illegal(reason) => {
                let reason = reason.clone();
                self.fail(reason)
            }
            other => {
                let reason = format!("unknown token: {}", other.describe());
                self.fail(reason)
            }
        }
    }

    /// Parses a `{ ... }` block body into an object.
    fn parse_block(&mut self) -> HclResult<Value> {
        if !matches!(self.token, Token::LBrace) {
            return self.fail("object list did not start with LBRACE");
        }
        self.advance();

        let value = self.parse_object_list(true)?;

        if !matches!(self.token, Token::RBrace) {
            return self.fail(format!(
                "object expected closing RBRACE got: {}",
                self.token.describe()
            ));
        }

        Ok(value)
    }

    /// Parses a `[ ... ]` list. Items are comma-separated; a trailing comma
    /// is tolerated.
    fn parse_list(&mut self) -> HclResult<Value> {
        let mut items = List::new();
        let mut need_comma = false;

        loop {
            self.advance();

            if need_comma {
                match self.token {
                    Token::Comma => {
                        need_comma = false;
                        continue;
                    }
                    Token::RBrack => return Ok(Value::List(items)),
                    _ => {
                        return self.fail(format!(
                            "error parsing list, expected comma or list end, got: {}",
                            self.token.describe()
                        ));
                    }
                }
            }

            match &self.token {
                Token::Int(_)
                | Token::Float(_)
                | Token::Bool(_)
                | Token::String(_)
                | Token::Heredoc(_)
                | Token::Ident(_) => {
                    items.push(self.parse_literal()?);
                    need_comma = true;
                }
                Token::LBrace => {
                    items.push(self.parse_block()?);
                    need_comma = true;
                }
                Token::LBrack => {
                    items.push(self.parse_list()?);
                    need_comma = true;
                }
                Token::RBrack => return Ok(Value::List(items)),
                Token::Illegal(reason) => {
                    let reason = reason.clone();
                    return self.fail(reason);
                }
                other => {
                    let reason =
                        format!("unexpected token while parsing list: {}", other.describe());
                    return self.fail(reason);
                }
            }
        }
    }

    /// Maps a literal token onto its value. Identifiers in value position
    /// are barewords and become strings, as do heredocs.
    fn parse_literal(&mut self) -> HclResult<Value> {
        match &self.token {
            Token::String(s) | Token::Heredoc(s) | Token::Ident(s) => {
                Ok(Value::String(s.clone()))
            }
            Token::Bool(b) => Ok(Value::Bool(*b)),
            Token::Int(n) => Ok(Value::Int(*n)),
            Token::Float(x) => Ok(Value::Float(*x)),
            Token::Illegal(reason) => {
                let reason = reason.clone();
                self.fail(reason)
            }
            _ => self.fail("unexpected token"),
        }
    }
}
