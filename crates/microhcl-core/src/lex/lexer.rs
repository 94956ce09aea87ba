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

//! Byte-stream scanner for HCL1.
//!
//! The lexer walks the input one byte at a time, tracking a 1-based line
//! counter and a 0-based column counter, and hands out one [`Token`] per
//! [`Lexer::next_token`] call. Errors are not fatal to the lexer itself; they
//! are reported in-band as [`Token::Illegal`] and the caller decides whether
//! to stop.

use crate::lex::token::Token;

/// Behavior switches for the lexer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexerOptions {
    /// When set, `#` and `//` comments are handed out as [`Token::Comment`]
    /// instead of being consumed silently.
    pub preserve_comments: bool,
}

/// Tracks `${...}` interpolation nesting inside a double-quoted string.
///
/// A `$` immediately followed by `{` opens a frame; further braces nest.
/// While a frame is open, quotes and newlines are ordinary content and only
/// a closing brace can unwind the frame.
#[derive(Debug, Default)]
struct BraceTracker {
    depth: usize,
    dollar: bool,
}

impl BraceTracker {
    fn observe(&mut self, c: u8) {
        if c == b'{' && (self.depth > 0 || self.dollar) {
            self.depth += 1;
        }
        if c == b'}' && self.depth > 0 {
            self.depth -= 1;
        }
        self.dollar = self.depth == 0 && c == b'$';
    }

    fn in_interpolation(&self) -> bool {
        self.depth > 0
    }
}

/// The HCL1 lexer.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    options: LexerOptions,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input` with default options.
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    /// Creates a lexer over `input` with explicit options.
    pub fn with_options(input: &'a [u8], options: LexerOptions) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 0,
            options,
        }
    }

    /// Current line, 1-based.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column: bytes consumed since the last newline.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Consumes a UTF-8 byte order mark if one leads the input.
    ///
    /// Returns `true` when there was no BOM or a complete one was skipped.
    /// Returns `false` when the input starts with a truncated BOM, leaving
    /// the stream mid-sequence.
    pub fn skip_bom(&mut self) -> bool {
        if self.peek() != Some(0xEF) {
            return true;
        }
        self.bump();
        if self.peek() != Some(0xBB) {
            return false;
        }
        self.bump();
        if self.peek() != Some(0xBF) {
            return false;
        }
        self.bump();
        true
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += 1;
            if c == b'\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    fn consume(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Produces the next token, skipping whitespace and (by default)
    /// comments. The stream ends with [`Token::Eof`].
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(c) = self.peek() else {
                return Token::Eof;
            };

            match c {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'#' => {
                    self.bump();
                    let text = self.take_comment_text();
                    if self.options.preserve_comments {
                        return Token::Comment(text);
                    }
                }
                b'/' => {
                    self.bump();
                    if !self.consume(b'/') {
                        return Token::Illegal("unterminated comment".to_string());
                    }
                    let text = self.take_comment_text();
                    if self.options.preserve_comments {
                        return Token::Comment(text);
                    }
                }
                b'=' => {
                    self.bump();
                    return Token::Assign;
                }
                b'+' => {
                    self.bump();
                    return Token::Add;
                }
                b'-' => {
                    self.bump();
                    if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        return self.number(false, true);
                    }
                    return Token::Sub;
                }
                b'{' => {
                    self.bump();
                    return Token::LBrace;
                }
                b'}' => {
                    self.bump();
                    return Token::RBrace;
                }
                b'[' => {
                    self.bump();
                    return Token::LBrack;
                }
                b']' => {
                    self.bump();
                    return Token::RBrack;
                }
                b',' => {
                    self.bump();
                    return Token::Comma;
                }
                b'.' => {
                    self.bump();
                    if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        return self.number(true, false);
                    }
                    return Token::Period;
                }
                b'"' => return self.double_quoted_string(),
                b'\'' => return self.single_quoted_string(),
                b'<' => return self.heredoc(),
                _ => return self.value_token(),
            }
        }
    }

    /// Consumes to end of line and returns the skipped text, newline excluded.
    fn take_comment_text(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.bump();
        }
        let mut end = self.pos;
        if end > start && self.input[end - 1] == b'\r' {
            end -= 1;
        }
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    fn value_token(&mut self) -> Token {
        let Some(c) = self.peek() else {
            return Token::Eof;
        };

        if c.is_ascii_alphabetic() || c == b'_' {
            let mut s = String::new();
            s.push(c as char);
            self.bump();

            while let Some(c) = self.peek() {
                if is_ident_char(c) {
                    s.push(c as char);
                    self.bump();
                } else {
                    break;
                }
            }

            return match s.as_str() {
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                _ => Token::Ident(s),
            };
        }

        self.number(false, false)
    }

    fn number(&mut self, leading_dot: bool, leading_sub: bool) -> Token {
        // Hex literals carry their own digit alphabet.
        if !leading_dot && self.peek() == Some(b'0') {
            if let Some(b'x' | b'X') = self.peek_at(1) {
                self.bump();
                self.bump();
                return self.hex_number(leading_sub);
            }
        }

        let mut s = String::new();
        if leading_dot {
            s.push('.');
        }
        if leading_sub {
            s.push('-');
        }

        // The accumulation class is deliberately wide so that datetime-like
        // garbage (2016-01-01T00:00:00Z) lexes as one rejected unit instead
        // of a stream of surprising tokens.
        while let Some(c) = self.peek() {
            if c.is_ascii_digit()
                || matches!(c, b'.' | b'e' | b'E' | b'T' | b'Z' | b'_' | b':' | b'-' | b'+')
            {
                self.bump();
                s.push(c as char);
            } else {
                break;
            }
        }

        if is_integer(&s) {
            return match s.replace('_', "").parse::<i64>() {
                Ok(n) => Token::Int(n),
                Err(_) => Token::Illegal("Invalid token".to_string()),
            };
        }
        if is_float(&s) {
            return match s.replace('_', "").parse::<f64>() {
                Ok(x) => Token::Float(x),
                Err(_) => Token::Illegal("Invalid token".to_string()),
            };
        }

        Token::Illegal("Invalid token".to_string())
    }

    fn hex_number(&mut self, negative: bool) -> Token {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_hexdigit() {
                digits.push(c as char);
                self.bump();
            } else {
                break;
            }
        }
        if digits.is_empty() {
            return Token::Illegal("Invalid token".to_string());
        }
        match i64::from_str_radix(&digits, 16) {
            Ok(n) => Token::Int(if negative { -n } else { n }),
            Err(_) => Token::Illegal("Invalid token".to_string()),
        }
    }

    fn double_quoted_string(&mut self) -> Token {
        self.bump();

        // "" is the empty string; a third quote in a row is malformed.
        if self.peek() == Some(b'"') {
            self.bump();
            if self.peek() == Some(b'"') {
                return Token::Illegal("string didn't end".to_string());
            }
            return Token::String(String::new());
        }

        let mut out: Vec<u8> = Vec::new();
        let mut tracker = BraceTracker::default();

        loop {
            let Some(c) = self.peek() else {
                return Token::Illegal("string didn't end".to_string());
            };
            self.bump();
            tracker.observe(c);

            if c == b'\\' {
                if let Err(tok) = self.escape_sequence(&mut out, tracker.in_interpolation()) {
                    return tok;
                }
                continue;
            }
            if c == b'\n' && !tracker.in_interpolation() {
                return Token::Illegal(
                    "found newline while parsing non-HIL string literal".to_string(),
                );
            }
            if c == b'"' && !tracker.in_interpolation() {
                return match String::from_utf8(out) {
                    Ok(s) => Token::String(s),
                    Err(_) => Token::Illegal("string is not valid UTF-8".to_string()),
                };
            }

            out.push(c);
        }
    }

    /// Resolves one backslash escape, the backslash already consumed.
    fn escape_sequence(&mut self, out: &mut Vec<u8>, in_interpolation: bool) -> Result<(), Token> {
        let unknown = || Token::Illegal("string has unknown escape sequence".to_string());

        let Some(e) = self.peek() else {
            return Err(unknown());
        };
        self.bump();

        match e {
            b't' => out.push(b'\t'),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b'"' => out.push(b'"'),
            b'\'' => out.push(b'\''),
            b'\\' => out.push(b'\\'),
            b'x' | b'u' | b'U' => {
                let len = match e {
                    b'x' => 2,
                    b'u' => 4,
                    _ => 8,
                };
                let mut code: u32 = 0;
                for _ in 0..len {
                    let digit = self.peek().and_then(|h| (h as char).to_digit(16));
                    let Some(d) = digit else {
                        return Err(unknown());
                    };
                    self.bump();
                    code = code.wrapping_mul(16).wrapping_add(d);
                }
                let Some(ch) = char::from_u32(code) else {
                    return Err(unknown());
                };
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            b'\n' => {
                if !in_interpolation {
                    return Err(Token::Illegal("literal not terminated".to_string()));
                }
                self.skip_continuation_whitespace();
            }
            b'\r' if self.peek() == Some(b'\n') => {
                self.bump();
                if !in_interpolation {
                    return Err(Token::Illegal("literal not terminated".to_string()));
                }
                self.skip_continuation_whitespace();
            }
            _ => return Err(unknown()),
        }

        Ok(())
    }

    fn skip_continuation_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.bump();
        }
    }

    fn single_quoted_string(&mut self) -> Token {
        self.bump();

        if self.peek() == Some(b'\'') {
            self.bump();
            if self.peek() == Some(b'\'') {
                return Token::Illegal("string didn't end".to_string());
            }
            return Token::String(String::new());
        }

        let mut out: Vec<u8> = Vec::new();
        loop {
            let Some(c) = self.peek() else {
                return Token::Illegal("string didn't end".to_string());
            };
            self.bump();
            match c {
                b'\'' => {
                    return match String::from_utf8(out) {
                        Ok(s) => Token::String(s),
                        Err(_) => Token::Illegal("string is not valid UTF-8".to_string()),
                    };
                }
                b'\n' => {
                    return Token::Illegal(
                        "found newline while parsing string literal".to_string(),
                    );
                }
                _ => out.push(c),
            }
        }
    }

    fn heredoc(&mut self) -> Token {
        self.bump();
        if !self.consume(b'<') {
            return Token::Illegal("heredoc didn't start with '<<'".to_string());
        }

        // In `<<-` mode the column of the `<<` marker fixes the indent width
        // that content lines are expected to carry.
        let mut indented = false;
        let mut indent = 0usize;
        if self.peek() == Some(b'-') {
            indented = true;
            indent = self.column.saturating_sub(2);
            self.bump();
        }

        let mut anchor = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                anchor.push(c as char);
                self.bump();
            } else {
                break;
            }
        }

        if self.peek().is_none() {
            return Token::Illegal("end of file reached".to_string());
        }
        if self.peek() == Some(b'\r') {
            self.bump();
        }
        if self.peek() != Some(b'\n') {
            return Token::Illegal("invalid characters in heredoc anchor".to_string());
        }
        if anchor.is_empty() {
            return Token::Illegal("zero-length heredoc anchor".to_string());
        }
        self.bump();

        let mut buffer = String::new();
        loop {
            if self.peek().is_none() {
                return Token::Illegal("heredoc not terminated".to_string());
            }
            let line = match self.take_line() {
                Ok(line) => line,
                Err(tok) => return tok,
            };
            if line.trim() == anchor {
                return Token::Heredoc(buffer);
            }
            let kept = if indented {
                strip_indent(&line, indent)
            } else {
                line.as_str()
            };
            buffer.push_str(kept);
            buffer.push('\n');
        }
    }

    /// Consumes one line including its terminator; returns it without the
    /// trailing `\n` or `\r\n`.
    fn take_line(&mut self) -> Result<String, Token> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.bump();
        }
        let mut end = self.pos;
        if self.peek() == Some(b'\n') {
            self.bump();
        }
        if end > start && self.input[end - 1] == b'\r' {
            end -= 1;
        }
        match std::str::from_utf8(&self.input[start..end]) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(Token::Illegal("heredoc is not valid UTF-8".to_string())),
        }
    }
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b'.')
}

/// Strips exactly `indent` leading spaces; lines with fewer keep their
/// hanging indent verbatim.
fn strip_indent(line: &str, indent: usize) -> &str {
    let leading = line.bytes().take_while(|&b| b == b' ').count();
    if leading >= indent {
        &line[indent..]
    } else {
        line
    }
}

/// Matches `[+-]?\d+(_\d+)*`.
fn is_integer(s: &str) -> bool {
    let b = s.as_bytes();
    let mut p = 0;
    if p < b.len() && (b[p] == b'+' || b[p] == b'-') {
        p += 1;
    }
    let digits_from = p;
    while p < b.len() && b[p].is_ascii_digit() {
        p += 1;
        if p < b.len() && b[p] == b'_' {
            p += 1;
            if !(p < b.len() && b[p].is_ascii_digit()) {
                return false;
            }
        }
    }
    p > digits_from && p == b.len()
}

/// Matches `[+-]? (\d+(_\d+)*)? (\.\d+(_\d+)*)? ([eE][+-]?\d+(_\d+)*)?` with
/// at least one mantissa digit. Pure integers also match; callers must test
/// [`is_integer`] first.
fn is_float(s: &str) -> bool {
    let b = s.as_bytes();
    if b.is_empty() {
        return false;
    }
    let mut p = 0;
    if b[p] == b'+' || b[p] == b'-' {
        p += 1;
    }

    let mut ok = false;
    while p < b.len() && b[p].is_ascii_digit() {
        p += 1;
        ok = true;
        if p < b.len() && b[p] == b'_' {
            p += 1;
            if !(p < b.len() && b[p].is_ascii_digit()) {
                return false;
            }
        }
    }
    if p < b.len() && b[p] == b'.' {
        p += 1;
    }
    while p < b.len() && b[p].is_ascii_digit() {
        p += 1;
        ok = true;
        if p < b.len() && b[p] == b'_' {
            p += 1;
            if !(p < b.len() && b[p].is_ascii_digit()) {
                return false;
            }
        }
    }
    if !ok {
        return false;
    }

    if p < b.len() && (b[p] == b'e' || b[p] == b'E') {
        p += 1;
        if p < b.len() && (b[p] == b'+' || b[p] == b'-') {
            p += 1;
        }
        let mut exp_ok = false;
        while p < b.len() && b[p].is_ascii_digit() {
            p += 1;
            exp_ok = true;
            if p < b.len() && b[p] == b'_' {
                p += 1;
                if !(p < b.len() && b[p].is_ascii_digit()) {
                    return false;
                }
            }
        }
        if !exp_ok {
            return false;
        }
    }

    p == b.len()
}
