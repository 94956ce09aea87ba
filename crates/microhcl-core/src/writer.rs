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

//! Textual emission of document values.
//!
//! Objects are written in two passes: scalar and plain-list bindings first as
//! `key = value` lines, then object-valued keys as `[section]` headers and
//! lists of objects as one `[[section]]` header per element. With the default
//! `ordered-map` feature the output is deterministic (keys emit in
//! lexicographic order).

use std::fmt::Write;

use crate::error::{HclError, HclResult};
use crate::value::Value;

impl Value {
    /// Serializes this value as HCL text into `out`.
    ///
    /// Fails on a [`Value::Null`] anywhere in the tree.
    pub fn write<W: Write>(&self, out: &mut W) -> HclResult<()> {
        write_value(self, out, "")
    }

    /// Serializes this value as HCL text.
    ///
    /// ```
    /// use microhcl_core::parse_str;
    ///
    /// let doc = parse_str("b = 2\na = 1").unwrap();
    /// assert_eq!(doc.to_hcl().unwrap(), "a = 1\nb = 2\n");
    /// ```
    pub fn to_hcl(&self) -> HclResult<String> {
        let mut out = String::new();
        self.write(&mut out)?;
        Ok(out)
    }
}

fn write_value<W: Write>(value: &Value, out: &mut W, key_prefix: &str) -> HclResult<()> {
    match value {
        Value::Null => Err(HclError::NullValue),
        Value::Bool(b) => {
            write!(out, "{}", if *b { "true" } else { "false" })?;
            Ok(())
        }
        Value::Int(n) => {
            write!(out, "{n}")?;
            Ok(())
        }
        Value::Float(x) => {
            // Fixed six-digit form so floats never collapse into integer
            // spelling: 1.0 emits as "1.000000".
            write!(out, "{x:.6}")?;
            Ok(())
        }
        Value::String(s) => {
            write!(out, "\"{}\"", escape_string(s))?;
            Ok(())
        }
        Value::List(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(item, out, key_prefix)?;
            }
            out.write_char(']')?;
            Ok(())
        }
        Value::Object(map) => {
            for (key, child) in map.iter() {
                if child.is_object() || is_object_list(child) {
                    continue;
                }
                write!(out, "{} = ", escape_key(key))?;
                write_value(child, out, key_prefix)?;
                out.write_char('\n')?;
            }
            for (key, child) in map.iter() {
                if child.is_object() {
                    let section = join_section(key_prefix, key);
                    write!(out, "\n[{section}]\n")?;
                    write_value(child, out, &section)?;
                } else if let Value::List(items) = child {
                    if !is_object_list(child) {
                        continue;
                    }
                    let section = join_section(key_prefix, key);
                    for item in items {
                        write!(out, "\n[[{section}]]\n")?;
                        write_value(item, out, &section)?;
                    }
                }
            }
            Ok(())
        }
    }
}

/// A non-empty list whose elements are objects; emitted as repeated
/// `[[section]]` blocks rather than inline.
fn is_object_list(value: &Value) -> bool {
    match value {
        Value::List(items) => !items.is_empty() && items[0].is_object(),
        _ => false,
    }
}

fn join_section(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        escape_key(key)
    } else {
        format!("{prefix}.{}", escape_key(key))
    }
}

/// Keys made of `[A-Za-z0-9_-]` pass through; anything else is quoted with
/// backslash and quote escaped.
fn escape_key(key: &str) -> String {
    let plain = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if plain && !key.is_empty() {
        return key.to_string();
    }

    let mut escaped = String::with_capacity(key.len() + 2);
    escaped.push('"');
    for c in key.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('"');
    escaped
}

fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}
