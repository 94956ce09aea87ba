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

//! Dotted-key path splitting.
//!
//! Keys passed to [`Value::find`], [`Value::set`], and [`Value::erase`] are
//! paths: `.` separates segments, and a segment may be double-quoted to
//! carry dots or other punctuation (`"a.b".c` names the child `c` of the
//! literal key `a.b`). Inside quotes, `\"` and `\\` escape.
//!
//! [`Value::find`]: crate::Value::find
//! [`Value::set`]: crate::Value::set
//! [`Value::erase`]: crate::Value::erase

use crate::error::{HclError, HclResult};

/// Splits a dotted key into its path segments.
///
/// Fails on empty keys, empty segments, unterminated quotes, and stray
/// characters after a quoted segment.
///
/// # Examples
///
/// ```
/// use microhcl_core::parse_key_path;
///
/// assert_eq!(parse_key_path("a.b.c").unwrap(), vec!["a", "b", "c"]);
/// assert_eq!(parse_key_path(r#""a.b".c"#).unwrap(), vec!["a.b", "c"]);
/// assert!(parse_key_path("a..b").is_err());
/// ```
pub fn parse_key_path(key: &str) -> HclResult<Vec<String>> {
    let invalid = || HclError::invalid_key(key);
    let mut segments = Vec::new();
    let mut chars = key.chars().peekable();

    loop {
        let segment = if chars.peek() == Some(&'"') {
            chars.next();
            let mut seg = String::new();
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(c @ ('"' | '\\')) => seg.push(c),
                        _ => return Err(invalid()),
                    },
                    Some('"') => break,
                    Some(c) => seg.push(c),
                    None => return Err(invalid()),
                }
            }
            seg
        } else {
            let mut seg = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                if c == '"' {
                    return Err(invalid());
                }
                seg.push(c);
                chars.next();
            }
            seg
        };

        if segment.is_empty() {
            return Err(invalid());
        }
        segments.push(segment);

        match chars.next() {
            None => return Ok(segments),
            Some('.') => {}
            Some(_) => return Err(invalid()),
        }
    }
}
