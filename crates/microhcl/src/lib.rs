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

//! # microhcl
//!
//! A small HCL1 parser and in-memory document model, for embedding in host
//! applications that read HashiCorp-style configuration.
//!
//! ## Quick start
//!
//! ```
//! use microhcl::parse;
//!
//! let doc = parse(r#"
//! name = "web"
//!
//! listener "http" {
//!     port = 8080
//! }
//! listener "https" {
//!     port = 8443
//! }
//! "#).unwrap();
//!
//! assert_eq!(doc.get::<String>("name").unwrap(), "web");
//! assert_eq!(doc.get::<i64>("listener.http.port").unwrap(), 8080);
//! assert_eq!(doc.get::<i64>("listener.https.port").unwrap(), 8443);
//! ```
//!
//! ## What it handles
//!
//! - assignments, labeled blocks, nested objects, heterogeneous lists
//! - heredocs, including `<<-` indent stripping
//! - both quoted string flavors, with `${...}` interpolation fragments
//!   preserved verbatim as string bytes (never evaluated)
//! - HCL's block-merging rules: repeated keys promote into lists, and
//!   differently-labeled blocks fuse into one object
//!
//! Parsing stops at the first error and reports it as
//! `Error: line N: <reason>`.

use std::path::Path;

pub use microhcl_core::{
    parse_key_path, FromValue, HclError, HclResult, List, Object, Value,
};

/// Lexical analysis utilities.
pub mod lex {
    //! Direct access to the token stream, for tooling that wants tokens
    //! rather than documents.
    pub use microhcl_core::lex::{Lexer, LexerOptions, Token};
}

/// Parses an HCL document from a string.
///
/// On success the returned value is always an object.
#[inline]
pub fn parse(input: &str) -> HclResult<Value> {
    microhcl_core::parse_str(input)
}

/// Parses an HCL document from raw bytes.
///
/// A leading UTF-8 byte order mark is skipped.
#[inline]
pub fn parse_slice(input: &[u8]) -> HclResult<Value> {
    microhcl_core::parse(input)
}

/// Parses an HCL document from a file.
///
/// Any failure to read the file reports `could not open file: <path>`.
///
/// # Examples
///
/// ```no_run
/// let doc = microhcl::parse_file("service.hcl").unwrap();
/// println!("{}", doc.get::<String>("name").unwrap());
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> HclResult<Value> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading configuration file");
    let bytes =
        std::fs::read(path).map_err(|_| HclError::file_open(path.display().to_string()))?;
    parse_slice(&bytes)
}

/// Checks a string for syntactic validity without keeping the document.
#[inline]
pub fn validate(input: &str) -> HclResult<()> {
    parse(input).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let doc = parse("").unwrap();
        assert!(doc.is_object());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_key_value() {
        let doc = parse("key = \"value\"\nnum = 42").unwrap();
        assert_eq!(doc.get::<String>("key").unwrap(), "value");
        assert_eq!(doc.get::<i64>("num").unwrap(), 42);
    }

    #[test]
    fn test_validate() {
        assert!(validate("x = 1").is_ok());
        assert!(validate("x =").is_err());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/no/such/dir/config.hcl").unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not open file: /no/such/dir/config.hcl"
        );
    }
}
