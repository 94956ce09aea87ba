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

//! Error types for HCL parsing and document access.

use thiserror::Error;

/// An error raised while lexing or parsing HCL text, or while accessing a
/// parsed [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HclError {
    /// Lexical or syntactic violation. The first one encountered aborts the
    /// parse; `line` is the 1-based line the lexer had reached.
    #[error("Error: line {line}: {reason}")]
    Syntax {
        /// Line number (1-based).
        line: usize,
        /// Human-readable reason.
        reason: String,
    },

    /// A typed accessor was used on a value of a different variant.
    #[error("type error: this value is {actual} but {requested} was requested")]
    TypeMismatch {
        /// The variant the value actually holds.
        actual: &'static str,
        /// The variant the caller asked for.
        requested: &'static str,
    },

    /// A dotted-key lookup named a key that does not exist.
    #[error("key {key} was not found")]
    KeyNotFound {
        /// The key as passed by the caller.
        key: String,
    },

    /// A list index past the end.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The list length.
        len: usize,
    },

    /// A dotted key that could not be split into segments (empty key, empty
    /// segment, unterminated quote).
    #[error("invalid key: {key}")]
    InvalidKey {
        /// The offending key.
        key: String,
    },

    /// The null variant reached the writer. Null marks an uninitialized or
    /// failed document and has no textual form.
    #[error("null type value is not a valid value")]
    NullValue,

    /// A file could not be opened or read.
    #[error("could not open file: {path}")]
    FileOpen {
        /// The path as passed by the caller.
        path: String,
    },
}

impl HclError {
    /// Creates a syntax error at `line`.
    pub fn syntax(reason: impl Into<String>, line: usize) -> Self {
        Self::Syntax {
            line,
            reason: reason.into(),
        }
    }

    /// Creates a type mismatch error from observed and requested type names.
    pub fn type_mismatch(actual: &'static str, requested: &'static str) -> Self {
        Self::TypeMismatch { actual, requested }
    }

    /// Creates a missing-key error.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Creates an invalid-key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Creates a file-open error.
    pub fn file_open(path: impl Into<String>) -> Self {
        Self::FileOpen { path: path.into() }
    }

    /// The line this error points at, if it carries one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

// The writer renders through std::fmt; formatter failures have no useful
// position information.
impl From<std::fmt::Error> for HclError {
    fn from(_: std::fmt::Error) -> Self {
        Self::syntax("write error", 0)
    }
}

/// Result type for HCL operations.
pub type HclResult<T> = Result<T, HclError>;
