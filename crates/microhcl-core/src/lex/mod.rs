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

//! Lexical analysis for HCL1.
//!
//! The lexer is a hand-written byte scanner with one byte of lookahead. It
//! distinguishes integers from floats, two flavors of quoted string, heredocs
//! with optional indent stripping, and identifiers (in which `.` and `-` are
//! interior characters). `${...}` interpolation fragments inside
//! double-quoted strings are tracked only far enough to know where the
//! string ends; their bytes are preserved verbatim.
//!
//! # Examples
//!
//! ```
//! use microhcl_core::lex::{Lexer, Token};
//!
//! let mut lexer = Lexer::new(b"port = 8080");
//! assert_eq!(lexer.next_token(), Token::Ident("port".to_string()));
//! assert_eq!(lexer.next_token(), Token::Assign);
//! assert_eq!(lexer.next_token(), Token::Int(8080));
//! assert_eq!(lexer.next_token(), Token::Eof);
//! ```

mod lexer;
mod token;

pub use lexer::{Lexer, LexerOptions};
pub use token::Token;
