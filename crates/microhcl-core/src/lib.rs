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

//! Core parser and document model for HCL1 configuration text.
//!
//! This crate lexes and parses HCL1 (assignments, labeled blocks,
//! heterogeneous lists, heredocs, and strings with `${...}` interpolation
//! fragments) into a [`Value`] tree, and writes values back out as text.
//! Interpolations are not evaluated; their bytes are preserved inside
//! ordinary strings.
//!
//! # Block merging
//!
//! HCL fuses repeated keys instead of rejecting them. A second assignment to
//! an existing key promotes the binding into a list, and labeled blocks
//! lower into nested objects before merging:
//!
//! ```
//! use microhcl_core::parse_str;
//!
//! let doc = parse_str(r#"
//! x = 1
//! x = 2
//! chara "putit" { hp = 10 }
//! "#).unwrap();
//!
//! assert_eq!(doc.get::<Vec<i64>>("x").unwrap(), vec![1, 2]);
//! assert_eq!(doc.get::<i64>("chara.putit.hp").unwrap(), 10);
//! ```
//!
//! # Modules
//!
//! - [`lex`]: the hand-written byte lexer
//! - [`Value`]: the document model with dotted-key navigation and merging
//! - [`parse`] / [`parse_str`]: entry points
//!
//! The `ordered-map` feature (default) backs objects with a `BTreeMap` so
//! iteration and emission are deterministic; the `serde` feature derives
//! `Serialize`/`Deserialize` on [`Value`].

mod error;
pub mod lex;
mod parser;
mod path;
mod value;
mod writer;

pub use error::{HclError, HclResult};
pub use parser::{parse, parse_str};
pub use path::parse_key_path;
pub use value::{FromValue, List, Object, Value};
