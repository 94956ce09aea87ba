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

//! The HCL document value model.

use crate::error::{HclError, HclResult};
use crate::path::parse_key_path;

/// An ordered sequence of values.
pub type List = Vec<Value>;

/// A mapping from string keys to values.
///
/// With the `ordered-map` feature (on by default) this is a `BTreeMap`, so
/// key iteration and emission are lexicographic and deterministic. Without
/// it, a `HashMap` with unspecified iteration order.
#[cfg(feature = "ordered-map")]
pub type Object = std::collections::BTreeMap<String, Value>;

/// A mapping from string keys to values.
#[cfg(not(feature = "ordered-map"))]
pub type Object = std::collections::HashMap<String, Value>;

/// A single HCL document value.
///
/// The document root produced by a successful parse is always an
/// [`Value::Object`]. `Null` marks an uninitialized value; it appears
/// transiently during construction and is not a legal document value.
///
/// Integers and floats are distinct: `Value::Int(1)` and `Value::Float(1.0)`
/// are not equal and never coerce into each other.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Uninitialized sentinel.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// IEEE-754 double.
    Float(f64),
    /// UTF-8 string. Quoted strings, heredocs, and barewords all collapse
    /// into this variant with no marker distinguishing their origin.
    String(String),
    /// Ordered sequence.
    List(List),
    /// Keyed mapping.
    Object(Object),
}

impl Value {
    /// The name of this value's variant, as used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Whether this value is anything other than `Null`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Null)
    }

    /// Whether this value is the `Null` sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Whether this value is an integer.
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Whether this value is a float.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Whether this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Whether this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether this value is an integer or a float.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// The element count for lists and objects, 0 for `Null`, and 1 for
    /// every scalar.
    pub fn size(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::List(items) => items.len(),
            Self::Object(map) => map.len(),
            _ => 1,
        }
    }

    /// Whether [`size`](Self::size) is zero.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if any. Floats do not coerce.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The float payload, if any. Integers do not coerce.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Either numeric variant widened to `f64`. This is the one deliberate
    /// widening accessor; `as_int`/`as_float` stay strict.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The list payload, if any.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The list payload, mutably.
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The object payload, if any.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The object payload, mutably.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value converts to `T` without error.
    pub fn is<T: FromValue>(&self) -> bool {
        T::matches(self)
    }

    /// Converts this value to `T`, failing with a type error on variant
    /// mismatch.
    pub fn try_as<T: FromValue>(&self) -> HclResult<T> {
        T::from_value(self)
    }

    // ----------------------------------------------------------------------
    // Object access

    /// Typed lookup through a dotted key.
    pub fn get<T: FromValue>(&self, key: &str) -> HclResult<T> {
        if !self.is_object() {
            return Err(HclError::type_mismatch(self.type_name(), "object"));
        }
        match self.find(key) {
            Some(value) => value.try_as(),
            None => Err(HclError::key_not_found(key)),
        }
    }

    /// Finds a value through a dotted key. A non-object anywhere along the
    /// path is a miss. For literal single-key access use
    /// [`find_child`](Self::find_child).
    pub fn find(&self, key: &str) -> Option<&Value> {
        if !self.is_object() {
            return None;
        }
        let path = parse_key_path(key).ok()?;
        let (last, walk) = path.split_last()?;
        let mut current = self;
        for part in walk {
            current = current.find_child(part)?;
            if !current.is_object() {
                return None;
            }
        }
        current.find_child(last)
    }

    /// Mutable counterpart of [`find`](Self::find).
    pub fn find_mut(&mut self, key: &str) -> Option<&mut Value> {
        if !self.is_object() {
            return None;
        }
        let path = parse_key_path(key).ok()?;
        let (last, walk) = path.split_last()?;
        let mut current = self;
        for part in walk {
            current = current.find_child_mut(part)?;
            if !current.is_object() {
                return None;
            }
        }
        current.find_child_mut(last)
    }

    /// Whether a dotted key resolves to a value.
    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Stores `value` under a dotted key, creating intermediate objects as
    /// needed. A `Null` receiver becomes an object. Returns the stored slot.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> HclResult<&mut Value> {
        let path = parse_key_path(key)?;
        let Some((last, walk)) = path.split_last() else {
            return Err(HclError::invalid_key(key));
        };

        if self.is_null() {
            *self = Value::Object(Object::new());
        }

        let mut current = self;
        for part in walk {
            let map = match current {
                Value::Object(map) => map,
                other => return Err(HclError::type_mismatch(other.type_name(), "object")),
            };
            let child = map
                .entry(part.clone())
                .or_insert_with(|| Value::Object(Object::new()));
            if !child.is_object() {
                return Err(HclError::type_mismatch(child.type_name(), "object"));
            }
            current = child;
        }

        let map = match current {
            Value::Object(map) => map,
            other => return Err(HclError::type_mismatch(other.type_name(), "object")),
        };
        let slot = map.entry(last.clone()).or_insert(Value::Null);
        *slot = value.into();
        Ok(slot)
    }

    /// Removes the value a dotted key resolves to. Returns whether anything
    /// was removed.
    pub fn erase(&mut self, key: &str) -> bool {
        let Ok(path) = parse_key_path(key) else {
            return false;
        };
        let Some((last, walk)) = path.split_last() else {
            return false;
        };
        let mut current = self;
        for part in walk {
            let Some(child) = current.find_child_mut(part) else {
                return false;
            };
            if !child.is_object() {
                return false;
            }
            current = child;
        }
        current.erase_child(last)
    }

    /// Finds a direct child by its literal key. Dots are not special here.
    pub fn find_child(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Mutable counterpart of [`find_child`](Self::find_child).
    pub fn find_child_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Self::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Stores `value` under a literal key. A `Null` receiver becomes an
    /// object. Empty keys are illegal.
    pub fn set_child(&mut self, key: &str, value: impl Into<Value>) -> HclResult<&mut Value> {
        if key.is_empty() {
            return Err(HclError::invalid_key(key));
        }
        if self.is_null() {
            *self = Value::Object(Object::new());
        }
        match self {
            Value::Object(map) => {
                let slot = map.entry(key.to_string()).or_insert(Value::Null);
                *slot = value.into();
                Ok(slot)
            }
            other => Err(HclError::type_mismatch(other.type_name(), "object")),
        }
    }

    /// Removes a direct child by its literal key.
    pub fn erase_child(&mut self, key: &str) -> bool {
        match self {
            Self::Object(map) => map.remove(key).is_some(),
            _ => false,
        }
    }

    /// Whether this and `other` are objects sharing at least one top-level
    /// key. Nested keys are not examined.
    pub fn shares_key_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.keys().any(|k| b.contains_key(k)),
            _ => false,
        }
    }

    // ----------------------------------------------------------------------
    // List access

    /// Typed lookup by list index.
    pub fn get_index<T: FromValue>(&self, index: usize) -> HclResult<T> {
        match self {
            Value::List(items) => match items.get(index) {
                Some(value) => value.try_as(),
                None => Err(HclError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                }),
            },
            other => Err(HclError::type_mismatch(other.type_name(), "list")),
        }
    }

    /// Appends to a list. A `Null` receiver becomes a list. Returns the
    /// stored slot.
    pub fn push(&mut self, value: impl Into<Value>) -> HclResult<&mut Value> {
        if self.is_null() {
            *self = Value::List(List::new());
        }
        match self {
            Value::List(items) => {
                items.push(value.into());
                let last = items.len() - 1;
                Ok(&mut items[last])
            }
            other => Err(HclError::type_mismatch(other.type_name(), "list")),
        }
    }

    // ----------------------------------------------------------------------
    // Merging

    /// Recursively merges `other` into this object. Both must be objects.
    ///
    /// Keys absent here are copied over; keys whose values are objects on
    /// both sides merge recursively; anything else is overwritten by
    /// `other`'s value. This merge is destructive by design, unlike the
    /// list-promoting [`merge_keyed`](Self::merge_keyed) the parser uses.
    pub fn merge(&mut self, other: &Value) -> HclResult<()> {
        match (self, other) {
            (Value::Object(dst), Value::Object(src)) => {
                for (key, incoming) in src.iter() {
                    match dst.get_mut(key) {
                        Some(existing) if existing.is_object() && incoming.is_object() => {
                            existing.merge(incoming)?;
                        }
                        Some(existing) => *existing = incoming.clone(),
                        None => {
                            dst.insert(key.clone(), incoming.clone());
                        }
                    }
                }
                Ok(())
            }
            (lhs, rhs) => {
                let actual = if lhs.is_object() {
                    rhs.type_name()
                } else {
                    lhs.type_name()
                };
                Err(HclError::type_mismatch(actual, "object"))
            }
        }
    }

    /// Grafts a keyed item onto this object the way the parser does.
    ///
    /// `keys[0]` is the binding name; any remaining keys are block labels
    /// that wrap `value` in nested single-key objects. The binding then
    /// follows the reassignment policy:
    ///
    /// - a fresh key is inserted;
    /// - an existing list is appended to;
    /// - two objects with no top-level key in common fuse via
    ///   [`merge`](Self::merge), which is how `chara a { ... }` and
    ///   `chara b { ... }` become one `chara` object;
    /// - anything else (scalar reassignment, or same-label repetition)
    ///   promotes the binding into a list.
    pub fn merge_keyed(&mut self, keys: &[String], value: Value) -> HclResult<()> {
        let Some((head, labels)) = keys.split_first() else {
            return Err(HclError::invalid_key(""));
        };
        if keys.iter().any(|k| k.is_empty()) {
            return Err(HclError::invalid_key(keys.join(".")));
        }

        let mut value = value;
        for key in labels.iter().rev() {
            let mut wrapper = Object::new();
            wrapper.insert(key.clone(), value);
            value = Value::Object(wrapper);
        }

        let map = match self {
            Value::Object(map) => map,
            other => return Err(HclError::type_mismatch(other.type_name(), "object")),
        };

        match map.get_mut(head) {
            None => {
                map.insert(head.clone(), value);
            }
            Some(Value::List(items)) => {
                items.push(value);
            }
            Some(existing)
                if existing.is_object()
                    && value.is_object()
                    && !existing.shares_key_with(&value) =>
            {
                existing.merge(&value)?;
            }
            Some(existing) => {
                tracing::trace!(key = head.as_str(), "promoting existing binding to a list");
                let prior = std::mem::take(existing);
                *existing = Value::List(vec![prior, value]);
            }
        }
        Ok(())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

/// Conversion from a [`Value`] into a concrete Rust type.
///
/// Implementations exist for the scalar payloads, `String`, [`Object`],
/// `Vec<T>` of any implementing type, and [`Value`] itself. `Vec<T>`
/// considers itself a match for any list whose first element matches `T`
/// (and for the empty list), so homogeneous lists extract in one call:
///
/// ```
/// use microhcl_core::parse_str;
///
/// let doc = parse_str("ports = [80, 443]").unwrap();
/// let ports: Vec<i64> = doc.get("ports").unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
pub trait FromValue: Sized {
    /// Name used in type-mismatch diagnostics.
    fn type_name() -> &'static str;

    /// Whether `value` converts without error.
    fn matches(value: &Value) -> bool;

    /// Converts, failing with a type error on variant mismatch.
    fn from_value(value: &Value) -> HclResult<Self>;
}

impl FromValue for bool {
    fn type_name() -> &'static str {
        "bool"
    }

    fn matches(value: &Value) -> bool {
        value.is_bool()
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| HclError::type_mismatch(value.type_name(), Self::type_name()))
    }
}

impl FromValue for i64 {
    fn type_name() -> &'static str {
        "int"
    }

    fn matches(value: &Value) -> bool {
        value.is_int()
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        value
            .as_int()
            .ok_or_else(|| HclError::type_mismatch(value.type_name(), Self::type_name()))
    }
}

impl FromValue for f64 {
    fn type_name() -> &'static str {
        "float"
    }

    fn matches(value: &Value) -> bool {
        value.is_float()
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        value
            .as_float()
            .ok_or_else(|| HclError::type_mismatch(value.type_name(), Self::type_name()))
    }
}

impl FromValue for String {
    fn type_name() -> &'static str {
        "string"
    }

    fn matches(value: &Value) -> bool {
        value.is_string()
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| HclError::type_mismatch(value.type_name(), Self::type_name()))
    }
}

impl FromValue for Object {
    fn type_name() -> &'static str {
        "object"
    }

    fn matches(value: &Value) -> bool {
        value.is_object()
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| HclError::type_mismatch(value.type_name(), Self::type_name()))
    }
}

impl FromValue for Value {
    fn type_name() -> &'static str {
        "value"
    }

    fn matches(_: &Value) -> bool {
        true
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn type_name() -> &'static str {
        "list"
    }

    fn matches(value: &Value) -> bool {
        match value {
            Value::List(items) => items.first().map_or(true, T::matches),
            _ => false,
        }
    }

    fn from_value(value: &Value) -> HclResult<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(HclError::type_mismatch(other.type_name(), "list")),
        }
    }
}
