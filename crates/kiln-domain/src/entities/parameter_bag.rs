//! Ordered parameter storage with `%placeholder%` resolution

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result};

/// Ordered name to value mapping of registry parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    parameters: IndexMap<String, Value>,
}

impl ParameterBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag pre-filled with `parameters`
    pub fn from_map(parameters: IndexMap<String, Value>) -> Self {
        Self { parameters }
    }

    /// Raw (unresolved) value of `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Whether `name` is defined
    pub fn has(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Insert or overwrite `name`
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.parameters.insert(name.into(), value);
    }

    /// Merge `parameters`, overwriting existing names (last writer wins)
    pub fn add(&mut self, parameters: IndexMap<String, Value>) {
        self.parameters.extend(parameters);
    }

    /// Every parameter in insertion order
    pub fn all(&self) -> &IndexMap<String, Value> {
        &self.parameters
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Fully resolved value of parameter `name`
    pub fn resolve_parameter(&self, name: &str) -> Result<Value> {
        self.resolve_named(name, &mut Vec::new())
    }

    /// Replace every placeholder inside `value`
    ///
    /// A string that is exactly `%name%` takes the parameter's value with its
    /// own type; placeholders embedded in longer strings are interpolated and
    /// `%%` escapes a literal percent sign.
    pub fn resolve_value(&self, value: &Value) -> Result<Value> {
        self.resolve_with(value, &mut Vec::new())
    }

    fn resolve_named(&self, name: &str, stack: &mut Vec<String>) -> Result<Value> {
        if stack.iter().any(|seen| seen == name) {
            stack.push(name.to_string());
            return Err(Error::compilation(format!(
                "Circular reference detected for parameter \"{name}\" (\"{}\")",
                stack.join("\" > \"")
            )));
        }
        let raw = self.parameters.get(name).ok_or_else(|| {
            Error::compilation(format!(
                "You have requested a non-existent parameter \"{name}\""
            ))
        })?;
        stack.push(name.to_string());
        let resolved = self.resolve_with(raw, stack);
        stack.pop();
        resolved
    }

    fn resolve_with(&self, value: &Value, stack: &mut Vec<String>) -> Result<Value> {
        match value {
            Value::String(s) => self.resolve_string(s, stack),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_with(item, stack))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut resolved = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    resolved.insert(key.clone(), self.resolve_with(item, stack)?);
                }
                Ok(Value::Object(resolved))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_string(&self, s: &str, stack: &mut Vec<String>) -> Result<Value> {
        if let Some(name) = placeholder_name(s) {
            return self.resolve_named(name, stack);
        }

        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            if let Some(escaped) = after.strip_prefix('%') {
                out.push('%');
                rest = escaped;
                continue;
            }
            let Some(end) = after.find('%') else {
                out.push('%');
                rest = after;
                continue;
            };
            let name = &after[..end];
            if name.contains(char::is_whitespace) {
                out.push('%');
                rest = after;
                continue;
            }
            match self.resolve_named(name, stack)? {
                Value::String(v) => out.push_str(&v),
                Value::Null => {}
                v @ (Value::Bool(_) | Value::Number(_)) => out.push_str(&v.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::compilation(format!(
                        "A string value must be composed of strings and/or numbers, \
                         but found parameter \"{name}\" of type array inside string value \"{s}\""
                    )));
                }
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(Value::String(out))
    }
}

/// `%name%` spanning the whole string
pub(crate) fn placeholder_name(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('%')?.strip_suffix('%')?;
    if inner.is_empty() || inner.contains('%') || inner.contains(char::is_whitespace) {
        return None;
    }
    Some(inner)
}
