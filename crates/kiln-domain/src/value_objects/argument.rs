//! Service constructor arguments
//!
//! Definition sources write arguments as plain values with two string
//! conventions borrowed from the usual DI formats:
//!
//! | Raw value | Meaning |
//! |-----------|---------|
//! | `"@mailer"` | reference to the `mailer` service |
//! | `"@?mailer"` | optional reference, `null` when `mailer` is not defined |
//! | `"@@literal"` | the string `"@literal"` |
//! | `"%name%"` | the whole value of parameter `name` |
//! | `"smtp://%host%"` | string interpolation, resolved at compile time |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::parameter_bag::placeholder_name;

/// One constructor argument of a service definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Argument {
    /// A literal value (strings may still carry `%param%` placeholders before compile)
    Value {
        /// The literal
        value: Value,
    },
    /// A reference to another service
    Reference {
        /// Target service id (or alias)
        id: String,
        /// Resolve to `null` instead of failing when the target is missing
        #[serde(default)]
        optional: bool,
    },
    /// The whole value of a parameter
    Parameter {
        /// Parameter name
        name: String,
    },
    /// A list of nested arguments
    List {
        /// The elements
        items: Vec<Argument>,
    },
}

impl Argument {
    /// Wrap a literal value
    pub fn value(value: impl Into<Value>) -> Self {
        Argument::Value {
            value: value.into(),
        }
    }

    /// Required reference to a service
    pub fn reference(id: impl Into<String>) -> Self {
        Argument::Reference {
            id: id.into(),
            optional: false,
        }
    }

    /// Interpret a raw source value using the `@` / `%` conventions
    pub fn from_raw(raw: Value) -> Self {
        match raw {
            Value::String(s) => Self::from_raw_str(s),
            Value::Array(items) => Argument::List {
                items: items.into_iter().map(Argument::from_raw).collect(),
            },
            other => Argument::Value { value: other },
        }
    }

    fn from_raw_str(s: String) -> Self {
        if let Some(rest) = s.strip_prefix("@@") {
            return Argument::value(format!("@{rest}"));
        }
        if let Some(id) = s.strip_prefix("@?") {
            return Argument::Reference {
                id: id.to_string(),
                optional: true,
            };
        }
        if let Some(id) = s.strip_prefix('@') {
            return Argument::reference(id);
        }
        if let Some(name) = placeholder_name(&s) {
            return Argument::Parameter {
                name: name.to_string(),
            };
        }
        Argument::Value {
            value: Value::String(s),
        }
    }

    /// Service ids referenced by this argument, nested lists included
    pub fn references(&self) -> Vec<(&str, bool)> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<(&'a str, bool)>) {
        match self {
            Argument::Reference { id, optional } => out.push((id.as_str(), *optional)),
            Argument::List { items } => {
                for item in items {
                    item.collect_references(out);
                }
            }
            Argument::Value { .. } | Argument::Parameter { .. } => {}
        }
    }
}
