// @awa-component: MAKE-SchemaTranslator
//
//! Scenario interface → JSON Schema translation.
//!
//! [`translate`] maps a [`FieldSpec`] tree onto a [`SchemaFragment`] tree:
//!
//! | Field kind    | Schema                                        |
//! |---------------|-----------------------------------------------|
//! | `collection`  | `object` with `properties` and `required`     |
//! | `array`       | `array`, `items` from the element spec        |
//! | `select`      | `string` with `enum` of the option values     |
//! | `text`/`date`/`json` | `string`                               |
//! | `number`      | `number`                                      |
//! | `boolean`     | `boolean`                                     |
//! | unknown       | untyped (any JSON value)                      |
//!
//! Translation is pure and total: it never fails and allocates a fresh tree
//! on every call.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::{ArrayElement, FieldKind, FieldSpec, PrimitiveKind};

/// A node of the translated JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaFragment {
    Object {
        description: Option<String>,
        properties: BTreeMap<String, SchemaFragment>,
        required: Vec<String>,
    },
    Array {
        description: Option<String>,
        items: Option<Box<SchemaFragment>>,
    },
    /// A string restricted to a fixed set of values.
    Enum {
        description: Option<String>,
        values: Vec<String>,
    },
    Leaf {
        /// `None` for field kinds without a known mapping.
        json_type: Option<JsonType>,
        default: Option<Value>,
        description: Option<String>,
    },
}

/// Primitive JSON Schema types produced for leaf fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Boolean,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Translate a single field spec.
pub fn translate(field: &FieldSpec) -> SchemaFragment {
    let description = field.help_text().map(str::to_string);

    match &field.kind {
        FieldKind::Collection { members } => translate_members(members, description),
        FieldKind::Array { element } => SchemaFragment::Array {
            description,
            items: element.as_ref().map(|element| {
                Box::new(match element {
                    ArrayElement::Single(spec) => translate(spec),
                    ArrayElement::Members(members) => translate_members(members, None),
                })
            }),
        },
        FieldKind::Select { options } => SchemaFragment::Enum {
            description,
            values: options.iter().map(|option| option.value.clone()).collect(),
        },
        FieldKind::Primitive { kind, default } => SchemaFragment::Leaf {
            json_type: primitive_type(kind),
            default: default
                .as_ref()
                .filter(|value| !is_empty_default(value))
                .cloned(),
            description,
        },
    }
}

/// Translate a scenario's input list into the tool's root `object` schema.
pub fn translate_inputs(inputs: &[FieldSpec]) -> SchemaFragment {
    translate_members(inputs, None)
}

/// Object schema over a collection's members. Unnamed members are dropped;
/// with duplicate names the last definition wins.
fn translate_members(members: &[FieldSpec], description: Option<String>) -> SchemaFragment {
    let mut properties = BTreeMap::new();
    let mut required: Vec<String> = Vec::new();

    for member in members {
        let Some(name) = member.name.as_deref().filter(|name| !name.is_empty()) else {
            continue;
        };
        // A later duplicate replaces the earlier definition, required flag included.
        let listed = required.iter().position(|r| r == name);
        match (member.required, listed) {
            (true, None) => required.push(name.to_string()),
            (false, Some(index)) => {
                required.remove(index);
            }
            _ => {}
        }
        properties.insert(name.to_string(), translate(member));
    }

    SchemaFragment::Object {
        description,
        properties,
        required,
    }
}

fn primitive_type(kind: &PrimitiveKind) -> Option<JsonType> {
    match kind {
        PrimitiveKind::Text | PrimitiveKind::Date | PrimitiveKind::Json => Some(JsonType::String),
        PrimitiveKind::Number => Some(JsonType::Number),
        PrimitiveKind::Boolean => Some(JsonType::Boolean),
        PrimitiveKind::Unknown(other) => {
            warn!(kind = %other, "unknown field kind, emitting untyped schema");
            None
        }
    }
}

fn is_empty_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

impl SchemaFragment {
    /// Render as a JSON Schema object.
    pub fn to_json_object(&self) -> Map<String, Value> {
        let mut object = Map::new();
        let description = match self {
            Self::Object {
                description,
                properties,
                required,
            } => {
                object.insert("type".into(), "object".into());
                object.insert(
                    "properties".into(),
                    Value::Object(
                        properties
                            .iter()
                            .map(|(name, fragment)| {
                                (name.clone(), Value::Object(fragment.to_json_object()))
                            })
                            .collect(),
                    ),
                );
                object.insert("required".into(), required.clone().into());
                description
            }
            Self::Array { description, items } => {
                object.insert("type".into(), "array".into());
                if let Some(items) = items {
                    object.insert("items".into(), Value::Object(items.to_json_object()));
                }
                description
            }
            Self::Enum {
                description,
                values,
            } => {
                object.insert("type".into(), "string".into());
                object.insert("enum".into(), values.clone().into());
                description
            }
            Self::Leaf {
                json_type,
                default,
                description,
            } => {
                if let Some(json_type) = json_type {
                    object.insert("type".into(), json_type.as_str().into());
                }
                if let Some(default) = default {
                    object.insert("default".into(), default.clone());
                }
                description
            }
        };
        if let Some(description) = description {
            object.insert("description".into(), description.clone().into());
        }
        object
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.to_json_object())
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_object().serialize(serializer)
    }
}
