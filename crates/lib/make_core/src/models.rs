// @awa-component: MAKE-Models
//
//! Data returned by the Make scenarios API.
//!
//! Scenario interfaces describe their inputs with a recursive, loosely typed
//! field format (`{"name", "type", "required", "default", "help", "options",
//! "spec"}`). It is decoded here into [`FieldSpec`], a closed sum type keyed
//! on the field kind, so that schema translation can match exhaustively.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Scheduling type of scenarios that only run when invoked.
pub const ON_DEMAND_SCHEDULING: &str = "on-demand";

/// A scenario as returned by the scenario listing endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduling: Scheduling,
}

impl ScenarioSummary {
    /// Whether the scenario runs on demand (as opposed to on a schedule).
    pub fn is_on_demand(&self) -> bool {
        self.scheduling.kind == ON_DEMAND_SCHEDULING
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scheduling {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `GET /scenarios`.
#[derive(Debug, Deserialize)]
pub struct ScenariosResponse {
    pub scenarios: Vec<ScenarioSummary>,
}

/// Declared inputs of a scenario. Outputs are not exposed by the API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ScenarioInterface {
    #[serde(default, deserialize_with = "field_list")]
    pub input: Vec<FieldSpec>,
}

/// Body of `GET /scenarios/{id}/interface`.
#[derive(Debug, Deserialize)]
pub struct InterfaceResponse {
    pub interface: ScenarioInterface,
}

/// Body of `POST /scenarios/{id}/run`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub execution_id: String,
    #[serde(default)]
    pub outputs: Option<Value>,
}

/// One input parameter of a scenario interface.
///
/// `name` is set on members of a collection and absent on array element
/// specs and on synthetic wrappers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFieldSpec")]
pub struct FieldSpec {
    pub name: Option<String>,
    pub required: bool,
    pub help: Option<String>,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Primitive {
        kind: PrimitiveKind,
        default: Option<Value>,
    },
    Select {
        options: Vec<SelectOption>,
    },
    Array {
        element: Option<ArrayElement>,
    },
    Collection {
        members: Vec<FieldSpec>,
    },
}

/// Element shape of an array field.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    /// A single element spec (e.g. an array of text).
    Single(Box<FieldSpec>),
    /// A member list, i.e. an array of anonymous collections.
    Members(Vec<FieldSpec>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    Text,
    Number,
    Boolean,
    Date,
    Json,
    /// A kind this crate does not know about.
    Unknown(String),
}

impl From<&str> for PrimitiveKind {
    fn from(kind: &str) -> Self {
        match kind {
            "text" => Self::Text,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "json" => Self::Json,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
}

impl FieldSpec {
    /// Help text, when present and non-empty.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref().filter(|help| !help.is_empty())
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Wire shape of a field, before it is narrowed to a [`FieldKind`].
#[derive(Deserialize)]
struct RawFieldSpec {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    required: Option<Value>,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    options: Option<Value>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    spec: Option<Value>,
}

impl From<RawFieldSpec> for FieldSpec {
    fn from(raw: RawFieldSpec) -> Self {
        let kind = match raw.kind.as_str() {
            "collection" => FieldKind::Collection {
                members: match raw.spec {
                    Some(Value::Array(entries)) => decode_members(entries),
                    _ => Vec::new(),
                },
            },
            "array" => FieldKind::Array {
                element: match raw.spec {
                    Some(Value::Array(entries)) => {
                        Some(ArrayElement::Members(decode_members(entries)))
                    }
                    Some(entry @ Value::Object(_)) => {
                        decode_field(entry).map(|spec| ArrayElement::Single(Box::new(spec)))
                    }
                    _ => None,
                },
            },
            "select" => FieldKind::Select {
                options: select_options(raw.options),
            },
            other => FieldKind::Primitive {
                kind: PrimitiveKind::from(other),
                default: raw.default.filter(|value| !value.is_null()),
            },
        };

        Self {
            name: raw.name,
            required: matches!(raw.required, Some(Value::Bool(true))),
            help: raw.help,
            kind,
        }
    }
}

fn field_list<'de, D>(deserializer: D) -> Result<Vec<FieldSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(decode_members(entries.unwrap_or_default()))
}

/// Decode a member list entry by entry; malformed members are skipped.
fn decode_members(entries: Vec<Value>) -> Vec<FieldSpec> {
    entries.into_iter().filter_map(decode_field).collect()
}

fn decode_field(entry: Value) -> Option<FieldSpec> {
    let name = entry.get("name").and_then(Value::as_str).map(str::to_string);
    match serde_json::from_value(entry) {
        Ok(spec) => Some(spec),
        Err(e) => {
            warn!(name = ?name, "skipping malformed interface field: {e}");
            None
        }
    }
}

// Options can also be an RPC reference string; only inline lists are usable.
fn select_options(options: Option<Value>) -> Vec<SelectOption> {
    match options {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field(value: Value) -> FieldSpec {
        serde_json::from_value(value).expect("field spec")
    }

    #[test]
    fn decodes_primitive_with_default() {
        let spec = field(json!({
            "name": "number",
            "type": "number",
            "required": true,
            "default": 15,
            "help": "required + default"
        }));
        assert_eq!(spec.name.as_deref(), Some("number"));
        assert!(spec.required);
        assert_eq!(spec.help_text(), Some("required + default"));
        assert_eq!(
            spec.kind,
            FieldKind::Primitive {
                kind: PrimitiveKind::Number,
                default: Some(json!(15)),
            }
        );
    }

    #[test]
    fn required_is_true_only_for_boolean_true() {
        assert!(!field(json!({"name": "a", "type": "text"})).required);
        assert!(!field(json!({"name": "a", "type": "text", "required": false})).required);
        assert!(!field(json!({"name": "a", "type": "text", "required": "true"})).required);
        assert!(!field(json!({"name": "a", "type": "text", "required": 1})).required);
    }

    #[test]
    fn null_default_is_absent() {
        let spec = field(json!({"name": "a", "type": "text", "default": null}));
        assert_eq!(
            spec.kind,
            FieldKind::Primitive {
                kind: PrimitiveKind::Text,
                default: None,
            }
        );
    }

    #[test]
    fn decodes_select_options_in_order() {
        let spec = field(json!({
            "name": "select",
            "type": "select",
            "options": [{"value": "option 1"}, {"value": "option 2"}, {"value": 3}]
        }));
        let FieldKind::Select { options } = spec.kind else {
            panic!("expected select");
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["option 1", "option 2", "3"]);
    }

    #[test]
    fn select_with_rpc_options_has_no_inline_options() {
        let spec = field(json!({"name": "s", "type": "select", "options": "rpc://lookup"}));
        assert_eq!(spec.kind, FieldKind::Select { options: vec![] });
    }

    #[test]
    fn decodes_array_element_shapes() {
        let single = field(json!({"name": "a", "type": "array", "spec": {"type": "text"}}));
        let FieldKind::Array {
            element: Some(ArrayElement::Single(element)),
        } = single.kind
        else {
            panic!("expected single element spec");
        };
        assert_eq!(element.name, None);

        let members = field(json!({
            "name": "a",
            "type": "array",
            "spec": [{"name": "number", "type": "number"}]
        }));
        assert!(matches!(
            members.kind,
            FieldKind::Array {
                element: Some(ArrayElement::Members(ref m))
            } if m.len() == 1
        ));

        let bare = field(json!({"name": "a", "type": "array"}));
        assert_eq!(bare.kind, FieldKind::Array { element: None });
    }

    #[test]
    fn collection_with_non_list_spec_is_empty() {
        let spec = field(json!({"name": "c", "type": "collection", "spec": {"type": "text"}}));
        assert_eq!(spec.kind, FieldKind::Collection { members: vec![] });

        let spec = field(json!({"name": "c", "type": "collection", "spec": "bogus"}));
        assert_eq!(spec.kind, FieldKind::Collection { members: vec![] });
    }

    #[test]
    fn malformed_member_does_not_drop_its_siblings() {
        for bad in [
            json!({"name": "bad", "type": null}),
            json!({"name": "bad", "type": "text", "help": 5}),
        ] {
            let spec = field(json!({
                "name": "c",
                "type": "collection",
                "spec": [{"name": "ok", "type": "text", "required": true}, bad]
            }));
            let FieldKind::Collection { members } = spec.kind else {
                panic!("expected collection");
            };
            assert_eq!(members.len(), 1);
            assert_eq!(members[0].name.as_deref(), Some("ok"));
            assert!(members[0].required);
        }
    }

    #[test]
    fn malformed_array_element_spec_is_absent() {
        let spec = field(json!({"name": "a", "type": "array", "spec": {"type": 5}}));
        assert_eq!(spec.kind, FieldKind::Array { element: None });
    }

    #[test]
    fn malformed_top_level_input_is_skipped() {
        let interface: ScenarioInterface = serde_json::from_value(json!({
            "input": [
                {"name": "ok", "type": "text", "required": true},
                {"name": "bad", "type": null}
            ]
        }))
        .expect("interface");
        assert_eq!(interface.input.len(), 1);
        assert_eq!(interface.input[0].name.as_deref(), Some("ok"));
    }

    #[test]
    fn unknown_kind_is_kept() {
        let spec = field(json!({"name": "u", "type": "udt"}));
        assert_eq!(
            spec.kind,
            FieldKind::Primitive {
                kind: PrimitiveKind::Unknown("udt".into()),
                default: None,
            }
        );
    }

    #[test]
    fn decodes_scenario_summary() {
        let scenario: ScenarioSummary = serde_json::from_value(json!({
            "id": 1,
            "name": "Greeter",
            "teamId": 1,
            "description": null,
            "scheduling": {"type": "on-demand"},
            "isActive": true
        }))
        .expect("scenario");
        assert_eq!(scenario.id, 1);
        assert_eq!(scenario.description, None);
        assert!(scenario.is_on_demand());
    }

    #[test]
    fn decodes_run_result_without_outputs() {
        let run: RunResult =
            serde_json::from_value(json!({"executionId": "abc"})).expect("run result");
        assert_eq!(run.execution_id, "abc");
        assert_eq!(run.outputs, None);
    }
}
