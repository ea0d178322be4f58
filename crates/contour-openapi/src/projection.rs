//! # Projection
//!
//! Walks a schema tree and emits a JSON Schema 2020-12 fragment that is also
//! a valid OpenAPI 3.1 schema object.
//!
//! ## Keyword mapping
//!
//! | Schema | Keyword |
//! |---|---|
//! | string / number / boolean / array / object | `type` (`integer` when integer-only) |
//! | min/max length | `minLength`, `maxLength` |
//! | pattern | `pattern`, the source as written |
//! | email / url | `format: email` / `format: uri` |
//! | literal | `const` |
//! | min, max | `minimum`, `maximum` |
//! | exclusive min/max | `exclusiveMinimum`, `exclusiveMaximum` (numbers) |
//! | multiple of | `multipleOf` |
//! | positive / negative | `minimum: 0` / `maximum: 0` unless a bound is set |
//! | min/max items, unique | `minItems`, `maxItems`, `uniqueItems` |
//! | contains | `contains: {"const": value}` |
//! | element | `items` |
//! | fields | `properties`, `required` in declaration order |
//! | strict | `additionalProperties: false` |
//! | min/max properties | `minProperties`, `maxProperties` |
//! | default, example, description | `default`, `example`, `description` |
//! | composition | `oneOf` / `allOf` / `anyOf` / `not` |
//!
//! Projection reads only the schema. It is pure: the same schema always
//! yields the same document.

use serde_json::{json, Map, Value as Json};

use contour_schema::model::{
    ArraySpec, CompositeSpec, NumberSpec, ObjectSpec, StringSpec,
};
use contour_schema::{Combinator, KindRef, NodeRef};

use crate::error::OpenApiError;
use crate::options::ProjectionOptions;

/// Largest integer exactly representable in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Emits schema documents under fixed [`ProjectionOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiProjector {
    options: ProjectionOptions,
}

impl OpenApiProjector {
    /// Projector with the given options.
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Emit the schema document for `node`.
    pub fn project<'a>(&self, node: impl Into<NodeRef<'a>>) -> Json {
        Json::Object(self.node(node.into()))
    }

    /// Emit the schema document for `node` as YAML.
    pub fn project_yaml<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<String, OpenApiError> {
        serde_yaml::to_string(&self.project(node)).map_err(OpenApiError::Render)
    }

    fn node(&self, node: NodeRef<'_>) -> Map<String, Json> {
        let mut out = Map::new();
        match node.kind() {
            KindRef::String(spec) => self.string(spec, &mut out),
            KindRef::Number(spec) => self.number(spec, &mut out),
            KindRef::Boolean(spec) => {
                out.insert("type".into(), json!("boolean"));
                self.custom_flag(spec.has_custom(), &mut out);
            }
            KindRef::Array(spec) => self.array(spec, &mut out),
            KindRef::Object(spec) => self.object(spec, &mut out),
            KindRef::Composite(spec) => self.composite(spec, &mut out),
        }
        self.meta(node, &mut out);
        out
    }

    fn string(&self, spec: &StringSpec, out: &mut Map<String, Json>) {
        out.insert("type".into(), json!("string"));
        if let Some(n) = spec.min_length() {
            out.insert("minLength".into(), json!(n));
        }
        if let Some(n) = spec.max_length() {
            out.insert("maxLength".into(), json!(n));
        }
        if let Some(pattern) = spec.pattern() {
            if pattern.is_poisoned() {
                tracing::debug!(pattern = pattern.source(), "emitting pattern that failed to compile");
            }
            out.insert("pattern".into(), json!(pattern.source()));
        }
        if let Some(format) = spec.format() {
            out.insert("format".into(), json!(format.keyword()));
        }
        if let Some(literal) = spec.literal() {
            out.insert("const".into(), json!(literal));
        }
        self.custom_flag(spec.has_custom(), out);
    }

    fn number(&self, spec: &NumberSpec, out: &mut Map<String, Json>) {
        let ty = if spec.is_integer() { "integer" } else { "number" };
        out.insert("type".into(), json!(ty));
        insert_number(out, "minimum", spec.min());
        insert_number(out, "maximum", spec.max());
        insert_number(out, "exclusiveMinimum", spec.exclusive_min());
        insert_number(out, "exclusiveMaximum", spec.exclusive_max());
        insert_number(out, "multipleOf", spec.multiple_of());

        if spec.is_positive() {
            if spec.min().is_none() && spec.exclusive_min().is_none() {
                out.insert("minimum".into(), json!(0));
            }
            if self.options.extensions {
                out.insert("x-positive".into(), json!(true));
            }
        }
        if spec.is_negative() {
            if spec.max().is_none() && spec.exclusive_max().is_none() {
                out.insert("maximum".into(), json!(0));
            }
            if self.options.extensions {
                out.insert("x-negative".into(), json!(true));
            }
        }
        self.custom_flag(spec.has_custom(), out);
    }

    fn array(&self, spec: &ArraySpec, out: &mut Map<String, Json>) {
        out.insert("type".into(), json!("array"));
        out.insert("items".into(), Json::Object(self.node(spec.element())));
        if let Some(n) = spec.min_items() {
            out.insert("minItems".into(), json!(n));
        }
        if let Some(n) = spec.max_items() {
            out.insert("maxItems".into(), json!(n));
        }
        if spec.is_unique() {
            out.insert("uniqueItems".into(), json!(true));
        }
        if let Some(target) = spec.contains() {
            out.insert("contains".into(), json!({ "const": target.to_json() }));
        }
        self.custom_flag(spec.has_custom(), out);
    }

    fn object(&self, spec: &ObjectSpec, out: &mut Map<String, Json>) {
        out.insert("type".into(), json!("object"));
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, field) in spec.fields() {
            properties.insert(name.to_string(), Json::Object(self.node(field)));
            if field.is_required() && !spec.is_partial() {
                required.push(json!(name));
            }
        }
        out.insert("properties".into(), Json::Object(properties));
        if !required.is_empty() {
            out.insert("required".into(), Json::Array(required));
        }
        if spec.is_strict() {
            out.insert("additionalProperties".into(), json!(false));
        }
        if let Some(n) = spec.min_properties() {
            out.insert("minProperties".into(), json!(n));
        }
        if let Some(n) = spec.max_properties() {
            out.insert("maxProperties".into(), json!(n));
        }
        if spec.is_partial() && self.options.extensions {
            out.insert("x-partial".into(), json!(true));
        }
        self.custom_flag(spec.has_custom(), out);
    }

    fn composite(&self, spec: &CompositeSpec, out: &mut Map<String, Json>) {
        let keyword = spec.combinator().keyword();
        let mut children = spec.children().map(|child| Json::Object(self.node(child)));
        match spec.combinator() {
            Combinator::Not => {
                let child = children.next().unwrap_or_else(|| Json::Object(Map::new()));
                out.insert(keyword.into(), child);
            }
            Combinator::OneOf | Combinator::AllOf | Combinator::AnyOf => {
                out.insert(keyword.into(), Json::Array(children.collect()));
            }
        }
        self.custom_flag(spec.has_custom(), out);
    }

    fn meta(&self, node: NodeRef<'_>, out: &mut Map<String, Json>) {
        let docs = node.documentation();
        if self.options.descriptions {
            if let Some(description) = docs.description() {
                out.insert("description".into(), json!(description));
            }
        }
        if let Some(default) = node.default_value() {
            out.insert("default".into(), default.to_json());
        }
        if let Some(example) = docs.example() {
            out.insert("example".into(), example.to_json());
        }
        if self.options.named_examples && !docs.examples().is_empty() {
            let examples: Map<String, Json> = docs
                .examples()
                .iter()
                .map(|(name, example)| {
                    let mut entry = Map::new();
                    if let Some(summary) = &example.summary {
                        entry.insert("summary".into(), json!(summary));
                    }
                    if let Some(description) = &example.description {
                        entry.insert("description".into(), json!(description));
                    }
                    if let Some(value) = &example.value {
                        entry.insert("value".into(), value.to_json());
                    }
                    if let Some(url) = &example.external_value {
                        entry.insert("externalValue".into(), json!(url));
                    }
                    (name.clone(), Json::Object(entry))
                })
                .collect();
            out.insert("x-examples".into(), Json::Object(examples));
        }
        if self.options.error_messages && !node.messages().is_empty() {
            let messages: Map<String, Json> = node
                .messages()
                .iter()
                .map(|(rule, message)| (rule.clone(), json!(message)))
                .collect();
            out.insert("x-error-messages".into(), Json::Object(messages));
        }
    }

    fn custom_flag(&self, has_custom: bool, out: &mut Map<String, Json>) {
        if has_custom && self.options.extensions {
            out.insert("x-custom-validator".into(), json!(true));
        }
    }
}

/// Insert a numeric keyword. Integral values are written as JSON integers
/// so `18` stays `18` rather than `18.0`; non-finite values are skipped.
fn insert_number(out: &mut Map<String, Json>, key: &str, value: Option<f64>) {
    let Some(n) = value else {
        return;
    };
    if let Some(json) = number_json(n) {
        out.insert(key.into(), json);
    } else {
        tracing::warn!(keyword = key, value = n, "non-finite bound has no JSON representation; omitted");
    }
}

pub(crate) fn number_json(n: f64) -> Option<Json> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Some(json!(n as i64));
    }
    serde_json::Number::from_f64(n).map(Json::Number)
}

/// Emit the schema document for `node` with default options.
pub fn to_open_api<'a>(node: impl Into<NodeRef<'a>>) -> Json {
    OpenApiProjector::default().project(node)
}

/// Emit the schema document for `node` as YAML, with default options.
pub fn to_yaml_string<'a>(node: impl Into<NodeRef<'a>>) -> Result<String, OpenApiError> {
    OpenApiProjector::default().project_yaml(node)
}
