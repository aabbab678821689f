use itertools::Itertools;
use serde_json::{Map, Value};

use crate::domain::company::CompanyDetailsRow;

// The model is free to answer with a scalar, a list or a nested object per
// field; everything becomes a flat display string at the persistence boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<Value>),
    Nested(Map<String, Value>),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Array(items) => FieldValue::List(items),
            Value::Object(map) => FieldValue::Nested(map),
            Value::Null => FieldValue::Text(String::new()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl FieldValue {
    pub fn flatten(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.iter().map(display_string).join(", "),
            // A lone nested object behaves like a one-element list
            FieldValue::Nested(map) => display_string(&Value::Object(map.clone())),
        }
    }
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFields {
    pub description: String,
    pub products_services: FieldValue,
    pub use_cases: FieldValue,
    pub customers: FieldValue,
    pub partners: FieldValue,
}

impl CompanyFields {
    // Missing keys degrade to empty strings so the sinks always see all five fields
    pub fn from_json_map(mut map: Map<String, Value>) -> Self {
        let description = match map.remove("description") {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        CompanyFields {
            description,
            products_services: field_or_default(&mut map, "products_services"),
            use_cases: field_or_default(&mut map, "use_cases"),
            customers: field_or_default(&mut map, "customers"),
            partners: field_or_default(&mut map, "partners"),
        }
    }

    pub fn empty() -> Self {
        Self::from_json_map(Map::new())
    }

    pub fn into_row(self, id: i32) -> CompanyDetailsRow {
        CompanyDetailsRow {
            id,
            description: self.description,
            products_services: self.products_services.flatten(),
            use_cases: self.use_cases.flatten(),
            customers: self.customers.flatten(),
            partners: self.partners.flatten(),
        }
    }
}

fn field_or_default(map: &mut Map<String, Value>, key: &str) -> FieldValue {
    map.remove(key)
        .map(FieldValue::from)
        .unwrap_or_else(|| FieldValue::Text(String::new()))
}
