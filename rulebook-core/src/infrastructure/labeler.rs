// rulebook-core/src/infrastructure/labeler.rs

use serde_json::Value;

use crate::ports::labeler::{LabelError, Labeler};

// Members that name an analyzed entity, in order of preference.
const LABEL_KEYS: [&str; 3] = ["label", "name", "id"];

/// Labels plain JSON values the way reports usually want them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabeler;

impl Labeler for DefaultLabeler {
    fn label(&self, value: &Value) -> Result<String, LabelError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s.clone()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Object(map) => Ok(LABEL_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string())),
            Value::Array(_) => Err(LabelError(
                "nested collections cannot be labeled".to_string(),
            )),
        }
    }
}
