use serde_json::Value;
use std::collections::HashMap;

/// Open-ended key/value attributes attached to events and users.
///
/// Values are any JSON-compatible data: null, booleans, numbers, strings,
/// arrays and nested objects.
pub type Properties = HashMap<String, Value>;
