//! Structured view of JSON values found in cells
//!
//! Cells sometimes hold JSON documents. `JsonView` classifies a parsed value
//! into a closed set of kinds so the grid can render a compact preview
//! instead of raw text.

use serde_json::Value;

/// Largest integer a double can hold exactly (2^53 - 1)
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Preview length before truncation
const PREVIEW_MAX_CHARS: usize = 60;

/// A JSON value, classified
#[derive(Debug, Clone, PartialEq)]
pub enum JsonView {
    Null,
    String(String),
    Number(f64),
    Bool(bool),
    /// Integer outside the exactly-representable double range, kept as text
    BigInt(String),
    Array(Vec<JsonView>),
    /// Fields in key order
    Object(Vec<(String, JsonView)>),
}

impl JsonView {
    /// Parse a cell as JSON.
    ///
    /// Only cells that look like a document (object or array) are
    /// considered, so plain words and numbers stay ordinary text.
    pub fn parse_cell(cell: &str) -> Option<JsonView> {
        let trimmed = cell.trim();
        let looks_structured = (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']'));
        if !looks_structured {
            return None;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Some(JsonView::from(&value)),
            Err(e) => {
                tracing::trace!("Cell is not JSON: {}", e);
                None
            }
        }
    }

    /// Short type label
    pub fn kind(&self) -> &'static str {
        match self {
            JsonView::Null => "null",
            JsonView::String(_) => "string",
            JsonView::Number(_) => "number",
            JsonView::Bool(_) => "boolean",
            JsonView::BigInt(_) => "bigint",
            JsonView::Array(_) => "array",
            JsonView::Object(_) => "object",
        }
    }

    /// One-line summary, truncated with an ellipsis
    pub fn preview(&self) -> String {
        let full = self.render_inline(1);
        if full.chars().count() <= PREVIEW_MAX_CHARS {
            return full;
        }
        let mut truncated: String = full.chars().take(PREVIEW_MAX_CHARS - 1).collect();
        truncated.push('…');
        truncated
    }

    /// Render scalars fully; nested containers beyond `depth` collapse to a count
    fn render_inline(&self, depth: usize) -> String {
        match self {
            JsonView::Null => "null".to_string(),
            JsonView::String(s) => format!("{:?}", s),
            JsonView::Number(n) => format_number(*n),
            JsonView::Bool(b) => b.to_string(),
            JsonView::BigInt(digits) => format!("{}n", digits),
            JsonView::Array(items) => {
                if depth == 0 {
                    return format!("[…{}]", items.len());
                }
                let inner: Vec<String> = items.iter().map(|v| v.render_inline(depth - 1)).collect();
                format!("[{}]", inner.join(", "))
            }
            JsonView::Object(fields) => {
                if depth == 0 {
                    return format!("{{…{}}}", fields.len());
                }
                let inner: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.render_inline(depth - 1)))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&Value> for JsonView {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonView::Null,
            Value::Bool(b) => JsonView::Bool(*b),
            Value::String(s) => JsonView::String(s.clone()),
            Value::Number(n) => {
                let big = match (n.as_i64(), n.as_u64()) {
                    (Some(i), _) => i.unsigned_abs() > MAX_SAFE_INTEGER,
                    (None, Some(u)) => u > MAX_SAFE_INTEGER,
                    (None, None) => false,
                };
                match n.as_f64() {
                    Some(f) if !big => JsonView::Number(f),
                    _ => JsonView::BigInt(n.to_string()),
                }
            }
            Value::Array(items) => JsonView::Array(items.iter().map(JsonView::from).collect()),
            Value::Object(map) => {
                let mut fields: Vec<(String, JsonView)> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonView::from(v)))
                    .collect();
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                JsonView::Object(fields)
            }
        }
    }
}
