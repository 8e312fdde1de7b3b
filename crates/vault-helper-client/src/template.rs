//! Placeholder-substitution template engine
//!
//! Templates are plain text containing zero or more placeholder expressions
//! bounded by a delimiter pair (default `((` / `))`), each holding a dotted
//! field path resolved against a secret payload:
//!
//! ```text
//! username=((.username))
//! password=((.credentials.password))
//! ```
//!
//! Non-placeholder bytes pass through unchanged. A compiled template is used
//! for exactly one render and then discarded.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

/// The delimiter pair bounding placeholder expressions
#[derive(Debug, Clone)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            left: "((".to_string(),
            right: "))".to_string(),
        }
    }
}

/// A template segment: literal text or a field-path placeholder
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field(Vec<String>),
}

/// A compiled template, ready for a single render
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `source`, scanning for expressions bounded by `delims`.
    ///
    /// Fails recoverably on an unclosed left delimiter or a malformed field
    /// path. A right delimiter with no opening counterpart is literal text.
    pub fn compile(source: &str, delims: &Delimiters) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find(&delims.left) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after_left = &rest[start + delims.left.len()..];
            let end = after_left.find(&delims.right).ok_or_else(|| {
                Error::template(format!(
                    "unclosed delimiter: expected '{}' after '{}'",
                    delims.right, delims.left
                ))
            })?;

            let path = parse_field_path(after_left[..end].trim())?;
            segments.push(Segment::Field(path));

            rest = &after_left[end + delims.right.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Execute the template against a secret payload's data mapping.
    ///
    /// Every placeholder is replaced by its resolved value's string form; an
    /// unresolved field path is a hard error rather than an empty string.
    pub fn render(&self, data: &BTreeMap<String, Value>) -> Result<String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(path) => {
                    let value = resolve_path(data, path)?;
                    out.push_str(&value_to_string(value));
                }
            }
        }

        Ok(out)
    }

    /// Number of placeholders in the compiled template
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Field(_)))
            .count()
    }
}

/// Parse a dotted field path like `.username` or `.credentials.password`
fn parse_field_path(expr: &str) -> Result<Vec<String>> {
    let Some(stripped) = expr.strip_prefix('.') else {
        return Err(Error::template(format!(
            "field path '{expr}' must start with '.'"
        )));
    };

    let segments: Vec<String> = stripped.split('.').map(str::to_string).collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(Error::template(format!("empty segment in path '{expr}'")));
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::template(format!(
                "invalid character in path segment '{segment}'"
            )));
        }
    }

    Ok(segments)
}

/// Walk a field path through the payload's nested mappings
fn resolve_path<'a>(data: &'a BTreeMap<String, Value>, path: &[String]) -> Result<&'a Value> {
    let (first, nested) = path
        .split_first()
        .ok_or_else(|| Error::template("empty field path"))?;

    let mut current = data
        .get(first)
        .ok_or_else(|| Error::unresolved_field(path))?;

    for key in nested {
        current = current
            .get(key)
            .ok_or_else(|| Error::unresolved_field(path))?;
    }

    Ok(current)
}

/// A resolved value's string form: strings verbatim, scalars via display,
/// null as empty, containers as compact JSON
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Render the file at `path` in place against a secret payload.
///
/// The rendered output is written to a temporary file in the target's
/// directory and atomically renamed over the original, so a mid-write failure
/// cannot corrupt the source file. The original's permissions are preserved.
pub fn render_file_in_place(
    path: &Path,
    data: &BTreeMap<String, Value>,
    delims: &Delimiters,
) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let template = Template::compile(&source, delims)?;
    let rendered = template.render(data)?;

    debug!(
        "rendering {} placeholder(s) into {}",
        template.placeholder_count(),
        path.display()
    );

    let permissions = fs::metadata(path)?.permissions();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(rendered.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    fs::set_permissions(path, permissions)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> BTreeMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_selector_renders_single_field() {
        let template = Template::compile("((.username))", &Delimiters::default()).unwrap();
        let rendered = template.render(&data(json!({"username": "alice"}))).unwrap();
        assert_eq!(rendered, "alice");
    }

    #[test]
    fn test_unbalanced_delimiter_fails_compilation() {
        let result = Template::compile("((.username", &Delimiters::default());
        assert!(matches!(result, Err(Error::Template { .. })));
    }

    #[test]
    fn test_malformed_paths_fail_compilation() {
        for selector in ["((username))", "((.))", "((..username))", "((.user name))"] {
            let result = Template::compile(selector, &Delimiters::default());
            assert!(
                matches!(result, Err(Error::Template { .. })),
                "Expected '{selector}' to fail compilation"
            );
        }
    }

    #[test]
    fn test_lone_right_delimiter_is_literal() {
        let template = Template::compile("a )) b", &Delimiters::default()).unwrap();
        let rendered = template.render(&BTreeMap::new()).unwrap();
        assert_eq!(rendered, "a )) b");
    }

    #[test]
    fn test_literal_text_passes_through_unchanged() {
        let source = "user=((.username)) # managed\npass=((.password))\n";
        let template = Template::compile(source, &Delimiters::default()).unwrap();
        let rendered = template
            .render(&data(json!({"username": "alice", "password": "hunter2"})))
            .unwrap();
        assert_eq!(rendered, "user=alice # managed\npass=hunter2\n");
    }

    #[test]
    fn test_nested_field_path() {
        let template =
            Template::compile("((.credentials.password))", &Delimiters::default()).unwrap();
        let rendered = template
            .render(&data(json!({"credentials": {"password": "hunter2"}})))
            .unwrap();
        assert_eq!(rendered, "hunter2");
    }

    #[test]
    fn test_unresolved_path_is_a_hard_error() {
        let template = Template::compile("((.missing))", &Delimiters::default()).unwrap();
        let result = template.render(&data(json!({"username": "alice"})));
        assert!(matches!(result, Err(Error::UnresolvedField { path }) if path == ".missing"));
    }

    #[test]
    fn test_scalar_value_forms() {
        let payload = data(json!({
            "port": 8200,
            "enabled": true,
            "note": null,
            "tags": ["a", "b"]
        }));

        let render = |src: &str| {
            Template::compile(src, &Delimiters::default())
                .unwrap()
                .render(&payload)
                .unwrap()
        };

        assert_eq!(render("((.port))"), "8200");
        assert_eq!(render("((.enabled))"), "true");
        assert_eq!(render("((.note))"), "");
        assert_eq!(render("((.tags))"), r#"["a","b"]"#);
    }

    #[test]
    fn test_whitespace_around_path_is_tolerated() {
        let template = Template::compile("(( .username ))", &Delimiters::default()).unwrap();
        let rendered = template.render(&data(json!({"username": "alice"}))).unwrap();
        assert_eq!(rendered, "alice");
    }

    #[test]
    fn test_custom_delimiters() {
        let delims = Delimiters {
            left: "{{".to_string(),
            right: "}}".to_string(),
        };
        let template = Template::compile("{{.username}}", &delims).unwrap();
        let rendered = template.render(&data(json!({"username": "alice"}))).unwrap();
        assert_eq!(rendered, "alice");
    }

    #[test]
    fn test_placeholder_free_source_is_identity() {
        let source = "no placeholders here\njust text ) ( mixed\n";
        let template = Template::compile(source, &Delimiters::default()).unwrap();
        assert_eq!(template.placeholder_count(), 0);
        assert_eq!(template.render(&BTreeMap::new()).unwrap(), source);
    }

    #[test]
    fn test_render_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("init.groovy");
        fs::write(&file, "admin = '((.username))'\n// untouched\n").unwrap();

        render_file_in_place(
            &file,
            &data(json!({"username": "alice"})),
            &Delimiters::default(),
        )
        .unwrap();

        let rendered = fs::read_to_string(&file).unwrap();
        assert_eq!(rendered, "admin = 'alice'\n// untouched\n");
    }

    #[test]
    fn test_rerender_of_rendered_output_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("init.groovy");
        fs::write(&file, "admin = '((.username))'\n").unwrap();

        let payload = data(json!({"username": "alice"}));
        render_file_in_place(&file, &payload, &Delimiters::default()).unwrap();
        let first = fs::read(&file).unwrap();

        render_file_in_place(&file, &payload, &Delimiters::default()).unwrap();
        let second = fs::read(&file).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_file_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_file_in_place(
            &dir.path().join("absent.txt"),
            &BTreeMap::new(),
            &Delimiters::default(),
        );
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
