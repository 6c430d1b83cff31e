use crate::domain::slot::DELIMITER;
use crate::domain::task::{Attributes, Task, TaskId};
use crate::error::{Result, TaskBoardError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::{fmt, str::FromStr};

/// Identifier of a board column
///
/// Column ids end up inside slot keys (`"<column>-<index>"`), so they may not
/// be empty or contain the key delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnId(String);

impl ColumnId {
    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<()> {
        if s.is_empty() || s.contains(DELIMITER) {
            return Err(TaskBoardError::InvalidColumnId(s.to_string()));
        }
        Ok(())
    }
}

impl FromStr for ColumnId {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ColumnId {
    type Error = TaskBoardError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<ColumnId> for String {
    fn from(id: ColumnId) -> Self {
        id.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A board column. Column order is the order of the column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            color: color.into(),
            attributes: Attributes::new(),
        }
    }
}

/// The columns a board falls back to when the host supplies none
pub fn default_columns() -> Vec<Column> {
    [
        ("backlog", "Backlog", "#e53e3e"),
        ("todo", "Todo", "#ecc94b"),
        ("inProgress", "In Progress", "#4299e1"),
        ("done", "Done", "#48bb78"),
    ]
    .into_iter()
    .map(|(id, title, color)| Column::new(ColumnId(id.to_string()), title, color))
    .collect()
}

/// Styling values applied by the view layer. Never interpreted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Appearance {
    pub background_color: String,
    pub font_family: String,
    pub column_gap: f64,
    pub container_padding: f64,
    pub column_padding: f64,
    pub header_margin_bottom: f64,
    pub font_size: f64,
    pub task_card_margin: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background_color: "#f7fafc".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            column_gap: 14.0,
            container_padding: 12.0,
            column_padding: 10.0,
            header_margin_bottom: 10.0,
            font_size: 18.0,
            task_card_margin: 8.0,
        }
    }
}

/// Board configuration
///
/// Board variants (titles, seeded log authors, drag sensitivity) are
/// expressed as different values of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub title: String,
    pub appearance: Appearance,
    /// Task attribute shown under the card content
    pub task_text_attribute: String,
    /// Pointer travel in pixels before a press becomes a drag
    pub activation_distance: f64,
    pub new_task_content: String,
    pub new_task_log_user: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Kanban Board".to_string(),
            appearance: Appearance::default(),
            task_text_attribute: "description".to_string(),
            activation_distance: 5.0,
            new_task_content: "New task".to_string(),
            new_task_log_user: "AI Collections Agent".to_string(),
        }
    }
}

impl BoardConfig {
    /// Parses host settings, falling back to the defaults when they are malformed
    pub fn from_host_settings(raw: &Value) -> Self {
        match raw {
            Value::Null => Self::default(),
            Value::Object(_) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "malformed board settings, using defaults");
                Self::default()
            }),
            _ => {
                tracing::warn!("board settings are not an object, using defaults");
                Self::default()
            }
        }
    }

    /// Strict variant of [`BoardConfig::from_host_settings`]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if !config.activation_distance.is_finite() || config.activation_distance < 0.0 {
            return Err(TaskBoardError::MalformedConfig(format!(
                "activationDistance must be a non-negative number, got {}",
                config.activation_distance
            )));
        }
        Ok(config)
    }
}

/// Immutable value holding the full board state at one instant
///
/// The position of a task inside `tasks` carries no meaning except as the
/// tie-breaker between equal ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::new(default_columns(), Vec::new())
    }
}

impl BoardSnapshot {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    /// Builds a snapshot from raw host values, dropping malformed entries
    ///
    /// A `columns` value that is not an array falls back to
    /// [`default_columns`]; a `tasks` value that is not an array yields no
    /// tasks. Duplicate ids keep their first occurrence.
    pub fn from_host_values(columns: &Value, tasks: &Value) -> Self {
        Self {
            columns: sanitize_columns(columns),
            tasks: sanitize_tasks(tasks),
        }
    }

    /// Parses `{"columns": [...], "tasks": [...]}` with the same leniency as
    /// [`BoardSnapshot::from_host_values`]
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(TaskBoardError::MalformedConfig(
                "board state must be a JSON object".to_string(),
            ));
        };
        let columns = map.get("columns").unwrap_or(&Value::Null);
        let tasks = map.get("tasks").unwrap_or(&Value::Null);
        Ok(Self::from_host_values(columns, tasks))
    }

    /// Gets a column by id
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    /// Gets a task by id
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }
}

fn sanitize_columns(raw: &Value) -> Vec<Column> {
    let Value::Array(entries) = raw else {
        tracing::warn!("host columns are not an array, using default columns");
        return default_columns();
    };

    let mut seen = HashSet::new();
    entries
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let coerced = coerce_column_entry(position, entry)?;
            match serde_json::from_value::<Column>(coerced) {
                Ok(column) if seen.insert(column.id.clone()) => Some(column),
                Ok(column) => {
                    tracing::warn!(position, column_id = %column.id, "dropping duplicate column");
                    None
                }
                Err(e) => {
                    tracing::warn!(position, error = %e, "dropping malformed column");
                    None
                }
            }
        })
        .collect()
}

fn sanitize_tasks(raw: &Value) -> Vec<Task> {
    let Value::Array(entries) = raw else {
        if !raw.is_null() {
            tracing::warn!("host tasks are not an array, ignoring them");
        }
        return Vec::new();
    };

    let mut seen = HashSet::new();
    entries
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let coerced = coerce_task_entry(position, entry)?;
            match serde_json::from_value::<Task>(coerced) {
                Ok(task) if seen.insert(task.id.clone()) => Some(task),
                Ok(task) => {
                    tracing::warn!(position, task_id = %task.id, "dropping duplicate task");
                    None
                }
                Err(e) => {
                    tracing::warn!(position, error = %e, "dropping malformed task");
                    None
                }
            }
        })
        .collect()
}

/// A column entry needs `id`, `title` and `color`; any JSON value counts as
/// present and is turned into text.
fn coerce_column_entry(position: usize, entry: &Value) -> Option<Value> {
    let Value::Object(map) = entry else {
        tracing::warn!(position, "dropping column entry that is not an object");
        return None;
    };
    let mut map = map.clone();

    if !coerce_id_field(&mut map, "id") || !coerce_text_fields(&mut map, &["title", "color"]) {
        tracing::warn!(position, "dropping column entry with missing fields");
        return None;
    }
    Some(Value::Object(map))
}

/// Normalizes the loosely typed fields hosts tend to produce so that only
/// entries lacking `id`, `content` or `columnId` are lost: numeric ids become
/// strings, scalar content becomes text, non-numeric orders count as missing
/// and unusable logs become an empty list.
fn coerce_task_entry(position: usize, entry: &Value) -> Option<Value> {
    let Value::Object(map) = entry else {
        tracing::warn!(position, "dropping task entry that is not an object");
        return None;
    };
    let mut map = map.clone();

    if !coerce_id_field(&mut map, "id")
        || !coerce_id_field(&mut map, "columnId")
        || !coerce_text_fields(&mut map, &["content"])
    {
        tracing::warn!(position, "dropping task entry with missing fields");
        return None;
    }

    if !matches!(map.get("order"), Some(Value::Number(_)) | None) {
        map.remove("order");
    }

    let logs = match map.remove("logs") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| coerce_log_entry(position, entry))
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            tracing::warn!(position, "task logs are not an array, clearing them");
            Vec::new()
        }
    };
    map.insert("logs".to_string(), Value::Array(logs));

    Some(Value::Object(map))
}

fn coerce_log_entry(position: usize, entry: Value) -> Option<Value> {
    let Value::Object(mut map) = entry else {
        tracing::warn!(position, "dropping log entry that is not an object");
        return None;
    };
    for field in ["user", "message"] {
        let text = map.get(field).map(value_text).unwrap_or_default();
        map.insert(field.to_string(), Value::String(text));
    }
    Some(Value::Object(map))
}

/// Identifiers must be scalars; `null` becomes an empty id and fails validation
fn coerce_id_field(map: &mut Map<String, Value>, field: &str) -> bool {
    match map.get(field).and_then(scalar_text) {
        Some(text) => {
            map.insert(field.to_string(), Value::String(text));
            true
        }
        None => false,
    }
}

fn coerce_text_fields(map: &mut Map<String, Value>, fields: &[&str]) -> bool {
    for field in fields {
        let Some(value) = map.get(*field) else {
            return false;
        };
        let text = value_text(value);
        map.insert(field.to_string(), Value::String(text));
    }
    true
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Scalars as plain text, structured values as compact JSON
fn value_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::tasks_of_column;
    use crate::domain::task::LogEntry;
    use serde_json::json;

    #[test]
    fn test_column_id_validation() {
        assert!(ColumnId::from_str("todo").is_ok());
        assert!(ColumnId::from_str("inProgress").is_ok());
        assert!(ColumnId::from_str("").is_err());
        assert!(ColumnId::from_str("in-progress").is_err());
    }

    #[test]
    fn test_column_id_rejected_during_deserialization() {
        let result = serde_json::from_value::<Column>(json!({
            "id": "in-progress", "title": "In Progress", "color": "#4299e1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_snapshot() {
        let snapshot = BoardSnapshot::default();
        let ids: Vec<&str> = snapshot.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["backlog", "todo", "inProgress", "done"]);
        assert!(snapshot.tasks.is_empty());
    }

    #[test]
    fn test_non_array_columns_fall_back_to_defaults() {
        let snapshot = BoardSnapshot::from_host_values(&json!("oops"), &json!([]));
        assert_eq!(snapshot.columns, default_columns());
    }

    #[test]
    fn test_malformed_columns_are_filtered() {
        let columns = json!([
            {"id": "todo", "title": "Todo", "color": "#ecc94b"},
            null,
            {"id": "missing-title", "color": "#000"},
            {"id": "bad-id", "title": "Bad", "color": "#000"},
            {"id": "todo", "title": "Again", "color": "#fff"},
            {"id": "done", "title": "Done", "color": "#48bb78", "wipLimit": 3}
        ]);

        let snapshot = BoardSnapshot::from_host_values(&columns, &Value::Null);

        let ids: Vec<&str> = snapshot.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "done"]);
        assert_eq!(snapshot.columns[0].title, "Todo");
        assert_eq!(snapshot.columns[1].attributes.get("wipLimit"), Some(&json!(3)));
    }

    #[test]
    fn test_empty_column_array_is_kept_empty() {
        let snapshot = BoardSnapshot::from_host_values(&json!([]), &json!([]));
        assert!(snapshot.columns.is_empty());
    }

    #[test]
    fn test_malformed_tasks_are_filtered() {
        let tasks = json!([
            {"id": "t1", "content": "A", "columnId": "todo", "order": 0},
            {"id": "t2", "columnId": "todo"},
            "not a task",
            {"id": "t1", "content": "Duplicate", "columnId": "todo"},
            {"id": 42, "content": "Numeric id", "columnId": "done", "order": 1.7},
            {"id": "t3", "content": "Odd order", "columnId": "done", "order": "first"}
        ]);

        let snapshot = BoardSnapshot::from_host_values(&Value::Null, &tasks);

        let ids: Vec<&str> = snapshot.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "42", "t3"]);
        assert_eq!(snapshot.tasks[1].order, Some(1.7));
        assert_eq!(snapshot.tasks[2].order, None);
    }

    #[test]
    fn test_loosely_typed_tasks_are_kept() {
        let tasks = json!([
            {"id": "nullLogs", "content": "A", "columnId": "todo", "logs": null},
            {"id": "badLogs", "content": "B", "columnId": "todo", "logs": "none"},
            {"id": "nullMessage", "content": "C", "columnId": "todo",
             "logs": [{"user": "agent", "message": null}, 7, {"message": 3}]},
            {"id": "numericContent", "content": 12, "columnId": "done"},
            {"id": "nullContent", "content": null, "columnId": "done"},
            {"id": "nullColumn", "content": "D", "columnId": null}
        ]);

        let snapshot = BoardSnapshot::from_host_values(&Value::Null, &tasks);

        let ids: Vec<&str> = snapshot.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["nullLogs", "badLogs", "nullMessage", "numericContent", "nullContent"]
        );
        assert!(snapshot.tasks[0].logs.is_empty());
        assert!(snapshot.tasks[1].logs.is_empty());
        assert_eq!(
            snapshot.tasks[2].logs,
            vec![LogEntry::new("agent", ""), LogEntry::new("", "3")]
        );
        assert_eq!(snapshot.tasks[3].content, "12");
        assert_eq!(snapshot.tasks[4].content, "");
    }

    #[test]
    fn test_loosely_typed_columns_are_kept() {
        let columns = json!([
            {"id": "todo", "title": "Todo", "color": null},
            {"id": 7, "title": 7, "color": "#000"},
            {"id": "done", "title": "Done"}
        ]);

        let snapshot = BoardSnapshot::from_host_values(&columns, &Value::Null);

        let ids: Vec<&str> = snapshot.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "7"]);
        assert_eq!(snapshot.columns[0].color, "");
        assert_eq!(snapshot.columns[1].title, "7");
    }

    #[test]
    fn test_fractional_host_orders_sort_by_value() {
        let tasks = json!([
            {"id": "b", "content": "B", "columnId": "todo", "order": 0.7},
            {"id": "a", "content": "A", "columnId": "todo", "order": 0.5}
        ]);

        let snapshot = BoardSnapshot::from_host_values(&Value::Null, &tasks);

        let ordered: Vec<&str> = tasks_of_column(&snapshot, &ColumnId::from_str("todo").unwrap())
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ordered, vec!["a", "b"]);
    }

    #[test]
    fn test_non_array_tasks_yield_nothing() {
        let snapshot = BoardSnapshot::from_host_values(&json!([]), &json!({"id": "t1"}));
        assert!(snapshot.tasks.is_empty());
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = BoardSnapshot::from_json(
            r##"{"columns": [{"id": "todo", "title": "Todo", "color": "#ecc94b"}],
                "tasks": [{"id": "t1", "content": "A", "columnId": "todo"}]}"##,
        )
        .unwrap();
        assert_eq!(snapshot.columns.len(), 1);
        assert_eq!(snapshot.tasks.len(), 1);

        assert!(BoardSnapshot::from_json("[1, 2]").is_err());
        assert!(BoardSnapshot::from_json("{").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.title, "Kanban Board");
        assert_eq!(config.activation_distance, 5.0);
        assert_eq!(config.appearance.font_size, 18.0);
        assert_eq!(config.task_text_attribute, "description");
    }

    #[test]
    fn test_config_partial_settings() {
        let config = BoardConfig::from_host_settings(&json!({
            "title": "Collections",
            "appearance": {"fontSize": 14}
        }));
        assert_eq!(config.title, "Collections");
        assert_eq!(config.appearance.font_size, 14.0);
        assert_eq!(config.appearance.column_gap, 14.0);
        assert_eq!(config.new_task_content, "New task");
    }

    #[test]
    fn test_config_malformed_settings_fall_back() {
        assert_eq!(
            BoardConfig::from_host_settings(&json!({"title": 7})),
            BoardConfig::default()
        );
        assert_eq!(BoardConfig::from_host_settings(&json!([1])), BoardConfig::default());
    }

    #[test]
    fn test_config_from_json_rejects_negative_distance() {
        assert!(BoardConfig::from_json(r#"{"activationDistance": -1}"#).is_err());
        assert!(BoardConfig::from_json(r#"{"activationDistance": 8}"#).is_ok());
    }
}
