use crate::domain::board::ColumnId;
use crate::error::TaskBoardError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Free-form attributes carried alongside the fixed task and column fields.
///
/// The ordering engine never reads these; views surface them as-is.
pub type Attributes = serde_json::Map<String, Value>;

/// Unique, stable identifier of a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random identifier (UUID v4, simple form)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TaskBoardError::InvalidTaskId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskBoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(TaskBoardError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a task's activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl LogEntry {
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
            attributes: Attributes::new(),
        }
    }
}

/// A card on the board
///
/// `order` is the rank of the task inside its column. Host data may leave it
/// out, carry gaps or use fractional ranks; every mutation made by
/// [`crate::domain::ordering`] renumbers the touched columns to `0..n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub column_id: ColumnId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_order"
    )]
    pub order: Option<f64>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Task {
    /// Creates a task with no rank, logs or extra attributes
    pub fn new(id: TaskId, column_id: ColumnId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            column_id,
            order: None,
            logs: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_order(mut self, order: f64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_log(mut self, entry: LogEntry) -> Self {
        self.logs.push(entry);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Rank used for sorting; a missing order counts as 0
    pub fn rank(&self) -> f64 {
        match self.order {
            // folds -0.0 into 0.0 so it ties with unranked tasks
            Some(order) if order != 0.0 => order,
            _ => 0.0,
        }
    }

    /// Renders a scalar attribute as display text
    pub fn attribute_text(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Writes whole ranks as JSON integers so renumbered columns read `0, 1, 2`
fn serialize_order<S: Serializer>(order: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *order {
        Some(rank) if rank.fract() == 0.0 && rank.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_i64(rank as i64)
        }
        Some(rank) => serializer.serialize_f64(rank),
        None => serializer.serialize_none(),
    }
}

/// Magnitude up to which every integer is exactly representable in f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;
