//! Sortable slot keys.
//!
//! Every rendered card is addressed by `"<column>-<index>"`, where `index` is
//! its position in the column's ordered view at render time. A key without an
//! index (`"<column>"`) addresses the column body itself, which is how empty
//! columns accept drops. Keys are only ever built with [`encode`] and read
//! with [`decode`].

use crate::domain::board::ColumnId;
use crate::error::{Result, TaskBoardError};
use std::{fmt, str::FromStr};

/// Separator between the column id and the position index
pub const DELIMITER: char = '-';

/// Decoded form of a slot key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub column_id: ColumnId,
    /// `None` for a bare column target
    pub index: Option<usize>,
}

impl SlotKey {
    /// Key for the card at `index` in `column_id`
    pub fn card(column_id: ColumnId, index: usize) -> Self {
        Self {
            column_id,
            index: Some(index),
        }
    }

    /// Key for the column body
    pub fn column(column_id: ColumnId) -> Self {
        Self {
            column_id,
            index: None,
        }
    }

    pub fn is_bare(&self) -> bool {
        self.index.is_none()
    }
}

/// Builds the key of the card at `index` in `column_id`
pub fn encode(column_id: &ColumnId, index: usize) -> String {
    format!("{}{}{}", column_id, DELIMITER, index)
}

/// Parses a slot key
///
/// Anything after the delimiter that is not a non-negative integer makes the
/// key a bare column target.
pub fn decode(key: &str) -> Result<SlotKey> {
    let (column, rest) = match key.split_once(DELIMITER) {
        Some((column, rest)) => (column, Some(rest)),
        None => (key, None),
    };

    let column_id = ColumnId::from_str(column)
        .map_err(|_| TaskBoardError::InvalidSlotKey(key.to_string()))?;
    let index = rest.and_then(|rest| rest.parse::<usize>().ok());

    Ok(SlotKey { column_id, index })
}

impl FromStr for SlotKey {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}", encode(&self.column_id, index)),
            None => write!(f, "{}", self.column_id),
        }
    }
}
