//! Toolkit helpers for selectors, addresses, units, descriptions and dates

pub mod address;
pub mod describe;
pub mod selector;
pub mod timestamp;
pub mod units;

use crate::core::Action;

/// Result of a toolkit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub title: String,
    pub content: Vec<(String, String)>, // (label, value) pairs
}

impl ToolResult {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    pub fn add(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.push((label.into(), value.into()));
        self
    }

    pub fn into_action(self) -> Action {
        Action::Show {
            title: self.title,
            rows: self.content,
        }
    }
}
