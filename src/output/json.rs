//! JSON project structure
//!
//! Directories become nested objects keyed by entry name and files become
//! string values holding their full content. The scan root is not a key of
//! its own: its children are the top-level keys.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::tree::{Entry, TreeVisitor};

use super::read_content;

/// Builds the nested JSON object during a walk.
#[derive(Debug)]
pub struct JsonReport {
    /// Open directories, innermost last. The bottom entry is the root.
    stack: Vec<Map<String, Value>>,
}

impl JsonReport {
    pub fn new() -> Self {
        Self {
            stack: vec![Map::new()],
        }
    }

    fn current(&mut self) -> &mut Map<String, Value> {
        // The root map is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Close any directories left open and return the root object.
    pub fn into_value(mut self) -> Value {
        while self.stack.len() > 1 {
            self.stack.pop();
        }
        Value::Object(self.stack.pop().unwrap_or_default())
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn render(self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.into_value())?)
    }
}

impl Default for JsonReport {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeVisitor for JsonReport {
    fn enter_dir(&mut self, _dir: &Entry) -> Result<()> {
        self.stack.push(Map::new());
        Ok(())
    }

    fn exit_dir(&mut self, dir: &Entry) -> Result<()> {
        if self.stack.len() > 1 {
            let children = self.stack.pop().unwrap_or_default();
            self.current()
                .insert(dir.name.clone(), Value::Object(children));
        }
        Ok(())
    }

    fn visit_file(&mut self, file: &Entry) -> Result<()> {
        let content = read_content(&file.path)?;
        self.current()
            .insert(file.name.clone(), Value::String(content));
        Ok(())
    }
}
