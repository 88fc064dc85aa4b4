use std::collections::HashMap;
use std::fmt;

use crate::error::DamperError;
use crate::inspector::{FieldId, FieldInfo, Format, Inspectable, ObjectId, Value, Window};

/// One rendered row of an inspector window.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Label { name: String, text: String },
    Toggle { name: String, on: bool },
    Edit { name: String, buffer: String },
    Group { name: String, items: Vec<String> },
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Label { name, text } => write!(f, "{name}: {text}"),
            Line::Toggle { name, on } => write!(f, "[{}] {name}", if *on { "x" } else { " " }),
            Line::Edit { name, buffer } => write!(f, "{name}: [{buffer}]"),
            Line::Group { name, items } => write!(f, "{name}: {}", items.join(" | ")),
        }
    }
}

/// A window plus the text-edit buffers of the objects drawn in it.
///
/// Buffers are keyed by `(object, field)` and live exactly as long as the session.
#[derive(Debug)]
pub struct InspectorSession {
    window: Window,
    buffers: HashMap<(ObjectId, FieldId), String>,
}

impl InspectorSession {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            buffers: HashMap::new(),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn render(&self, object: &dyn Inspectable) -> Vec<Line> {
        if !self.window.is_visible() {
            return Vec::new();
        }
        let id = object.object_id();
        object
            .fields()
            .into_iter()
            .filter_map(|info| {
                // A field that can't be read right now is skipped, not reported.
                let value = object.get(info.id)?;
                Some(self.render_field(id, &info, value))
            })
            .collect()
    }

    fn render_field(&self, id: ObjectId, info: &FieldInfo, value: Value) -> Line {
        let format = info.format.unwrap_or(Format::General);
        let name = info.name.to_string();
        match value {
            Value::Collection(items) => Line::Group {
                name,
                items: items.iter().map(|item| item.display(format)).collect(),
            },
            Value::Toggle(on) if info.editable => Line::Toggle { name, on },
            value if info.editable => {
                let buffer = self
                    .buffers
                    .get(&(id, info.id))
                    .cloned()
                    .unwrap_or_else(|| value.display(format));
                Line::Edit { name, buffer }
            }
            value => Line::Label {
                name,
                text: value.display(format),
            },
        }
    }

    /// Stores `text` as the edit buffer for `field` and applies it if it parses.
    ///
    /// Returns whether the value reached the object. Failures are logged and dropped.
    pub fn edit(&mut self, object: &mut dyn Inspectable, field: FieldId, text: &str) -> bool {
        let id = object.object_id();
        self.buffers.insert((id, field), text.to_string());
        match Self::apply_text(object, field, text) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("inspector edit of {field} on {id} ignored: {err}");
                false
            }
        }
    }

    fn apply_text(
        object: &mut dyn Inspectable,
        field: FieldId,
        text: &str,
    ) -> Result<(), DamperError> {
        let info = object
            .field(field)
            .ok_or_else(|| DamperError::UnknownField(field.to_string()))?;
        if !info.editable {
            return Err(DamperError::ReadOnly(field.to_string()));
        }
        let parsed = text.trim().parse::<f64>().map_err(|_| DamperError::Parse {
            field: field.to_string(),
            text: text.to_string(),
        })?;
        object.set(field, Value::Scalar(parsed))
    }

    /// Flips an editable boolean field. Returns the new state, or `None` if nothing changed.
    pub fn toggle(&mut self, object: &mut dyn Inspectable, field: FieldId) -> Option<bool> {
        let on = object.get(field)?.as_toggle()?;
        match object.set(field, Value::Toggle(!on)) {
            Ok(()) => Some(!on),
            Err(err) => {
                log::debug!("inspector toggle of {field} ignored: {err}");
                None
            }
        }
    }

    pub fn buffered(&self, object: ObjectId, field: FieldId) -> Option<&str> {
        self.buffers.get(&(object, field)).map(String::as_str)
    }

    /// Drops every buffer that belongs to `object`.
    pub fn forget(&mut self, object: ObjectId) {
        self.buffers.retain(|(id, _), _| *id != object);
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }
}
