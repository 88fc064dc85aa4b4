use std::fmt;

use crate::error::DamperError;

/// Identity of an inspected object. `instance` separates successive objects that share
/// a window, so edit buffers from a detached damper never bleed into its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub window: u32,
    pub instance: u64,
}

impl ObjectId {
    pub fn new(window: u32, instance: u64) -> Self {
        Self { window, instance }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.window, self.instance)
    }
}

pub type FieldId = &'static str;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Toggle(bool),
    Collection(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Toggle(_) => "toggle",
            Value::Collection(_) => "collection",
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            Value::Toggle(v) => Some(*v),
            _ => None,
        }
    }

    pub fn display(&self, format: Format) -> String {
        match self {
            Value::Scalar(v) => format.apply(*v),
            Value::Toggle(v) => v.to_string(),
            Value::Collection(items) => items
                .iter()
                .map(|item| item.display(format))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    General,
    Fixed(u8),
    Scientific(u8),
}

impl Format {
    pub fn apply(self, value: f64) -> String {
        match self {
            Format::General => value.to_string(),
            Format::Fixed(precision) => format!("{:.*}", precision as usize, value),
            Format::Scientific(precision) => format!("{:.*e}", precision as usize, value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub id: FieldId,
    pub name: &'static str,
    pub editable: bool,
    pub format: Option<Format>,
}

impl FieldInfo {
    pub fn editable(id: FieldId, name: &'static str) -> Self {
        Self {
            id,
            name,
            editable: true,
            format: None,
        }
    }

    pub fn read_only(id: FieldId, name: &'static str) -> Self {
        Self {
            id,
            name,
            editable: false,
            format: None,
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

/// An object that can be shown and tuned in an inspector window.
pub trait Inspectable {
    fn object_id(&self) -> ObjectId;

    fn fields(&self) -> Vec<FieldInfo>;

    fn get(&self, field: FieldId) -> Option<Value>;

    fn set(&mut self, field: FieldId, value: Value) -> Result<(), DamperError>;

    fn field(&self, field: &str) -> Option<FieldInfo> {
        self.fields().into_iter().find(|info| info.id == field)
    }
}

/// Extracts a scalar for `field`, or the error `set` should return.
pub fn expect_scalar(field: FieldId, value: &Value) -> Result<f64, DamperError> {
    value.as_scalar().ok_or_else(|| DamperError::TypeMismatch {
        field: field.to_string(),
        expected: "scalar",
    })
}

pub fn expect_toggle(field: FieldId, value: &Value) -> Result<bool, DamperError> {
    value.as_toggle().ok_or_else(|| DamperError::TypeMismatch {
        field: field.to_string(),
        expected: "toggle",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_scalars() {
        assert_eq!(Format::General.apply(0.5), "0.5");
        assert_eq!(Format::Fixed(3).apply(1.0 / 3.0), "0.333");
        assert_eq!(Format::Scientific(2).apply(1234.5), "1.23e3");
    }

    #[test]
    fn collection_display_joins_members() {
        let v = Value::Collection(vec![Value::Scalar(1.0), Value::Scalar(-0.25)]);
        assert_eq!(v.display(Format::Fixed(2)), "1.00, -0.25");
    }

    #[test]
    fn wrong_variant_is_a_type_mismatch() {
        let err = expect_scalar("kp", &Value::Toggle(true)).unwrap_err();
        assert!(matches!(err, DamperError::TypeMismatch { expected: "scalar", .. }));
    }
}
