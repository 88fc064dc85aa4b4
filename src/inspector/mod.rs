//! Text-mode diagnostic panels for tuning gains and watching runtime values.

pub mod session;
pub mod value;
pub mod window;

pub use session::{InspectorSession, Line};
pub use value::{
    expect_scalar, expect_toggle, FieldId, FieldInfo, Format, Inspectable, ObjectId, Value,
};
pub use window::Window;
