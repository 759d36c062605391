//! The validator compilation boundary.
//!
//! Rules produced by the conversion engine are type expressions plus field
//! metadata. This module turns them into validators: [`TypeExpr`] for any
//! value, [`ModelSchema`] for mappings and objects, and [`RootSchema`] for a
//! whole value. Every validator accumulates all mismatches rather than
//! short-circuiting on the first failure.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{FieldInfo, ModelSchema, RootSchema, TypeExpr, Value};
//!
//! let model = ModelSchema::new("Point")
//!     .field("x", TypeExpr::Int, FieldInfo::required())
//!     .field("y", TypeExpr::Int, FieldInfo::required());
//! let schema = RootSchema::new(TypeExpr::model(model));
//!
//! let errors = schema.check(&Value::map([("x", "a")])).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

mod coerce;
mod model;
mod root;
mod traits;
mod type_expr;

pub use model::{FieldDef, FieldInfo, ModelSchema};
pub use root::RootSchema;
pub use traits::SchemaLike;
pub use type_expr::{AfterValidator, TypeExpr};
