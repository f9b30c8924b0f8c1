//! # structify-schema
//!
//! Hybrid schema descriptions compiled into recursive JSON validators.
//!
//! A caller describes the shape it wants back from a model either with
//! explicit type tags (`{"type": "number"}`) or by example (`0`), and the
//! two notations mix freely at any depth. [`compile`] turns such a
//! description into a [`ValidatorNode`] tree; [`ValidatorNode::check`]
//! then tests untrusted model output against it.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use structify_schema::compile;
//!
//! let validator = compile(&json!({"name": "", "age": 0})).unwrap();
//!
//! assert!(validator.check(&json!({"name": "Jane", "age": 30})).is_ok());
//! assert!(validator.check(&json!({"name": "Jane", "age": "thirty"})).is_err());
//! ```
//!
//! Primitive and array nodes accept `null` in addition to their base
//! type; object nodes do not. This asymmetry is part of the contract, not
//! an accident of implementation.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod compile;
pub mod error;
pub mod validator;

pub use compile::compile;
pub use error::{SchemaError, SchemaViolation};
pub use validator::{PrimitiveKind, ValidatorNode};
