//! Form domain layer
//!
//! Schema types, the value/error store, validation rules, control dispatch
//! and the section navigator. Nothing here touches the terminal or network.

mod control;
mod error;
mod field;
mod navigator;
mod schema;
mod store;
mod validation;

pub use control::{ControlInput, ControlKind};
pub use error::SchemaError;
pub use field::FieldValue;
pub use navigator::{NavigationState, SectionAction, SectionNavigator, SubmitOutcome, Transition};
pub use schema::{FieldDefinition, FieldType, FormSchema};
pub use store::FormValues;

#[cfg(test)]
pub(crate) use schema::fixtures;
