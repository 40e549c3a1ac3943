//! # aula-forms
//!
//! Form helpers for the portal's enrollment and registration flows:
//! [`rut`] checksums, declarative field [`schema`]s, and the
//! multi-step [`FormWizard`] with autosave.

pub mod rut;
pub mod schema;
pub mod wizard;

pub use schema::{FieldRule, FormSchema};
pub use wizard::{FormSnapshot, FormStep, FormWizard};
