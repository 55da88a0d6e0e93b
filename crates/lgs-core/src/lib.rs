//! lgs-core: Subject model, answer validation, and the dashboard controller.
//!
//! This crate holds everything the LGS score dashboard does on the client
//! side: the fixed subject table, the real-time input clamping rules, the
//! typed HTTP contracts, and the glue that turns server responses into
//! result panels, charts, and notices.

pub mod animation;
pub mod api;
pub mod charts;
pub mod dashboard;
pub mod error;
pub mod notice;
pub mod sheet;
pub mod stats;
pub mod subject;
pub mod validator;

pub use error::CoreError;
pub use subject::{AnswerKind, FieldId, Subject};
pub use validator::{ActiveField, FieldAccess, InputValidator};
