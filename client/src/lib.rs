//! Client-side data layer for the Brainbin dashboard.
//!
//! Two halves: [`ApiClient`] talks to the REST API with the session cookie
//! attached, and [`Dashboard`] holds the view state (tabs, search, paging,
//! modal, drag order) derived from the fetched note list.

#![forbid(unsafe_code)]

pub mod api;
pub mod dashboard;
pub mod model;

pub use api::{ApiClient, ClientError};
pub use dashboard::{Dashboard, Modal};
pub use model::{Note, NoteFields, NoteStatus, UserData};
