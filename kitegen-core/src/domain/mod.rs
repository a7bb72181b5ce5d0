//! Core domain types
//!
//! Records read back from the remote services and the local template
//! document. None of them outlive a single provisioning run.

pub mod pipeline;
pub mod protection;
pub mod template;
