//! Data Transfer Objects for the remote services
//!
//! Request bodies sent to the build service (pipeline creation) and the
//! source host (status check update).

pub mod pipeline;
pub mod protection;
