//! Kitegen Core
//!
//! Core types for provisioning a Buildkite pipeline for a GitHub repository.
//!
//! This crate contains:
//! - Domain types: records returned by the build service and the source host,
//!   plus the pipeline template document written next to the sources
//! - DTOs: request payloads sent to the build service and the source host
//! - Shared types: the project name and the provisioning target every
//!   remote identifier is derived from

pub mod domain;
pub mod dto;
pub mod types;
