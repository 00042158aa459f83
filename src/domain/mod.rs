//! Domain layer containing the rewrite model and its collaborator contracts.
//!
//! Nothing in here touches the network, the database or the cache. Entities are
//! plain data, repositories are traits implemented by the infrastructure layer
//! and policies are the deployment-specific extension points.
//!
//! # Architecture
//!
//! - [`entities`] - Domain sets, rewrite contexts and per-request facts
//! - [`repositories`] - The tenant directory contract
//! - [`policies`] - Static host, locality and veto extension points

pub mod entities;
pub mod policies;
pub mod repositories;
