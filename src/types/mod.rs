// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod commit_sha;
mod id;

pub use commit_sha::{CommitSha, CommitShaError};
pub use id::{DeployId, SiteId};
