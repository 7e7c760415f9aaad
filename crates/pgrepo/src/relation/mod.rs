//! Eager relation loading.
//!
//! A repository carries a name -> loader map. Dotted relation paths
//! (`"author.team"`) are split into a head segment, resolved against the
//! loader map, and a tail that the matched loader recurses into on its own
//! child repository. Loads run strictly sequentially, in the order the
//! caller listed them in [`crate::options::QueryOptions::relations`]: this
//! keeps load order deterministic and avoids opening more concurrent
//! connections than the pool has been sized for.

pub mod many_to_many;
pub mod one_to_many;
pub mod one_to_one;

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::RepositoryResult;

/// Loads one named relation onto a batch of already-fetched parent rows.
#[async_trait]
pub trait RelationLoader<T: Entity>: Send + Sync {
    /// Load this relation onto every entity in `parents`, mutating them in
    /// place. `remaining` is the rest of a dotted relation path past this
    /// loader's own segment (e.g. loading `"author.team"` calls the
    /// `"author"` loader with `remaining = Some("team")`), which the loader
    /// passes down to its own child repository to continue the recursion.
    async fn load(&self, parents: &mut [T], remaining: Option<&str>) -> RepositoryResult<()>;
}

/// Split a dotted relation path into its head segment and the rest.
///
/// `"author.team.lead"` splits into `("author", Some("team.lead"))`;
/// `"author"` splits into `("author", None)`.
pub fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}
