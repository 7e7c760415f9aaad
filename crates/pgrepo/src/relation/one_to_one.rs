//! The one-to-one relation loader: the parent's key matches exactly one
//! row on the child table.
//!
//! Unlike the to-one/to-many batch loaders, this one only ever looks at the
//! first parent in the slice, matching a single `child.GetOne(...)` call
//! rather than a batched `IN (...)` read.

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::filter::{Comparator, Filter, Operator};
use crate::options::QueryOptions;
use crate::relation::RelationLoader;
use crate::repository::Repository;

/// Loads a single child row per parent, matched by `child.foreign_key ==
/// parent.parent_key`.
pub struct OneToOne<C: Entity> {
    pub name: String,
    pub child_repo: Repository<C>,
    pub parent_key: String,
    pub foreign_key: String,
}

impl<C: Entity> OneToOne<C> {
    pub fn new(
        name: impl Into<String>,
        child_repo: Repository<C>,
        parent_key: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            child_repo,
            parent_key: parent_key.into(),
            foreign_key: foreign_key.into(),
        }
    }
}

#[async_trait]
impl<P, C> RelationLoader<P> for OneToOne<C>
where
    P: Entity,
    C: Entity + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    async fn load(&self, parents: &mut [P], remaining: Option<&str>) -> RepositoryResult<()> {
        let Some(parent) = parents.first_mut() else {
            return Ok(());
        };
        let Some(parent_id) = parent.get_field(&self.parent_key) else {
            return Ok(());
        };

        let filter = Filter::Single {
            key: self.foreign_key.clone(),
            value: parent_id.into(),
            comparator: Comparator::Eq,
            operator: Operator::And,
        };

        let mut options = QueryOptions::default();
        if let Some(tail) = remaining {
            options = options.with_relations([tail.to_string()]);
        }

        let child = match self.child_repo.get_one(Some(filter), options).await {
            Ok(child) => child,
            Err(RepositoryError::NotFound { .. }) => return Ok(()),
            Err(e) => return Err(e),
        };

        parent.set_one(&self.name, Box::new(child))?;

        Ok(())
    }
}
