//! The one-to-many relation loader: every child row whose foreign key
//! matches a parent's key belongs to that parent.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::RepositoryResult;
use crate::filter::{Comparator, Filter, Operator};
use crate::options::QueryOptions;
use crate::relation::RelationLoader;
use crate::repository::Repository;
use crate::value::FieldValue;

/// Loads every child row per parent, matched by `child.foreign_key ==
/// parent.parent_key`, and appends them as a group.
pub struct OneToMany<C: Entity> {
    pub name: String,
    pub child_repo: Repository<C>,
    pub parent_key: String,
    pub foreign_key: String,
}

impl<C: Entity> OneToMany<C> {
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
impl<P, C> RelationLoader<P> for OneToMany<C>
where
    P: Entity,
    C: Entity + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    async fn load(&self, parents: &mut [P], remaining: Option<&str>) -> RepositoryResult<()> {
        let mut keys = Vec::new();
        let mut seen = HashSet::new();
        for parent in parents.iter() {
            if let Some(key) = parent.get_field(&self.parent_key) {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
        if keys.is_empty() {
            return Ok(());
        }

        let filter = Filter::MultiValue {
            key: self.foreign_key.clone(),
            values: keys.into_iter().map(Into::into).collect(),
            comparator: Comparator::In,
            operator: Operator::And,
        };

        let mut children = self
            .child_repo
            .get(Some(filter), QueryOptions::default())
            .await?;

        if let Some(tail) = remaining {
            self.child_repo
                .load_relations(&mut children, std::slice::from_ref(&tail.to_string()))
                .await?;
        }

        let mut by_key: HashMap<FieldValue, Vec<C>> = HashMap::new();
        for child in children {
            if let Some(fk) = child.get_field(&self.foreign_key) {
                by_key.entry(fk).or_default().push(child);
            }
        }

        for parent in parents.iter_mut() {
            if let Some(pk) = parent.get_field(&self.parent_key) {
                let group = by_key.remove(&pk).unwrap_or_default();
                parent.append_many(&self.name, Box::new(group))?;
            }
        }

        Ok(())
    }
}
