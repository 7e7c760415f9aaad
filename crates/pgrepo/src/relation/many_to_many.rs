//! The many-to-many relation loader: parents and children are linked
//! through a pivot table rather than a foreign key on either side.
//!
//! Unlike the to-one/to-many loaders, a child here can belong to more than
//! one parent, so the loaded children must be cloned across the parents
//! that reference them.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::{Arguments, Row};
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::filter::{Comparator, Filter, Operator};
use crate::options::QueryOptions;
use crate::relation::RelationLoader;
use crate::repository::Repository;
use crate::value::FieldValue;

/// Loads children linked to parents through `pivot_table`.
///
/// Pivot keys are read as `Uuid`, matching the time-ordered UUID primary
/// keys this crate assigns on [`Repository::create`].
pub struct ManyToMany<C: Entity + Clone> {
    pub name: String,
    pub child_repo: Repository<C>,
    pub pivot_table: String,
    pub parent_pivot_column: String,
    pub child_pivot_column: String,
    pub parent_key: String,
    pub child_key: String,
}

impl<C: Entity + Clone> ManyToMany<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        child_repo: Repository<C>,
        pivot_table: impl Into<String>,
        parent_pivot_column: impl Into<String>,
        child_pivot_column: impl Into<String>,
        parent_key: impl Into<String>,
        child_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            child_repo,
            pivot_table: pivot_table.into(),
            parent_pivot_column: parent_pivot_column.into(),
            child_pivot_column: child_pivot_column.into(),
            parent_key: parent_key.into(),
            child_key: child_key.into(),
        }
    }

    fn field_as_uuid(value: &FieldValue) -> Option<Uuid> {
        match value {
            FieldValue::Uuid(v) => Some(*v),
            _ => None,
        }
    }
}

#[async_trait]
impl<P, C> RelationLoader<P> for ManyToMany<C>
where
    P: Entity,
    C: Entity + Clone + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    async fn load(&self, parents: &mut [P], remaining: Option<&str>) -> RepositoryResult<()> {
        let mut parent_ids = Vec::new();
        let mut seen = HashSet::new();
        for parent in parents.iter() {
            if let Some(id) = parent
                .get_field(&self.parent_key)
                .as_ref()
                .and_then(Self::field_as_uuid)
            {
                if seen.insert(id) {
                    parent_ids.push(id);
                }
            }
        }
        if parent_ids.is_empty() {
            return Ok(());
        }

        let placeholders: Vec<String> = (1..=parent_ids.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "SELECT {}, {} FROM {} WHERE {} IN ({})",
            self.parent_pivot_column,
            self.child_pivot_column,
            self.pivot_table,
            self.parent_pivot_column,
            placeholders.join(", "),
        );
        let mut args = PgArguments::default();
        for id in &parent_ids {
            args.add(id)
                .map_err(|e| RepositoryError::configuration(format!("binding pivot query: {e}")))?;
        }

        let rows = sqlx::query_with(&sql, args)
            .fetch_all(self.child_repo.connection())
            .await
            .map_err(|e| {
                tracing::error!(sql = %sql, error = %e, "pivot query failed");
                e
            })?;

        let mut parent_to_children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut all_child_ids = Vec::new();
        let mut seen_children = HashSet::new();
        for row in rows {
            let parent_id: Uuid = row.try_get(0)?;
            let child_id: Uuid = row.try_get(1)?;
            parent_to_children
                .entry(parent_id)
                .or_default()
                .push(child_id);
            if seen_children.insert(child_id) {
                all_child_ids.push(child_id);
            }
        }

        if all_child_ids.is_empty() {
            return Ok(());
        }

        let filter = Filter::MultiValue {
            key: self.child_key.clone(),
            values: all_child_ids.into_iter().map(FieldValue::Uuid).map(Into::into).collect(),
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

        let mut by_id: HashMap<Uuid, C> = HashMap::new();
        for child in children {
            if let Some(id) = child.get_field(&self.child_key).as_ref().and_then(Self::field_as_uuid) {
                by_id.insert(id, child);
            }
        }

        for parent in parents.iter_mut() {
            let Some(parent_id) = parent
                .get_field(&self.parent_key)
                .as_ref()
                .and_then(Self::field_as_uuid)
            else {
                continue;
            };
            let child_ids = parent_to_children.get(&parent_id).cloned().unwrap_or_default();
            let group: Vec<C> = child_ids
                .into_iter()
                .filter_map(|id| by_id.get(&id).cloned())
                .collect();
            parent.append_many(&self.name, Box::new(group))?;
        }

        Ok(())
    }
}
