//! The repository facade: a typed CRUD surface bound to one table, built
//! from the filter compiler, the soft-delete rewriter, and the relation
//! engine.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use sqlx::postgres::PgArguments;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::compiler;
use crate::entity::Entity;
use crate::error::{RepositoryError, RepositoryResult};
use crate::filter::Filter;
use crate::options::QueryOptions;
use crate::relation::{split_path, RelationLoader};
use crate::soft_delete;
use crate::value::{FilterValue, UpdateValue};

/// A typed CRUD surface over a single PostgreSQL table.
///
/// Constructed once per entity type and reused across requests; `PgPool`
/// clones are cheap (it's a handle around a connection pool), so cloning a
/// `Repository` to hand to a relation loader is inexpensive.
pub struct Repository<T: Entity> {
    pool: PgPool,
    table: &'static str,
    allowed_order_columns: HashSet<&'static str>,
    soft_delete_column: Option<&'static str>,
    loaders: HashMap<String, Arc<dyn RelationLoader<T>>>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            table: self.table,
            allowed_order_columns: self.allowed_order_columns.clone(),
            soft_delete_column: self.soft_delete_column,
            loaders: self.loaders.clone(),
        }
    }
}

impl<T: Entity> Repository<T> {
    /// Create a repository bound to `table`, with no order-column
    /// whitelist, no soft-delete column, and no registered relations.
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self {
            pool,
            table,
            allowed_order_columns: HashSet::new(),
            soft_delete_column: None,
            loaders: HashMap::new(),
        }
    }

    /// Restrict `order_column` in [`QueryOptions`] to this set of columns.
    pub fn with_order_columns(mut self, columns: impl IntoIterator<Item = &'static str>) -> Self {
        self.allowed_order_columns = columns.into_iter().collect();
        self
    }

    /// Enable soft deletes: reads exclude rows where `column IS NOT NULL`,
    /// and `delete` stamps `column` instead of removing the row.
    pub fn with_soft_delete(mut self, column: &'static str) -> Self {
        self.soft_delete_column = Some(column);
        self
    }

    /// Register a named relation loader. Fails if `name` is already taken.
    pub fn add_relation(
        &mut self,
        name: impl Into<String>,
        loader: Arc<dyn RelationLoader<T>>,
    ) -> RepositoryResult<()> {
        let name = name.into();
        if self.loaders.contains_key(&name) {
            return Err(RepositoryError::duplicate_relation(name, self.table));
        }
        self.loaders.insert(name, loader);
        Ok(())
    }

    pub fn table_name(&self) -> &'static str {
        self.table
    }

    pub fn order_columns(&self) -> &HashSet<&'static str> {
        &self.allowed_order_columns
    }

    pub fn connection(&self) -> &PgPool {
        &self.pool
    }
}

impl<T> Repository<T>
where
    T: Entity + for<'r> FromRow<'r, sqlx::postgres::PgRow> + Unpin,
{
    /// Eager-load relations onto already-fetched rows, in the order given.
    /// Each path is resolved sequentially: the engine never issues more than
    /// one relation query at a time.
    pub async fn load_relations(&self, entities: &mut Vec<T>, paths: &[String]) -> RepositoryResult<()> {
        if entities.is_empty() {
            return Ok(());
        }
        for path in paths {
            let (head, tail) = split_path(path);
            let loader = self
                .loaders
                .get(head)
                .ok_or_else(|| RepositoryError::unknown_relation(head, self.table))?;
            loader
                .load(entities, tail)
                .await
                .map_err(|e| RepositoryError::relation_load(head, e))?;
        }
        Ok(())
    }

    fn validate_order_column(&self, column: &str) -> RepositoryResult<()> {
        if self.allowed_order_columns.is_empty() || self.allowed_order_columns.contains(column) {
            Ok(())
        } else {
            Err(RepositoryError::invalid_order_column(column, self.table))
        }
    }

    fn effective_filter(&self, filter: Option<Filter>) -> Option<Filter> {
        match self.soft_delete_column {
            Some(column) => Some(soft_delete::with_soft_delete(filter, column)),
            None => filter,
        }
    }

    fn build_where(&self, filter: Option<Filter>, start_index: usize) -> (String, PgArguments, usize) {
        let mut args = PgArguments::default();
        let (sql, next_index) = self.build_where_into(filter, start_index, &mut args);
        (sql, args, next_index)
    }

    /// Like [`Self::build_where`], but appends placeholders onto an
    /// existing argument list instead of a fresh one. Used by `update`,
    /// where the `SET` clause's placeholders must come first.
    fn build_where_into(
        &self,
        filter: Option<Filter>,
        start_index: usize,
        args: &mut PgArguments,
    ) -> (String, usize) {
        match self.effective_filter(filter) {
            None => (String::new(), start_index),
            Some(f) => match compiler::compile_into(&f, start_index, args) {
                Some((sql, next_index)) => (format!(" WHERE {sql}"), next_index),
                None => (String::new(), start_index),
            },
        }
    }

    fn select_columns(&self, options: &QueryOptions) -> String {
        if options.columns.is_empty() {
            "*".to_string()
        } else {
            options.columns.join(", ")
        }
    }

    /// Fetch every row matching `filter`, applying the soft-delete
    /// boundary, ordering, pagination, and eager relation loads described
    /// by `options`.
    pub async fn get(&self, filter: Option<Filter>, options: QueryOptions) -> RepositoryResult<Vec<T>> {
        if let Some(column) = &options.order_column {
            self.validate_order_column(column)?;
        }

        let (where_sql, args, _) = self.build_where(filter, 1);

        let mut sql = format!(
            "SELECT {} FROM {}{}",
            self.select_columns(&options),
            self.table,
            where_sql
        );
        if let Some(column) = &options.order_column {
            sql.push_str(&format!(" ORDER BY {} {}", column, options.order_dir.sql_keyword()));
        }
        if let Some(limit) = options.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = options.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        if sql_debug_enabled() {
            tracing::debug!(target: "pgrepo::sql", sql = %sql, "get");
        }

        let mut rows: Vec<T> = sqlx::query_as_with(&sql, args)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_query_error(&sql, e))?;

        self.load_relations(&mut rows, &options.relations).await?;
        Ok(rows)
    }

    /// Fetch exactly one row matching `filter`, erroring with
    /// [`RepositoryError::NotFound`] if none matches.
    pub async fn get_one(&self, filter: Option<Filter>, options: QueryOptions) -> RepositoryResult<T> {
        let mut options = options;
        options.limit = Some(1);
        let mut rows = self.get(filter, options).await?;
        if rows.is_empty() {
            return Err(RepositoryError::not_found(self.table, "filter", "no matching row"));
        }
        Ok(rows.remove(0))
    }

    /// Count rows matching `filter`, applying the soft-delete boundary.
    pub async fn count(&self, filter: Option<Filter>) -> RepositoryResult<i64> {
        let (where_sql, args, _) = self.build_where(filter, 1);
        let sql = format!("SELECT COUNT(*) FROM {}{}", self.table, where_sql);

        if sql_debug_enabled() {
            tracing::debug!(target: "pgrepo::sql", sql = %sql, "count");
        }

        let count: i64 = sqlx::query_scalar_with(&sql, args)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| log_query_error(&sql, e))?;
        Ok(count)
    }

    /// Insert one row from a column -> value payload, returning the created
    /// row. When `options.insert_primary_key` is set and the payload omits
    /// the primary key, a time-ordered UUID v7 is generated for it. When
    /// `options.timestamps_fields` is set, `created_at`/`updated_at` are
    /// stamped with `NOW()` unless the caller already supplied them.
    pub async fn create(
        &self,
        mut payload: BTreeMap<String, FilterValue>,
        options: QueryOptions,
    ) -> RepositoryResult<T> {
        if options.insert_primary_key && !payload.contains_key(&options.primary_key) {
            payload.insert(options.primary_key.clone(), FilterValue::Uuid(Uuid::now_v7()));
        }

        let mut columns: Vec<String> = payload.keys().cloned().collect();
        let mut raw_columns: Vec<&'static str> = Vec::new();
        if options.timestamps_fields {
            for column in ["created_at", "updated_at"] {
                if !payload.contains_key(column) {
                    raw_columns.push(column);
                }
            }
        }

        let mut args = PgArguments::default();
        let mut placeholders: Vec<String> = Vec::with_capacity(columns.len() + raw_columns.len());
        for (index, column) in columns.iter().enumerate() {
            let value = payload.get(column).expect("column drawn from payload keys");
            value.push_into(&mut args).map_err(|e| {
                RepositoryError::validation(format!("binding column '{column}': {e}"))
            })?;
            placeholders.push(format!("${}", index + 1));
        }
        for column in &raw_columns {
            columns.push((*column).to_string());
            placeholders.push("NOW()".to_string());
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            self.table,
            columns.join(", "),
            placeholders.join(", "),
        );

        if sql_debug_enabled() {
            tracing::debug!(target: "pgrepo::sql", sql = %sql, "create");
        }

        let row: T = sqlx::query_as_with(&sql, args)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| log_query_error(&sql, e))?;
        Ok(row)
    }

    /// Insert many rows in one statement. Every payload must share the same
    /// key set as the first (the first entry's sorted keys become the
    /// projected column list); a mismatched payload is a validation error
    /// rather than a silently dropped or null-padded column.
    pub async fn create_many(
        &self,
        payloads: Vec<BTreeMap<String, FilterValue>>,
        options: QueryOptions,
    ) -> RepositoryResult<Vec<T>> {
        if payloads.is_empty() {
            return Ok(Vec::new());
        }

        let mut payloads = payloads;
        if options.insert_primary_key {
            for payload in payloads.iter_mut() {
                payload
                    .entry(options.primary_key.clone())
                    .or_insert_with(|| FilterValue::Uuid(Uuid::now_v7()));
            }
        }

        let columns: Vec<String> = payloads[0].keys().cloned().collect();
        for payload in &payloads {
            let keys: Vec<&String> = payload.keys().collect();
            if keys.len() != columns.len() || !columns.iter().zip(keys).all(|(a, b)| a == b) {
                return Err(RepositoryError::validation(
                    "create_many: all payloads must share the same column set as the first",
                ));
            }
        }

        let mut args = PgArguments::default();
        let mut row_groups: Vec<String> = Vec::with_capacity(payloads.len());
        let mut index = 1usize;
        for payload in &payloads {
            let mut placeholders = Vec::with_capacity(columns.len());
            for column in &columns {
                let value = payload.get(column).expect("validated column set");
                value.push_into(&mut args).map_err(|e| {
                    RepositoryError::validation(format!("binding column '{column}': {e}"))
                })?;
                placeholders.push(format!("${index}"));
                index += 1;
            }
            row_groups.push(format!("({})", placeholders.join(", ")));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {} RETURNING *",
            self.table,
            columns.join(", "),
            row_groups.join(", "),
        );

        if sql_debug_enabled() {
            tracing::debug!(target: "pgrepo::sql", sql = %sql, "create_many");
        }

        let rows: Vec<T> = sqlx::query_as_with(&sql, args)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_query_error(&sql, e))?;
        Ok(rows)
    }

    /// Update every row matching `filter` with `payload`, returning the
    /// updated row re-read by `filter` after the statement completes.
    /// `payload` values may be bound parameters or raw SQL expressions (see
    /// [`UpdateValue::Raw`]). `id` and `created_at` are removed from
    /// `payload` before the `SET` list is built — they're never
    /// caller-updatable. When `options.timestamps_fields` is set and
    /// `payload` doesn't already touch `updated_at`, it is stamped with
    /// `NOW()`.
    pub async fn update(
        &self,
        filter: Option<Filter>,
        mut payload: BTreeMap<String, UpdateValue>,
        options: QueryOptions,
    ) -> RepositoryResult<T> {
        payload.remove("id");
        payload.remove("created_at");
        if payload.is_empty() {
            return Err(RepositoryError::validation("update: payload must not be empty"));
        }

        let mut args = PgArguments::default();
        let mut set_clauses: Vec<String> = Vec::with_capacity(payload.len() + 1);
        let mut index = 1usize;
        for (column, value) in &payload {
            match value {
                UpdateValue::Bound(value) => {
                    value.push_into(&mut args).map_err(|e| {
                        RepositoryError::validation(format!("binding column '{column}': {e}"))
                    })?;
                    set_clauses.push(format!("{column} = ${index}"));
                    index += 1;
                }
                UpdateValue::Raw(raw) => {
                    set_clauses.push(format!("{column} = {}", raw.0));
                }
            }
        }
        if options.timestamps_fields && !payload.contains_key("updated_at") {
            set_clauses.push("updated_at = NOW()".to_string());
        }

        let filter_for_reread = filter.clone();
        let (where_sql, _) = self.build_where_into(filter, index, &mut args);

        let sql = format!(
            "UPDATE {} SET {}{}",
            self.table,
            set_clauses.join(", "),
            where_sql,
        );

        if sql_debug_enabled() {
            tracing::debug!(target: "pgrepo::sql", sql = %sql, "update");
        }

        sqlx::query_with(&sql, args)
            .execute(&self.pool)
            .await
            .map_err(|e| log_query_error(&sql, e))?;

        self.get_one(filter_for_reread, QueryOptions::default()).await
    }

    /// Delete every row matching `filter`. When soft deletes are enabled,
    /// this is an `UPDATE` stamping the tombstone column rather than a
    /// physical delete; any error from that inner update is propagated, not
    /// swallowed.
    pub async fn delete(&self, filter: Option<Filter>) -> RepositoryResult<u64> {
        if let Some(column) = self.soft_delete_column {
            let (where_sql, args, _) = self.build_where(filter, 1);
            let sql = format!(
                "UPDATE {} SET {} = NOW(), updated_at = NOW(){}",
                self.table, column, where_sql
            );
            if sql_debug_enabled() {
                tracing::debug!(target: "pgrepo::sql", sql = %sql, "delete (soft)");
            }
            let result = sqlx::query_with(&sql, args)
                .execute(&self.pool)
                .await
                .map_err(|e| log_query_error(&sql, e))?;
            Ok(result.rows_affected())
        } else {
            let (where_sql, args, _) = self.build_where(filter, 1);
            let sql = format!("DELETE FROM {}{}", self.table, where_sql);
            if sql_debug_enabled() {
                tracing::debug!(target: "pgrepo::sql", sql = %sql, "delete (hard)");
            }
            let result = sqlx::query_with(&sql, args)
                .execute(&self.pool)
                .await
                .map_err(|e| log_query_error(&sql, e))?;
            let affected = result.rows_affected();
            if affected == 0 {
                return Err(RepositoryError::not_found(self.table, "filter", "no matching row"));
            }
            Ok(affected)
        }
    }
}

fn sql_debug_enabled() -> bool {
    std::env::var("SQL_DEBUG").map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// Log a failed statement's SQL alongside the error before it's converted
/// into a [`RepositoryError`] and returned to the caller. Decode failures
/// (a row didn't match the entity's `FromRow` shape) are logged and reported
/// distinctly from execution failures, since they point at a schema/entity
/// mismatch rather than a bad statement.
fn log_query_error(sql: &str, error: sqlx::Error) -> RepositoryError {
    if matches!(error, sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) {
        tracing::error!(sql = %sql, error = %error, "failed to scan data");
        RepositoryError::Scan(error)
    } else {
        tracing::error!(sql = %sql, error = %error, "query failed");
        RepositoryError::Database(error)
    }
}
