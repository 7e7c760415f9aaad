//! Per-call query options: projection, pagination, ordering, and eager
//! relation loading.

/// Sort direction for `order_column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl OrderDir {
    pub fn sql_keyword(self) -> &'static str {
        match self {
            OrderDir::Asc => "ASC",
            OrderDir::Desc => "DESC",
        }
    }
}

/// Options controlling a single `get`/`get_one`/`create`/`update` call.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Columns to select. Empty means `SELECT *`.
    pub columns: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_column: Option<String>,
    pub order_dir: OrderDir,
    /// Dotted relation paths to eager-load, e.g. `"author"` or `"author.team"`.
    pub relations: Vec<String>,
    /// Name of the primary key column. Defaults to `"id"`.
    pub primary_key: String,
    /// Whether `create`/`create_many` should include the primary key column
    /// in the generated `INSERT` (false when the database assigns it).
    pub insert_primary_key: bool,
    /// Whether `create`/`update` should stamp `created_at`/`updated_at`.
    pub timestamps_fields: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            limit: None,
            offset: None,
            order_column: None,
            order_dir: OrderDir::default(),
            relations: Vec::new(),
            primary_key: "id".to_string(),
            insert_primary_key: true,
            timestamps_fields: true,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_order(mut self, column: impl Into<String>, dir: OrderDir) -> Self {
        self.order_column = Some(column.into());
        self.order_dir = dir;
        self
    }

    pub fn with_relations(mut self, relations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.relations = relations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }
}
