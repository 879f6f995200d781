//! SQLite implementation of the content store.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Row as _, Sqlite};
use uuid::Uuid;

use crate::error::{PortfolioError, PortfolioResult};
use crate::storage::{
    timestamp, Column, ColumnKind, Direction, Filter, Row, Select, Table, TableStore,
    MANAGED_COLUMNS,
};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Repository for all portfolio content tables.
#[derive(Clone)]
pub struct ContentRepository {
    pool: SqlitePool,
}

impl ContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> PortfolioResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                tagline TEXT,
                about TEXT,
                email TEXT,
                phone TEXT,
                location TEXT,
                years_of_experience TEXT,
                availability_status TEXT,
                profile_photo_url TEXT,
                resume_url TEXT,
                website_url TEXT,
                linkedin_url TEXT,
                github_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                tech_stack TEXT NOT NULL DEFAULT '[]',
                image_urls TEXT NOT NULL DEFAULT '[]',
                live_url TEXT,
                github_url TEXT,
                featured INTEGER NOT NULL DEFAULT 0,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_projects_sort_order ON projects(sort_order);
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS experiences (
                id TEXT PRIMARY KEY,
                company TEXT NOT NULL,
                position TEXT NOT NULL,
                description TEXT,
                location TEXT,
                start_date TEXT NOT NULL,
                end_date TEXT,
                is_current INTEGER NOT NULL DEFAULT 0,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS educations (
                id TEXT PRIMARY KEY,
                institution TEXT NOT NULL,
                degree TEXT NOT NULL,
                field_of_study TEXT,
                gpa TEXT,
                description TEXT,
                start_date TEXT NOT NULL,
                end_date TEXT,
                is_current INTEGER NOT NULL DEFAULT 0,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                proficiency_level TEXT NOT NULL DEFAULT 'intermediate',
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_skills_category ON skills(category, sort_order);
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS services (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                icon_name TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS stats (
                id TEXT PRIMARY KEY,
                label TEXT NOT NULL,
                value TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_info (
                id TEXT PRIMARY KEY,
                type TEXT NOT NULL,
                label TEXT NOT NULL,
                value TEXT NOT NULL,
                href TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS footer_info (
                id TEXT PRIMARY KEY,
                type TEXT NOT NULL,
                label TEXT NOT NULL,
                value TEXT NOT NULL,
                href TEXT,
                icon_name TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_submissions (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_contact_submissions_created_at ON contact_submissions(created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Resolve a column name against the table's whitelist.
fn resolve(table: Table, name: &str) -> PortfolioResult<&'static Column> {
    table
        .column(name)
        .ok_or_else(|| PortfolioError::BadRequest(format!("Unknown column {}.{}", table, name)))
}

/// Resolve the columns of a write payload, rejecting store-managed ones.
fn writable_columns(table: Table, row: &Row) -> PortfolioResult<Vec<&'static Column>> {
    row.keys()
        .map(|key| {
            if MANAGED_COLUMNS.contains(&key.as_str()) {
                return Err(PortfolioError::BadRequest(format!(
                    "Column {}.{} is managed by the store",
                    table, key
                )));
            }
            resolve(table, key)
        })
        .collect()
}

fn where_clause(table: Table, filter: &Filter) -> PortfolioResult<(String, &'static Column)> {
    let column = resolve(table, filter.column)?;
    Ok((format!(" WHERE {} = ?", column.name), column))
}

/// Bind a JSON value according to the column's storage kind.
fn bind_value<'q>(
    query: SqliteQuery<'q>,
    table: Table,
    column: &Column,
    value: Value,
) -> PortfolioResult<SqliteQuery<'q>> {
    let query = match (column.kind, value) {
        (_, Value::Null) => query.bind(None::<String>),
        (ColumnKind::Text, Value::String(s)) => query.bind(s),
        (ColumnKind::Integer, Value::Number(n)) => {
            let n = n.as_i64().ok_or_else(|| {
                PortfolioError::BadRequest(format!(
                    "Column {}.{} expects an integer",
                    table, column.name
                ))
            })?;
            query.bind(n)
        }
        (ColumnKind::Bool, Value::Bool(b)) => query.bind(b),
        (ColumnKind::TextList, Value::Array(items)) => {
            if !items.iter().all(Value::is_string) {
                return Err(PortfolioError::BadRequest(format!(
                    "Column {}.{} expects a list of strings",
                    table, column.name
                )));
            }
            query.bind(serde_json::to_string(&items)?)
        }
        (kind, other) => {
            return Err(PortfolioError::BadRequest(format!(
                "Column {}.{} ({:?}) cannot store {}",
                table, column.name, kind, other
            )))
        }
    };
    Ok(query)
}

/// Decode a SQLite row into JSON using the table's column kinds.
fn decode_row(table: Table, row: &SqliteRow) -> PortfolioResult<Row> {
    let mut out = Row::new();
    for column in table.columns() {
        let value = match column.kind {
            ColumnKind::Text => row
                .try_get::<Option<String>, _>(column.name)?
                .map(Value::String)
                .unwrap_or(Value::Null),
            ColumnKind::Integer => row
                .try_get::<Option<i64>, _>(column.name)?
                .map(Value::from)
                .unwrap_or(Value::Null),
            ColumnKind::Bool => row
                .try_get::<Option<i64>, _>(column.name)?
                .map(|v| Value::Bool(v != 0))
                .unwrap_or(Value::Null),
            ColumnKind::TextList => match row.try_get::<Option<String>, _>(column.name)? {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Value::Null,
            },
        };
        out.insert(column.name.to_string(), value);
    }
    Ok(out)
}

#[async_trait]
impl TableStore for ContentRepository {
    async fn select(&self, table: Table, query: &Select) -> PortfolioResult<Vec<Row>> {
        let mut sql = format!("SELECT * FROM {}", table.name());

        let filter = match &query.filter {
            Some(filter) => {
                let (clause, column) = where_clause(table, filter)?;
                sql.push_str(&clause);
                Some((column, filter.value.clone()))
            }
            None => None,
        };

        let mut terms = Vec::with_capacity(query.order.len() + 1);
        for order in &query.order {
            let column = resolve(table, order.column)?;
            let dir = match order.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            terms.push(format!("{} {}", column.name, dir));
        }
        // Insertion order breaks remaining ties.
        terms.push("rowid ASC".to_string());
        sql.push_str(" ORDER BY ");
        sql.push_str(&terms.join(", "));

        let mut q = sqlx::query(&sql);
        if let Some((column, value)) = filter {
            q = bind_value(q, table, column, value)?;
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.iter().map(|r| decode_row(table, r)).collect()
    }

    async fn insert(&self, table: Table, row: Row) -> PortfolioResult<Row> {
        let columns = writable_columns(table, &row)?;

        let id = Uuid::new_v4().to_string();
        let now = timestamp();

        let mut names = vec!["id", "created_at"];
        if table.has_updated_at() {
            names.push("updated_at");
        }
        let managed = names.len();
        names.extend(columns.iter().map(|c| c.name));

        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            names.join(", "),
            placeholders
        );

        let mut q = sqlx::query(&sql).bind(id.clone()).bind(now.clone());
        if managed == 3 {
            q = q.bind(now);
        }
        for (column, (_, value)) in columns.into_iter().zip(row) {
            q = bind_value(q, table, column, value)?;
        }
        q.execute(&self.pool).await?;

        tracing::debug!(table = %table, id = %id, "Row inserted");

        self.select_single(table, &Select::eq("id", id)).await
    }

    async fn update(
        &self,
        table: Table,
        filter: &Filter,
        patch: Row,
    ) -> PortfolioResult<Vec<Row>> {
        if patch.is_empty() {
            return Err(PortfolioError::BadRequest(format!(
                "Nothing to update in {}",
                table
            )));
        }
        let columns = writable_columns(table, &patch)?;
        let (clause, filter_column) = where_clause(table, filter)?;

        let mut sets: Vec<String> = columns.iter().map(|c| format!("{} = ?", c.name)).collect();
        if table.has_updated_at() {
            sets.push("updated_at = ?".to_string());
        }
        let sql = format!("UPDATE {} SET {}{}", table.name(), sets.join(", "), clause);

        let mut q = sqlx::query(&sql);
        for (column, (_, value)) in columns.into_iter().zip(patch) {
            q = bind_value(q, table, column, value)?;
        }
        if table.has_updated_at() {
            q = q.bind(timestamp());
        }
        q = bind_value(q, table, filter_column, filter.value.clone())?;

        let result = q.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(PortfolioError::NotFound(format!(
                "No {} row matches {} = {}",
                table, filter.column, filter.value
            )));
        }

        self.select(
            table,
            &Select {
                filter: Some(filter.clone()),
                order: Vec::new(),
            },
        )
        .await
    }

    async fn delete(&self, table: Table, filter: &Filter) -> PortfolioResult<u64> {
        let (clause, column) = where_clause(table, filter)?;
        let sql = format!("DELETE FROM {}{}", table.name(), clause);

        let q = bind_value(sqlx::query(&sql), table, column, filter.value.clone())?;
        let result = q.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(PortfolioError::NotFound(format!(
                "No {} row matches {} = {}",
                table, filter.column, filter.value
            )));
        }
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> PortfolioResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn setup_test_db() -> ContentRepository {
        crate::storage::testing::memory_repository().await
    }

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_schema_matches_column_catalogue() {
        let repo = setup_test_db().await;

        for table in Table::ALL {
            let mut actual: Vec<(String, String)> = sqlx::query_as(&format!(
                "SELECT name, type FROM pragma_table_info('{}')",
                table.name()
            ))
            .fetch_all(&repo.pool)
            .await
            .unwrap();
            actual.sort();

            let mut expected: Vec<(String, String)> = table
                .columns()
                .iter()
                .map(|c| {
                    let sql_type = match c.kind {
                        ColumnKind::Text | ColumnKind::TextList => "TEXT",
                        ColumnKind::Integer | ColumnKind::Bool => "INTEGER",
                    };
                    (c.name.to_string(), sql_type.to_string())
                })
                .collect();
            expected.sort();

            assert_eq!(actual, expected, "columns of {} drifted", table);
        }
    }

    #[tokio::test]
    async fn test_insert_fills_managed_columns() {
        let repo = setup_test_db().await;

        let stored = repo
            .insert(
                Table::Projects,
                row(json!({"title": "Demo", "tech_stack": ["React", "TypeScript"]})),
            )
            .await
            .unwrap();

        assert!(Uuid::parse_str(stored["id"].as_str().unwrap()).is_ok());
        assert_eq!(stored["created_at"], stored["updated_at"]);
        assert_eq!(stored["tech_stack"], json!(["React", "TypeScript"]));
        assert_eq!(stored["image_urls"], json!([]));
        assert_eq!(stored["featured"], json!(false));
        assert_eq!(stored["description"], Value::Null);
    }

    #[tokio::test]
    async fn test_select_orders_by_requested_terms() {
        let repo = setup_test_db().await;
        for (name, category, order) in [
            ("Rust", "Programming Languages", 1),
            ("Postgres", "Databases", 0),
            ("Go", "Programming Languages", 0),
        ] {
            repo.insert(
                Table::Skills,
                row(json!({"name": name, "category": category, "sort_order": order})),
            )
            .await
            .unwrap();
        }

        let rows = repo
            .select(
                Table::Skills,
                &Select::all()
                    .order_by(crate::storage::OrderBy::asc("category"))
                    .order_by(crate::storage::OrderBy::asc("sort_order")),
            )
            .await
            .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Postgres", "Go", "Rust"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_patched_columns() {
        let repo = setup_test_db().await;
        let stored = repo
            .insert(
                Table::Stats,
                row(json!({"label": "Projects", "value": "50+", "sort_order": 2})),
            )
            .await
            .unwrap();
        let id = stored["id"].as_str().unwrap().to_string();

        let updated = repo
            .update(Table::Stats, &Filter::id(id.clone()), row(json!({"value": "60+"})))
            .await
            .unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["value"], json!("60+"));
        assert_eq!(updated[0]["label"], stored["label"]);
        assert_eq!(updated[0]["sort_order"], stored["sort_order"]);
        assert_eq!(updated[0]["created_at"], stored["created_at"]);
        assert_eq!(updated[0]["id"], json!(id));
    }

    #[tokio::test]
    async fn test_writes_reject_managed_and_unknown_columns() {
        let repo = setup_test_db().await;

        let err = repo
            .insert(Table::Stats, row(json!({"id": "x", "label": "a", "value": "b"})))
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::BadRequest(_)));

        let err = repo
            .insert(Table::Skills, row(json!({"name": "a", "category": "b", "proficiency": "expert"})))
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_row() {
        let repo = setup_test_db().await;
        let a = repo
            .insert(Table::Stats, row(json!({"label": "A", "value": "1"})))
            .await
            .unwrap();
        repo.insert(Table::Stats, row(json!({"label": "B", "value": "2"})))
            .await
            .unwrap();

        let removed = repo
            .delete(Table::Stats, &Filter::id(a["id"].clone()))
            .await
            .unwrap();
        assert_eq!(removed, 1);

        let rows = repo.select(Table::Stats, &Select::all()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["label"], json!("B"));

        let err = repo
            .delete(Table::Stats, &Filter::id(a["id"].clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_select_single() {
        let repo = setup_test_db().await;
        let err = repo
            .select_single(Table::Profiles, &Select::all())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound(_)));

        repo.insert(Table::Profiles, row(json!({"user_id": "u1", "name": "Ada"})))
            .await
            .unwrap();
        let profile = repo
            .select_single(Table::Profiles, &Select::eq("user_id", "u1"))
            .await
            .unwrap();
        assert_eq!(profile["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn test_submissions_insert_without_updated_at() {
        let repo = setup_test_db().await;
        let stored = repo
            .insert(
                Table::ContactSubmissions,
                row(json!({"name": "Bo", "email": "bo@example.com", "message": "Hello there!"})),
            )
            .await
            .unwrap();
        assert!(stored.get("updated_at").is_none());
        tokio_test::assert_ok!(repo.ping().await);
    }
}
