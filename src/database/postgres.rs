use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::{Color, Module, ModuleRecord, NewPlate, Plate, PlateRecord, User};
use crate::database::store::{Store, StoreError};
use crate::types::{ModuleId, PlateId, UserId};

const MODULE_SELECT: &str = r#"
    SELECT m.id, m.name, m.w, m.h, m.public, m.created_at, m.user_id,
           u.name AS author_name, u.email AS author_email
    FROM modules m
    JOIN users u ON u.id = m.user_id
"#;

const PLATE_SELECT: &str = r#"
    SELECT p.id, p.module_id, p.x, p.y, p.z, p.h, p.w, p.color_id,
           c.name AS color_name, c.hex AS color_hex
    FROM plates p
    JOIN colors c ON c.id = p.color_id
"#;

/// PostgreSQL-backed store. Expects the tables from `sql/schema.sql`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

fn module_record_from_row(row: &PgRow) -> Result<ModuleRecord, sqlx::Error> {
    let module = Module {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        w: row.try_get("w")?,
        h: row.try_get("h")?,
        public: row.try_get("public")?,
        created_at: row.try_get("created_at")?,
        user_id: row.try_get("user_id")?,
    };
    let author = User {
        id: module.user_id,
        name: row.try_get("author_name")?,
        email: row.try_get("author_email")?,
    };
    Ok(ModuleRecord { module, author })
}

fn plate_record_from_row(row: &PgRow) -> Result<PlateRecord, sqlx::Error> {
    let plate = Plate {
        id: row.try_get("id")?,
        module_id: row.try_get("module_id")?,
        x: row.try_get("x")?,
        y: row.try_get("y")?,
        z: row.try_get("z")?,
        h: row.try_get("h")?,
        w: row.try_get("w")?,
        color_id: row.try_get("color_id")?,
    };
    let color = Color {
        id: plate.color_id,
        name: row.try_get("color_name")?,
        hex: row.try_get("color_hex")?,
    };
    Ok(PlateRecord { plate, color })
}

/// Foreign key and check violations are caller mistakes, not outages
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
            return StoreError::Constraint(db_err.message().to_string());
        }
    }
    StoreError::Sqlx(err)
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        Ok(user)
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET name = $2 WHERE id = $1")
            .bind(user.id)
            .bind(&user.name)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", user.id)));
        }
        Ok(())
    }

    async fn create_color(&self, name: &str, hex: &str) -> Result<Color, StoreError> {
        let color = sqlx::query_as::<_, Color>(
            "INSERT INTO colors (name, hex) VALUES ($1, $2) RETURNING id, name, hex",
        )
        .bind(name)
        .bind(hex)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        Ok(color)
    }

    async fn colors(&self) -> Result<Vec<Color>, StoreError> {
        let colors = sqlx::query_as::<_, Color>("SELECT id, name, hex FROM colors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(colors)
    }

    async fn create_module(&self, name: &str, owner: UserId) -> Result<ModuleRecord, StoreError> {
        let id: ModuleId = sqlx::query_scalar(
            "INSERT INTO modules (name, user_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        self.module_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("module {}", id)))
    }

    async fn module_by_id(&self, id: ModuleId) -> Result<Option<ModuleRecord>, StoreError> {
        let sql = format!("{} WHERE m.id = $1", MODULE_SELECT);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(module_record_from_row).transpose()?)
    }

    async fn public_modules(&self) -> Result<Vec<ModuleRecord>, StoreError> {
        let sql = format!("{} WHERE m.public = TRUE ORDER BY m.id", MODULE_SELECT);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(module_record_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn modules_by_owner(&self, owner: UserId) -> Result<Vec<ModuleRecord>, StoreError> {
        let sql = format!("{} WHERE m.user_id = $1 ORDER BY m.id", MODULE_SELECT);
        let rows = sqlx::query(&sql).bind(owner).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(module_record_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn save_module(&self, module: &Module) -> Result<(), StoreError> {
        // user_id and created_at are fixed at insert
        let result = sqlx::query(
            "UPDATE modules SET name = $2, w = $3, h = $4, public = $5 WHERE id = $1",
        )
        .bind(module.id)
        .bind(&module.name)
        .bind(module.w)
        .bind(module.h)
        .bind(module.public)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("module {}", module.id)));
        }
        Ok(())
    }

    async fn delete_module(&self, id: ModuleId) -> Result<bool, StoreError> {
        // plates go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn plates_of_module(&self, module_id: ModuleId) -> Result<Vec<PlateRecord>, StoreError> {
        let sql = format!("{} WHERE p.module_id = $1 ORDER BY p.id", PLATE_SELECT);
        let rows = sqlx::query(&sql).bind(module_id).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(plate_record_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn plate_by_id(&self, id: PlateId) -> Result<Option<PlateRecord>, StoreError> {
        let sql = format!("{} WHERE p.id = $1", PLATE_SELECT);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(plate_record_from_row).transpose()?)
    }

    async fn create_plate(&self, plate: &NewPlate) -> Result<PlateRecord, StoreError> {
        let id: PlateId = sqlx::query_scalar(
            r#"
            INSERT INTO plates (module_id, x, y, z, h, w, color_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(plate.module_id)
        .bind(plate.x)
        .bind(plate.y)
        .bind(plate.z)
        .bind(plate.h)
        .bind(plate.w)
        .bind(plate.color_id)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;

        self.plate_by_id(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("plate {}", id)))
    }

    async fn save_plate(&self, plate: &Plate) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE plates SET x = $2, y = $3, z = $4, h = $5, w = $6, color_id = $7
            WHERE id = $1
            "#,
        )
        .bind(plate.id)
        .bind(plate.x)
        .bind(plate.y)
        .bind(plate.z)
        .bind(plate.h)
        .bind(plate.w)
        .bind(plate.color_id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("plate {}", plate.id)));
        }
        Ok(())
    }

    async fn delete_plate(&self, id: PlateId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM plates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
