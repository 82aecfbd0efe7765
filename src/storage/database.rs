// 数据库操作模块 - 本地 SQLite 用户缓存

use super::CachedUser;
use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

/// 数据库管理器
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 创建新的数据库连接
    pub async fn new(db_path: &str) -> Result<Self> {
        info!("初始化数据库: {}", db_path);

        // 确保数据库文件的目录存在
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        // 创建连接池 - 添加 ?mode=rwc 参数确保创建数据库
        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await?;

        let db = Self { pool };

        // 初始化表结构
        db.initialize_tables().await?;

        Ok(db)
    }

    /// 初始化数据库表
    async fn initialize_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usuarios (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        info!("数据库表初始化完成");
        Ok(())
    }

    /// 插入或替换用户
    pub async fn upsert_user(&self, user: &CachedUser) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO usuarios (id, email) VALUES (?1, ?2)")
            .bind(user.id)
            .bind(&user.email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// 获取缓存的用户（只有一个）
    pub async fn get_user(&self) -> Result<Option<CachedUser>> {
        let user = sqlx::query_as::<_, CachedUser>("SELECT id, email FROM usuarios LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// 清空用户缓存（退出登录）
    pub async fn clear_users(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM usuarios")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
