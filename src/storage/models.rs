// 数据模型定义 - 本地数据库实体结构

use serde::{Deserialize, Serialize};

/// 本地缓存的登录用户
///
/// 只保存 ID 和邮箱，密码不落盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CachedUser {
    pub id: i64,
    pub email: String,
}
