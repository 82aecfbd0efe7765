// 会话领域管理器
//
// 负责登录、注册、退出登录以及当前用户的查询
// 用户 ID 保存在偏好设置中，用户邮箱缓存在本地数据库

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::api::MaintenanceBackend;
use crate::models::User;
use crate::settings::SettingsManager;
use crate::storage::{CachedUser, Database};
use crate::utils::validate_credentials;

/// 未登录时的提示
pub const MSG_NOT_LOGGED_IN: &str = "No se encontró el usuario. Intenta iniciar sesión de nuevo.";

/// 会话领域管理器
#[derive(Clone)]
pub struct SessionDomain {
    backend: Arc<dyn MaintenanceBackend>,
    settings: Arc<SettingsManager>,
    db: Arc<Database>,
}

impl SessionDomain {
    /// 创建新的会话领域管理器
    pub fn new(
        backend: Arc<dyn MaintenanceBackend>,
        settings: Arc<SettingsManager>,
        db: Arc<Database>,
    ) -> Self {
        Self {
            backend,
            settings,
            db,
        }
    }

    /// 获取设置管理器
    pub fn get_settings(&self) -> &Arc<SettingsManager> {
        &self.settings
    }

    /// 登录
    ///
    /// 成功后保存用户 ID 并缓存用户信息
    pub async fn login(&self, email: &str, password: &str) -> Result<CachedUser> {
        validate_credentials(email, password).map_err(|e| anyhow!(e))?;

        let request = User {
            id: None,
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self
            .backend
            .login(&request)
            .await
            .map_err(|e| anyhow!("Credenciales incorrectas o servidor no disponible: {}", e))?;

        let id = response
            .id
            .ok_or_else(|| anyhow!("Error: ID de usuario no recibido"))?;

        self.remember(id, &request.email).await
    }

    /// 注册
    ///
    /// 注册成功即视为已登录
    pub async fn register(&self, email: &str, password: &str) -> Result<CachedUser> {
        validate_credentials(email, password).map_err(|e| anyhow!(e))?;

        let request = User {
            id: None,
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self
            .backend
            .register(&request)
            .await
            .map_err(|e| anyhow!("Error al registrar: {}", e))?;

        let id = response
            .id
            .ok_or_else(|| anyhow!("Error: El servidor no devolvió un ID."))?;

        self.remember(id, &request.email).await
    }

    async fn remember(&self, id: i64, email: &str) -> Result<CachedUser> {
        self.settings.save_user_id(id).await?;
        self.settings
            .update(crate::models::Preferences {
                last_email: Some(email.to_string()),
                ..Default::default()
            })
            .await?;

        let user = CachedUser {
            id,
            email: email.to_string(),
        };
        self.db.upsert_user(&user).await?;

        info!("用户已登录: id={}", id);
        Ok(user)
    }

    /// 退出登录
    pub async fn logout(&self) -> Result<()> {
        self.settings.logout().await?;
        let removed = self.db.clear_users().await?;
        info!("已退出登录，清除缓存用户 {} 个", removed);
        Ok(())
    }

    /// 当前登录用户 ID
    pub async fn current_user_id(&self) -> Result<i64> {
        match self.settings.user_id().await {
            Some(id) => Ok(id),
            None => {
                warn!("未找到登录用户");
                Err(anyhow!(MSG_NOT_LOGGED_IN))
            }
        }
    }

    /// 当前登录用户（来自本地缓存）
    pub async fn current_user(&self) -> Result<Option<CachedUser>> {
        let Some(id) = self.settings.user_id().await else {
            return Ok(None);
        };

        // 缓存中的用户与偏好设置不一致时只返回 ID
        let user = self
            .db
            .get_user()
            .await?
            .filter(|u| u.id == id)
            .unwrap_or(CachedUser {
                id,
                email: String::new(),
            });
        Ok(Some(user))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::memory::MemoryBackend;

    /// 测试环境：内存后端 + 临时目录中的设置和数据库
    pub(crate) struct TestEnv {
        pub _dir: tempfile::TempDir,
        pub backend: Arc<MemoryBackend>,
        pub session: Arc<SessionDomain>,
    }

    pub(crate) async fn test_env() -> TestEnv {
        let dir = tempfile::tempdir().unwrap();
        let settings = Arc::new(
            SettingsManager::new(dir.path().join("settings.json"))
                .await
                .unwrap(),
        );
        let db_path = dir.path().join("test.db");
        let db = Arc::new(Database::new(db_path.to_str().unwrap()).await.unwrap());
        let backend = Arc::new(MemoryBackend::new());

        let session = Arc::new(SessionDomain::new(backend.clone(), settings, db));
        TestEnv {
            _dir: dir,
            backend,
            session,
        }
    }

    #[tokio::test]
    async fn test_login_saves_user() {
        let env = test_env().await;
        let id = env.backend.seed_user("a@b.cl", "123").await;

        let user = env.session.login(" a@b.cl ", "123").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(env.session.current_user_id().await.unwrap(), id);

        let cached = env.session.current_user().await.unwrap().unwrap();
        assert_eq!(cached.email, "a@b.cl");
        assert_eq!(
            env.session.get_settings().get().await.last_email.as_deref(),
            Some("a@b.cl")
        );
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let env = test_env().await;
        let err = env.session.login("", "123").await.unwrap_err();
        assert_eq!(err.to_string(), "Completa todos los campos");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let env = test_env().await;
        env.backend.seed_user("a@b.cl", "123").await;

        assert!(env.session.login("a@b.cl", "malo").await.is_err());
        assert!(env.session.current_user_id().await.is_err());
    }

    #[tokio::test]
    async fn test_register_logs_in() {
        let env = test_env().await;
        let user = env.session.register("nuevo@b.cl", "clave").await.unwrap();
        assert_eq!(env.session.current_user_id().await.unwrap(), user.id);

        // 同一邮箱不能重复注册
        let err = env.session.register("nuevo@b.cl", "clave").await.unwrap_err();
        assert!(err.to_string().starts_with("Error al registrar"));
    }

    #[tokio::test]
    async fn test_logout() {
        let env = test_env().await;
        env.backend.seed_user("a@b.cl", "123").await;
        env.session.login("a@b.cl", "123").await.unwrap();

        env.session.logout().await.unwrap();
        assert_eq!(
            env.session.current_user_id().await.unwrap_err().to_string(),
            MSG_NOT_LOGGED_IN
        );
        assert!(env.session.current_user().await.unwrap().is_none());
    }
}
