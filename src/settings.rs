use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::{PersistedPreferences, Preferences};

/// 本地偏好设置（登录用户 ID、后端地址）
pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<PersistedPreferences>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<PersistedPreferences>(&bytes).unwrap_or_else(|e| {
                    warn!("偏好设置文件损坏，使用默认值: {}", e);
                    PersistedPreferences::default()
                })
            }
            _ => {
                let default = PersistedPreferences::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> PersistedPreferences {
        self.data.read().await.clone()
    }

    pub async fn update(&self, update: Preferences) -> Result<PersistedPreferences> {
        let mut prefs = self.data.write().await;

        if let Some(id) = update.user_id {
            prefs.user_id = Some(id);
        }
        if let Some(host) = update.backend_host {
            prefs.backend_host = Some(host);
        }
        if let Some(port) = update.backend_port {
            prefs.backend_port = port;
        }
        if let Some(email) = update.last_email {
            prefs.last_email = Some(email);
        }

        self.save(&prefs).await?;
        Ok(prefs.clone())
    }

    /// 保存登录用户 ID
    pub async fn save_user_id(&self, id: i64) -> Result<()> {
        self.update(Preferences {
            user_id: Some(id),
            ..Default::default()
        })
        .await?;
        Ok(())
    }

    /// 读取登录用户 ID
    pub async fn user_id(&self) -> Option<i64> {
        self.data.read().await.user_id
    }

    /// 退出登录：删除用户 ID，其他设置保留
    pub async fn logout(&self) -> Result<()> {
        let mut prefs = self.data.write().await;
        prefs.user_id = None;
        self.save(&prefs).await
    }

    /// 保存后端主机
    pub async fn save_backend_host(&self, host: &str) -> Result<()> {
        self.update(Preferences {
            backend_host: Some(host.to_string()),
            ..Default::default()
        })
        .await?;
        Ok(())
    }

    /// 读取后端主机
    pub async fn backend_host(&self) -> Option<String> {
        self.data.read().await.backend_host.clone()
    }

    /// 后端基础 URL
    pub async fn base_url(&self) -> String {
        self.data.read().await.base_url()
    }

    async fn save(&self, prefs: &PersistedPreferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
