//! 配置管理命令
//!
//! 读取和修改后端地址

use tracing::info;

use crate::models::{PersistedPreferences, Preferences};
use crate::utils::validate_backend_host;
use crate::AppState;

/// 获取本地偏好设置
pub async fn get_preferences(state: &AppState) -> Result<PersistedPreferences, String> {
    Ok(state.session_domain.get_settings().get().await)
}

/// 设置后端主机和端口
///
/// 新地址从下一次命令开始生效
pub async fn set_backend(
    state: &AppState,
    host: String,
    port: Option<u16>,
) -> Result<PersistedPreferences, String> {
    let host = validate_backend_host(&host)?;

    let updated = state
        .session_domain
        .get_settings()
        .update(Preferences {
            backend_host: Some(host),
            backend_port: port,
            ..Default::default()
        })
        .await
        .map_err(|e| e.to_string())?;

    info!("后端地址已更新: {}", updated.base_url());
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_state;

    #[tokio::test]
    async fn test_set_backend() {
        let (_dir, _backend, state) = test_state().await;

        let prefs = set_backend(&state, " 192.168.1.20 ".to_string(), Some(9090))
            .await
            .unwrap();
        assert_eq!(prefs.base_url(), "http://192.168.1.20:9090/");

        // 只改主机时保留端口
        let prefs = set_backend(&state, "10.0.2.2".to_string(), None).await.unwrap();
        assert_eq!(prefs.base_url(), "http://10.0.2.2:9090/");
        assert_eq!(get_preferences(&state).await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn test_set_backend_rejects_url() {
        let (_dir, _backend, state) = test_state().await;
        assert!(set_backend(&state, "http://10.0.2.2".to_string(), None)
            .await
            .is_err());
        assert!(set_backend(&state, "  ".to_string(), None).await.is_err());
    }
}
