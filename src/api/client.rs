// 后端 HTTP 客户端
// 负责与 REST 后端交互，所有请求和响应均为 JSON

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, error};

use super::{ApiError, ApiResult, MaintenanceBackend};
use crate::models::{Maintenance, User, Vehicle};

/// 请求超时（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 后端 HTTP 客户端
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// 创建新的后端客户端
    ///
    /// # 参数
    /// - `base_url`: 后端基础 URL，例如 `http://127.0.0.1:8080/`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow!("后端地址不能为空"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow!("后端地址必须以 http:// 或 https:// 开头: {}", base_url));
        }

        // 统一以 / 结尾，方便拼接路径
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// 获取基础 URL（用于调试）
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 检查响应状态，非 2xx 时读取响应体作为错误信息
    async fn check(method: &str, url: &str, response: Response) -> ApiResult<Response> {
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("后端请求失败: {} {} -> {} {}", method, url, status, body);
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check("GET", &url, response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let response = Self::check("POST", &url, response).await?;
        Ok(response.json().await?)
    }

    async fn put_json<B>(&self, path: &str, body: &B) -> ApiResult<Response>
    where
        B: serde::Serialize + ?Sized + Sync,
    {
        let url = self.url(path);
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(body).send().await?;
        Self::check("PUT", &url, response).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        Self::check("DELETE", &url, response).await?;
        Ok(())
    }
}

#[async_trait]
impl MaintenanceBackend for HttpBackend {
    // ========== 车辆 ==========

    async fn list_vehicles(&self, user_id: i64) -> ApiResult<Vec<Vehicle>> {
        self.get_json(&format!("vehiculos/usuario/{}", user_id)).await
    }

    async fn get_vehicle(&self, vehicle_id: i64) -> ApiResult<Vehicle> {
        self.get_json(&format!("vehiculos/{}", vehicle_id)).await
    }

    async fn create_vehicle(&self, user_id: i64, vehicle: &Vehicle) -> ApiResult<Vehicle> {
        self.post_json(&format!("vehiculos/usuario/{}", user_id), vehicle)
            .await
    }

    async fn update_vehicle(&self, vehicle_id: i64, vehicle: &Vehicle) -> ApiResult<Vehicle> {
        let response = self
            .put_json(&format!("vehiculos/{}", vehicle_id), vehicle)
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_vehicle(&self, vehicle_id: i64) -> ApiResult<()> {
        self.delete(&format!("vehiculos/{}", vehicle_id)).await
    }

    // ========== 保养记录 ==========

    async fn list_maintenances(&self, vehicle_id: i64) -> ApiResult<Vec<Maintenance>> {
        self.get_json(&format!("mantenimientos/vehiculo/{}", vehicle_id))
            .await
    }

    async fn create_maintenance(
        &self,
        vehicle_id: i64,
        maintenance: &Maintenance,
    ) -> ApiResult<Maintenance> {
        self.post_json(&format!("mantenimientos/vehiculo/{}", vehicle_id), maintenance)
            .await
    }

    async fn get_maintenance(&self, id: i64) -> ApiResult<Maintenance> {
        self.get_json(&format!("mantenimientos/{}", id)).await
    }

    async fn update_maintenance(&self, id: i64, maintenance: &Maintenance) -> ApiResult<()> {
        // 响应体为空，忽略
        self.put_json(&format!("mantenimientos/{}", id), maintenance)
            .await?;
        Ok(())
    }

    async fn delete_maintenance(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("mantenimientos/{}", id)).await
    }

    // ========== 用户 ==========

    async fn login(&self, user: &User) -> ApiResult<User> {
        self.post_json("usuarios/login", user).await
    }

    async fn register(&self, user: &User) -> ApiResult<User> {
        self.post_json("usuarios/registrar", user).await
    }
}
