// 内存后端 - 仅用于测试服务层

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ApiError, ApiResult, MaintenanceBackend};
use crate::models::{Maintenance, User, Vehicle};

#[derive(Default)]
struct State {
    next_id: i64,
    vehicles: BTreeMap<i64, Vehicle>,
    maintenances: BTreeMap<i64, Maintenance>,
    users: Vec<User>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// 内存后端
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

fn not_found(what: &str, id: i64) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("{} {} no encontrado", what, id),
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预先注册用户，返回用户 ID
    pub async fn seed_user(&self, email: &str, password: &str) -> i64 {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.users.push(User {
            id: Some(id),
            email: email.to_string(),
            password: password.to_string(),
        });
        id
    }

    /// 预先添加车辆，返回车辆 ID
    pub async fn seed_vehicle(&self, owner_id: i64, brand: &str, mileage: i32) -> i64 {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.vehicles.insert(
            id,
            Vehicle {
                id: Some(id),
                brand: brand.to_string(),
                model: "Modelo".to_string(),
                year: 2020,
                mileage,
                owner_id: Some(owner_id),
                qr_code: None,
            },
        );
        id
    }

    /// 预先添加保养记录，返回记录 ID
    pub async fn seed_maintenance(
        &self,
        vehicle_id: i64,
        kind: &str,
        mileage: i32,
        description: &str,
    ) -> i64 {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.maintenances.insert(
            id,
            Maintenance {
                id: Some(id),
                kind: kind.to_string(),
                description: description.to_string(),
                date: Some("2024-01-10".to_string()),
                mileage,
                status: Default::default(),
                vehicle_id,
            },
        );
        id
    }

    pub async fn vehicle_count(&self) -> usize {
        self.state.lock().await.vehicles.len()
    }

    pub async fn maintenance(&self, id: i64) -> Option<Maintenance> {
        self.state.lock().await.maintenances.get(&id).cloned()
    }
}

#[async_trait]
impl MaintenanceBackend for MemoryBackend {
    async fn list_vehicles(&self, user_id: i64) -> ApiResult<Vec<Vehicle>> {
        let state = self.state.lock().await;
        Ok(state
            .vehicles
            .values()
            .filter(|v| v.owner_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn get_vehicle(&self, vehicle_id: i64) -> ApiResult<Vehicle> {
        let state = self.state.lock().await;
        state
            .vehicles
            .get(&vehicle_id)
            .cloned()
            .ok_or_else(|| not_found("vehículo", vehicle_id))
    }

    async fn create_vehicle(&self, user_id: i64, vehicle: &Vehicle) -> ApiResult<Vehicle> {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        let mut created = vehicle.clone();
        created.id = Some(id);
        created.owner_id = Some(user_id);
        state.vehicles.insert(id, created.clone());
        Ok(created)
    }

    async fn update_vehicle(&self, vehicle_id: i64, vehicle: &Vehicle) -> ApiResult<Vehicle> {
        let mut state = self.state.lock().await;
        let slot = state
            .vehicles
            .get_mut(&vehicle_id)
            .ok_or_else(|| not_found("vehículo", vehicle_id))?;
        *slot = Vehicle {
            id: Some(vehicle_id),
            ..vehicle.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_vehicle(&self, vehicle_id: i64) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state
            .vehicles
            .remove(&vehicle_id)
            .ok_or_else(|| not_found("vehículo", vehicle_id))?;
        state.maintenances.retain(|_, m| m.vehicle_id != vehicle_id);
        Ok(())
    }

    async fn list_maintenances(&self, vehicle_id: i64) -> ApiResult<Vec<Maintenance>> {
        let state = self.state.lock().await;
        Ok(state
            .maintenances
            .values()
            .filter(|m| m.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    async fn create_maintenance(
        &self,
        vehicle_id: i64,
        maintenance: &Maintenance,
    ) -> ApiResult<Maintenance> {
        let mut state = self.state.lock().await;
        if !state.vehicles.contains_key(&vehicle_id) {
            return Err(not_found("vehículo", vehicle_id));
        }
        let id = state.next_id();
        let mut created = maintenance.clone();
        created.id = Some(id);
        created.vehicle_id = vehicle_id;
        state.maintenances.insert(id, created.clone());
        Ok(created)
    }

    async fn get_maintenance(&self, id: i64) -> ApiResult<Maintenance> {
        let state = self.state.lock().await;
        state
            .maintenances
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("mantenimiento", id))
    }

    async fn update_maintenance(&self, id: i64, maintenance: &Maintenance) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        let slot = state
            .maintenances
            .get_mut(&id)
            .ok_or_else(|| not_found("mantenimiento", id))?;
        *slot = Maintenance {
            id: Some(id),
            ..maintenance.clone()
        };
        Ok(())
    }

    async fn delete_maintenance(&self, id: i64) -> ApiResult<()> {
        let mut state = self.state.lock().await;
        state
            .maintenances
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("mantenimiento", id))
    }

    async fn login(&self, user: &User) -> ApiResult<User> {
        let state = self.state.lock().await;
        state
            .users
            .iter()
            .find(|u| u.email == user.email && u.password == user.password)
            .map(|u| User {
                id: u.id,
                email: u.email.clone(),
                password: String::new(),
            })
            .ok_or(ApiError::Status {
                status: 401,
                body: "Credenciales inválidas".to_string(),
            })
    }

    async fn register(&self, user: &User) -> ApiResult<User> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::Status {
                status: 409,
                body: "El email ya existe".to_string(),
            });
        }
        let id = state.next_id();
        state.users.push(User {
            id: Some(id),
            ..user.clone()
        });
        Ok(User {
            id: Some(id),
            email: user.email.clone(),
            password: String::new(),
        })
    }
}
