//! 应用程序初始化和启动
//!
//! 负责 CLI 的完整启动流程，包括：
//! - 命令行参数解析
//! - 数据目录和日志系统初始化
//! - 各领域模块初始化
//! - 命令分发和结果输出

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::api::HttpBackend;
use crate::cli::{BackendCommand, Cli, Commands, MaintenanceCommand, VehicleCommand};
use crate::commands;
use crate::logger;
use crate::maintenance::{MaintenanceSummary, NO_DATE_LABEL};
use crate::models::{Maintenance, Vehicle};
use crate::settings::SettingsManager;
use crate::storage::Database;
use crate::utils::{self, ISO_DATE_FORMAT};
use crate::AppState;

/// 应用程序入口点
///
/// 1. 解析命令行参数
/// 2. 初始化数据目录和日志系统
/// 3. 初始化设置、本地数据库和后端客户端
/// 4. 执行命令并输出结果
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("No se pudo iniciar el runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("命令执行失败: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// 数据目录：`--data-dir` 优先，否则使用默认目录
fn resolve_data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(utils::default_data_dir)
}

async fn build_state(backend_override: Option<&str>, data_dir: &Path) -> Result<AppState> {
    let settings = Arc::new(SettingsManager::new(utils::settings_path(data_dir)).await?);

    let db_path = utils::database_path(data_dir);
    let db_path = db_path
        .to_str()
        .ok_or_else(|| anyhow!("Ruta de base de datos inválida: {:?}", db_path))?;
    let db = Arc::new(Database::new(db_path).await?);

    // --backend 只影响本次执行，不写入设置
    let prefs = settings.get().await;
    let base_url = match backend_override {
        Some(host) => {
            let host = utils::validate_backend_host(host).map_err(|e| anyhow!(e))?;
            format!("http://{}:{}/", host, prefs.backend_port)
        }
        None => prefs.base_url(),
    };
    let backend = Arc::new(HttpBackend::new(&base_url)?);
    debug!("使用后端: {}", backend.base_url());

    Ok(AppState::new(backend, settings, db))
}

async fn execute(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(&cli);

    if let Err(e) = logger::init(&utils::log_dir(&data_dir), cli.verbose) {
        eprintln!("No se pudo iniciar el registro: {}", e);
    }
    info!("数据目录: {:?}", data_dir);

    let json = cli.json;

    // 离线命令不读取设置，也不打开本地数据库
    match cli.command {
        Commands::Status {
            current,
            recorded,
            description,
        } => print_status(current, recorded, &description, json),
        Commands::Maintenance(MaintenanceCommand::Kinds) => print_kinds(json),
        command => {
            let state = build_state(cli.backend.as_deref(), &data_dir).await?;
            run_online(&state, command, json).await
        }
    }
}

async fn run_online(state: &AppState, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Login(creds) => {
            let user = commands::login(state, creds.email, creds.password)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &user, |u| format!("Sesión iniciada (usuario {}).", u.id))
        }
        Commands::Register(creds) => {
            let user = commands::register(state, creds.email, creds.password)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &user, |u| {
                format!("Registro exitoso. Sesión iniciada (usuario {}).", u.id)
            })
        }
        Commands::Logout => {
            commands::logout(state).await.map_err(|e| anyhow!(e))?;
            print_output(json, &(), |_| "Sesión cerrada.".to_string())
        }
        Commands::Whoami => {
            let user = commands::get_current_user(state)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &user, |u| match u {
                Some(u) if !u.email.is_empty() => format!("{} (usuario {})", u.email, u.id),
                Some(u) => format!("Usuario {}", u.id),
                None => "No hay sesión iniciada.".to_string(),
            })
        }
        Commands::Backend(BackendCommand::Set { host, port }) => {
            let prefs = commands::set_backend(state, host, port)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &prefs, |p| format!("Backend: {}", p.base_url()))
        }
        Commands::Backend(BackendCommand::Show) => {
            let prefs = commands::get_preferences(state)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &prefs, |p| format!("Backend: {}", p.base_url()))
        }
        Commands::Vehicle(command) => run_vehicle(state, command, json).await,
        Commands::Maintenance(command) => run_maintenance(state, command, json).await,
        Commands::Status {
            current,
            recorded,
            description,
        } => print_status(current, recorded, &description, json),
    }
}

fn print_status(current: i64, recorded: i64, description: &str, json: bool) -> Result<()> {
    let report = commands::evaluate_status(current, recorded, description);
    print_output(json, &report, |r| {
        format!("{} ({}%)", r.status.display_name(), r.percent)
    })
}

fn print_kinds(json: bool) -> Result<()> {
    let kinds = commands::get_maintenance_kinds();
    print_output(json, &kinds, |k| k.join("\n"))
}

async fn run_vehicle(state: &AppState, command: VehicleCommand, json: bool) -> Result<()> {
    match command {
        VehicleCommand::List => {
            let vehicles = commands::list_vehicles(state)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &vehicles, |list| {
                if list.is_empty() {
                    return "No tienes vehículos registrados.".to_string();
                }
                list.iter().map(vehicle_line).collect::<Vec<_>>().join("\n")
            })
        }
        VehicleCommand::Add(fields) => {
            let vehicle = commands::add_vehicle(state, fields.into())
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &vehicle, |v| format!("Vehículo guardado: {}", vehicle_line(v)))
        }
        VehicleCommand::Show { id } => {
            let vehicle = commands::get_vehicle(state, id)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &vehicle, vehicle_line)
        }
        VehicleCommand::Edit { id, fields } => {
            let vehicle = commands::update_vehicle(state, id, fields.into())
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &vehicle, |v| {
                format!("Vehículo actualizado: {}", vehicle_line(v))
            })
        }
        VehicleCommand::Delete { id } => {
            commands::delete_vehicle(state, id)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &(), |_| "Vehículo eliminado.".to_string())
        }
        VehicleCommand::Qr { id } => {
            let payload = commands::get_vehicle_qr(state, id)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &payload, |p| p.clone())
        }
        VehicleCommand::Scan { payload } => {
            let vehicle = commands::scan_vehicle_qr(state, payload)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &vehicle, vehicle_line)
        }
    }
}

async fn run_maintenance(state: &AppState, command: MaintenanceCommand, json: bool) -> Result<()> {
    let today = utils::today().format(ISO_DATE_FORMAT).to_string();

    match command {
        MaintenanceCommand::List { vehicle_id } => {
            let records = commands::list_maintenances(state, vehicle_id)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &records, |list| {
                if list.is_empty() {
                    return "No hay mantenimientos registrados.".to_string();
                }
                list.iter()
                    .map(maintenance_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        MaintenanceCommand::Add { vehicle_id, fields } => {
            let created = commands::add_maintenance(state, vehicle_id, fields.into_form(&today))
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &created, |m| {
                format!("Mantenimiento guardado: {}", maintenance_line(m))
            })
        }
        MaintenanceCommand::Edit { id, fields } => {
            let updated = commands::update_maintenance(state, id, fields.into_edit_form())
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &updated, |m| {
                format!("Mantenimiento actualizado: {}", maintenance_line(m))
            })
        }
        MaintenanceCommand::Delete { id } => {
            commands::delete_maintenance(state, id)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &(), |_| "Mantenimiento eliminado".to_string())
        }
        MaintenanceCommand::Summary { vehicle_id } => {
            let summary = commands::get_maintenance_summary(state, vehicle_id)
                .await
                .map_err(|e| anyhow!(e))?;
            print_output(json, &summary, summary_text)
        }
        MaintenanceCommand::Kinds => print_kinds(json),
    }
}

/// 输出结果：`--json` 时输出 JSON，否则输出文本
fn print_output<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn vehicle_line(vehicle: &Vehicle) -> String {
    format!(
        "#{} {} - {} km",
        vehicle.id.map(|id| id.to_string()).unwrap_or_default(),
        vehicle.title(),
        vehicle.mileage
    )
}

fn maintenance_line(maintenance: &Maintenance) -> String {
    format!(
        "#{} {} | {} | {} km | {}",
        maintenance.id.map(|id| id.to_string()).unwrap_or_default(),
        maintenance.kind,
        maintenance
            .date
            .as_deref()
            .map(utils::format_display_date)
            .unwrap_or_else(|| NO_DATE_LABEL.to_string()),
        maintenance.mileage,
        maintenance.description
    )
}

fn summary_text(summary: &MaintenanceSummary) -> String {
    let mut lines = vec![
        format!(
            "{} - {} km",
            summary.vehicle.title(),
            summary.vehicle.mileage
        ),
        format!(
            "Realizados: {}  Próximos: {}  Atrasados: {}",
            summary.done, summary.upcoming, summary.overdue
        ),
    ];

    for group in &summary.groups {
        lines.push(String::new());
        lines.push(group.title.clone());
        for card in &group.cards {
            lines.push(format!(
                "  {:<12} {} | {} km | {:>3}% | {}",
                card.status.display_name(),
                card.date,
                card.mileage,
                card.percent,
                card.description
            ));
        }
    }

    lines.join("\n")
}
