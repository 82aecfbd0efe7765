//! 命令行参数定义

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{MaintenanceForm, VehicleForm};

#[derive(Parser, Debug)]
#[command(name = "mantenciones")]
#[command(about = "Cliente de mantenimiento de vehículos")]
#[command(version)]
pub struct Cli {
    /// Directorio de datos (por defecto MANTENCIONES_HOME o el directorio de la plataforma)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// IP o host del backend solo para esta ejecución
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Imprime la salida como JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Muestra logs de depuración
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicia sesión
    Login(Credentials),
    /// Crea una cuenta e inicia sesión
    Register(Credentials),
    /// Cierra la sesión
    Logout,
    /// Muestra el usuario actual
    Whoami,
    /// Configuración del backend
    #[command(subcommand)]
    Backend(BackendCommand),
    /// Vehículos del usuario
    #[command(subcommand)]
    Vehicle(VehicleCommand),
    /// Mantenimientos de un vehículo
    #[command(subcommand)]
    Maintenance(MaintenanceCommand),
    /// Calcula el estado de un mantenimiento sin conectarse al backend
    Status {
        /// Kilometraje actual del vehículo
        #[arg(long, allow_negative_numbers = true)]
        current: i64,
        /// Kilometraje registrado en el mantenimiento
        #[arg(long, allow_negative_numbers = true)]
        recorded: i64,
        /// Descripción, por ejemplo "Cada 5000 - 10000 km"
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Args, Debug)]
pub struct Credentials {
    /// Correo electrónico
    pub email: String,
    /// Contraseña
    #[arg(long, short)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum BackendCommand {
    /// Guarda la IP o host del backend
    Set {
        host: String,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Muestra la configuración actual
    Show,
}

#[derive(Args, Debug)]
pub struct VehicleArgs {
    #[arg(long, default_value = "")]
    pub brand: String,
    #[arg(long, default_value = "")]
    pub model: String,
    #[arg(long, default_value = "")]
    pub year: String,
    #[arg(long, default_value = "")]
    pub mileage: String,
}

impl From<VehicleArgs> for VehicleForm {
    fn from(args: VehicleArgs) -> Self {
        Self {
            brand: args.brand,
            model: args.model,
            year: args.year,
            mileage: args.mileage,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommand {
    /// Lista los vehículos
    List,
    /// Agrega un vehículo
    Add(VehicleArgs),
    /// Muestra un vehículo
    Show { id: i64 },
    /// Edita un vehículo
    Edit {
        id: i64,
        #[command(flatten)]
        fields: VehicleArgs,
    },
    /// Elimina un vehículo
    Delete { id: i64 },
    /// Muestra el contenido del QR del vehículo
    Qr { id: i64 },
    /// Busca un vehículo a partir del contenido de un QR
    Scan { payload: String },
}

#[derive(Args, Debug)]
pub struct MaintenanceArgs {
    /// Tipo, por ejemplo "Cambio de aceite"
    #[arg(long, default_value = "")]
    pub kind: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Fecha AAAA-MM-DD (al agregar, por defecto hoy; al editar, se mantiene la actual)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, default_value = "")]
    pub mileage: String,
}

impl MaintenanceArgs {
    /// 转换为表单，未指定日期时使用 `default_date`
    pub fn into_form(self, default_date: &str) -> MaintenanceForm {
        MaintenanceForm {
            kind: self.kind,
            description: self.description,
            date: self.date.unwrap_or_else(|| default_date.to_string()),
            mileage: self.mileage,
        }
    }

    /// 编辑用表单：未指定日期时留空，由保养领域沿用原日期
    pub fn into_edit_form(self) -> MaintenanceForm {
        self.into_form("")
    }
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceCommand {
    /// Lista los mantenimientos de un vehículo
    List { vehicle_id: i64 },
    /// Agrega un mantenimiento
    Add {
        vehicle_id: i64,
        #[command(flatten)]
        fields: MaintenanceArgs,
    },
    /// Edita un mantenimiento
    Edit {
        id: i64,
        #[command(flatten)]
        fields: MaintenanceArgs,
    },
    /// Elimina un mantenimiento
    Delete { id: i64 },
    /// Resumen del estado de mantenimiento de un vehículo
    Summary { vehicle_id: i64 },
    /// Tipos de mantenimiento disponibles
    Kinds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from([
            "mantenciones",
            "status",
            "--current",
            "57000",
            "--recorded",
            "50000",
            "--description",
            "Cada 5000 - 10000 km",
        ])
        .unwrap();
        match cli.command {
            Commands::Status {
                current,
                recorded,
                description,
            } => {
                assert_eq!(current, 57000);
                assert_eq!(recorded, 50000);
                assert_eq!(description, "Cada 5000 - 10000 km");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mantenciones", "vehicle", "list", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_maintenance_add_defaults_date() {
        let cli = Cli::try_parse_from([
            "mantenciones",
            "maintenance",
            "add",
            "3",
            "--kind",
            "Cambio de aceite",
            "--mileage",
            "61000",
        ])
        .unwrap();
        let Commands::Maintenance(MaintenanceCommand::Add { vehicle_id, fields }) = cli.command
        else {
            panic!("expected maintenance add");
        };
        assert_eq!(vehicle_id, 3);
        let form = fields.into_form("2024-06-01");
        assert_eq!(form.date, "2024-06-01");
        assert_eq!(form.mileage, "61000");
    }

    #[test]
    fn test_maintenance_edit_leaves_date_empty() {
        let cli = Cli::try_parse_from([
            "mantenciones",
            "maintenance",
            "edit",
            "8",
            "--kind",
            "Cambio de aceite",
            "--description",
            "Cada 5000 - 10000 km",
            "--mileage",
            "51000",
        ])
        .unwrap();
        let Commands::Maintenance(MaintenanceCommand::Edit { id, fields }) = cli.command else {
            panic!("expected maintenance edit");
        };
        assert_eq!(id, 8);
        assert_eq!(fields.into_edit_form().date, "");
    }

    #[test]
    fn test_login_requires_password() {
        assert!(Cli::try_parse_from(["mantenciones", "login", "a@b.cl"]).is_err());
    }
}
