//! Static access control table.
//!
//! Only tables listed here can be queried, and only their exposed fields are
//! ever requested upstream.

use crate::errors::{AppError, AppResult};
use crate::models::TableConfig;

pub const TABLES: &[TableConfig] = &[
    TableConfig {
        name: "Operativo Laboratorios",
        id_or_name: "Operativo Laboratorios",
        allowed: &[
            "ID Cita",
            "Proveedor",
            "PIF",
            "Fecha de Creación Cita",
            "FechaDeCita",
            "ESTATUS",
            "Incidencias",
            "ANALISTA",
            "Campaña del cliente",
            "LAB REASIGNADO",
            "Laboratorio Reasignado",
            "TituloDelServicio",
            "Día asignado a analista",
            "Hora Creación Cita",
            "Origen",
            "Status",
            "FechaHoy",
            "Categoría del servicio",
            "Generoform",
            "FechadeATENCION(controlAsign)",
            "Fin de vigencia",
            "Costo PIF",
            "Costo PIF + IVA",
            "Entidad Federativa",
            "Municipios",
        ],
        blocked: &["Dirección del servicio", "FechadeNacimientooo"],
    },
    TableConfig {
        name: "HEXALUD RED",
        id_or_name: "HEXALUD RED",
        allowed: &[
            "Proveedor Hexalud",
            "StatusActual",
            "Campaña",
            "Linea de negocio",
            "Tipo de red",
            "Nombre del Medico",
            "Detalle del convenio referencia",
            "Puntos importantes",
            "Cupon",
            "Entidad Federativa",
            "Municipios",
            "FOTO",
            "Profesión",
            "Especialidad",
        ],
        blocked: &[
            "Direccion Completa",
            "Referencias de ubicacion",
            "Tel 1",
            "Tel 2",
            "Correos",
            "Latitud",
            "Longitud",
        ],
    },
];

/// Looks up a table by the name callers use.
///
/// # Errors
/// Returns `AppError::TableNotAllowed` when the table is not configured.
pub fn table_config(name: &str) -> AppResult<&'static TableConfig> {
    TABLES
        .iter()
        .find(|cfg| cfg.name == name)
        .ok_or_else(|| AppError::TableNotAllowed(name.to_string()))
}
