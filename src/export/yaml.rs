//! YAML export of the full document

use std::io::Write;

use crate::error::{MoneyMapError, MoneyMapResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> MoneyMapResult<()> {
    let export = FullExport::from_storage(storage)?;

    write!(
        writer,
        "# MoneyMap export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    )
    .map_err(|e| MoneyMapError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| MoneyMapError::Export(e.to_string()))
}

pub fn import_from_yaml(yaml_str: &str) -> MoneyMapResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| MoneyMapError::Json(e.to_string()))?;
    export.validate()?;
    Ok(export)
}
