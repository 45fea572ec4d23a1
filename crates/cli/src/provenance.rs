//! Sidecar recording how a result file was produced.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Contents of `<stem>.provenance.json`.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub xycoord_version: &'static str,
    pub command: String,
    pub params: Value,
}

impl Provenance {
    pub fn new(command: impl Into<String>, params: Value) -> Self {
        Self {
            code_rev: code_rev(),
            xycoord_version: xycoord::VERSION,
            command: command.into(),
            params,
        }
    }

    /// Write the sidecar next to `result` (whose directory must exist).
    pub fn write_beside(&self, result: &Path) -> Result<PathBuf> {
        let path = result.with_extension("provenance.json");
        let mut doc = serde_json::to_value(self)?;
        doc["result"] = Value::from(result.to_string_lossy().into_owned());
        std::fs::write(&path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// Commit baked in at build time, else taken from the environment.
fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_the_extension() {
        let dir = tempdir().unwrap();
        let result = dir.path().join("locate.json");
        std::fs::write(&result, "{}").unwrap();
        let prov = Provenance::new("locate", json!({"point": "4:y^2 - x:1"}));
        let path = prov.write_beside(&result).unwrap();
        assert_eq!(path, dir.path().join("locate.provenance.json"));
        let parsed: Value = serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["command"], "locate");
        assert_eq!(parsed["params"]["point"], "4:y^2 - x:1");
        assert_eq!(parsed["xycoord_version"], xycoord::VERSION);
        assert_eq!(parsed["result"], result.to_string_lossy().as_ref());
    }

    #[test]
    fn bare_file_names_get_a_suffix() {
        let dir = tempdir().unwrap();
        let result = dir.path().join("order");
        let path = Provenance::new("compare", json!({}))
            .write_beside(&result)
            .unwrap();
        assert_eq!(path, dir.path().join("order.provenance.json"));
    }
}
