//! Type-map configuration
//!
//! The effective type map is the built-in table, overlaid first with the
//! entries of a JSON type-map file and then with `C=RUST` pairs given on the
//! command line.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::types::TypeTable;
use crate::utils::{Error, Result};

/// Parse one `C_TYPE=RUST_TYPE` pair
pub fn parse_mapping(entry: &str) -> Result<(String, String)> {
    let (c_type, rust_type) = entry
        .split_once('=')
        .ok_or_else(|| Error::InvalidMapping(entry.to_string()))?;
    let (c_type, rust_type) = (c_type.trim(), rust_type.trim());
    if c_type.is_empty() || rust_type.is_empty() {
        return Err(Error::InvalidMapping(entry.to_string()));
    }
    Ok((c_type.to_string(), rust_type.to_string()))
}

/// Parse a type-map file body: a JSON object of C spelling to Rust type
pub fn parse_type_map(text: &str, path: &Path) -> Result<BTreeMap<String, String>> {
    serde_json::from_str(text).map_err(|source| Error::TypeMapFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a type-map file
pub fn load_type_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_type_map(&text, path)
}

/// Type-map settings gathered from the command line
#[derive(Debug, Clone, Default)]
pub struct TypeMapConfig {
    /// JSON file with extra mappings
    pub types_file: Option<PathBuf>,
    /// `C=RUST` pairs, applied last
    pub mappings: Vec<String>,
}

impl TypeMapConfig {
    /// Build the effective table
    pub fn build(&self) -> Result<TypeTable> {
        let mut table = TypeTable::new();
        if let Some(path) = &self.types_file {
            let entries = load_type_map(path)?;
            debug!("loaded {} type mappings from {}", entries.len(), path.display());
            table.extend(entries);
        }
        for entry in &self.mappings {
            let (c_type, rust_type) = parse_mapping(entry)?;
            debug!("type mapping `{}` -> `{}`", c_type, rust_type);
            table.insert(&c_type, &rust_type);
        }
        Ok(table)
    }
}
