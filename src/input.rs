//! Where the C declarations come from

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::utils::{Error, Result};

/// Source of the text to translate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Declarations given directly on the command line
    Text(String),
    /// A file to read
    File(PathBuf),
    /// Standard input, read to the end
    Stdin,
}

impl Input {
    /// Read the whole source text
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::File(path) => fs::read_to_string(path).map_err(|source| Error::ReadFile {
                path: path.clone(),
                source,
            }),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(Error::ReadStdin)?;
                Ok(text)
            }
        }
    }

    /// Short description for log messages
    pub fn describe(&self) -> String {
        match self {
            Self::Text(_) => "command line".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "standard input".to_string(),
        }
    }
}
