use std::fs;
use std::path::Path;

use thiserror::Error;
use validator::Validate;

use crate::core::{MatchError, Population};
use crate::models::PreferenceProfile;

/// Errors that can occur while loading a preference profile
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported profile format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid profile: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Profile error: {0}")]
    Profile(#[from] MatchError),
}

/// On-disk profile encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Json,
    Toml,
}

impl ProfileFormat {
    /// Pick the format from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ProfileFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ProfileFormat::Toml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse and validate a profile from text
pub fn parse_profile(contents: &str, format: ProfileFormat) -> Result<PreferenceProfile, LoadError> {
    let profile: PreferenceProfile = match format {
        ProfileFormat::Json => serde_json::from_str(contents)?,
        ProfileFormat::Toml => toml::from_str(contents)?,
    };
    profile.validate()?;
    Ok(profile)
}

/// Read a profile file, choosing the parser by extension
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<PreferenceProfile, LoadError> {
    let path = path.as_ref();
    let format = ProfileFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;

    tracing::info!("Loading {:?} profile from {}", format, path.display());
    parse_profile(&contents, format)
}

/// Read a profile file and build its population
pub fn load_population<P: AsRef<Path>>(path: P) -> Result<Population, LoadError> {
    let profile = load_profile(path)?;
    Ok(Population::from_profile(&profile)?)
}
