//! Profile catalog: loaded once at startup, immutable for the rest of the
//! run, iterated in file order.
//!
//! The catalog is a TOML table keyed by profile key ("sbi", "hdfc", ...).
//! Insertion order in the file is the resolution order, so when two
//! identifiers could both match, first-in-catalog wins.

use std::fs;
use std::path::Path;

use crate::error::{ProfileError, ProfileLoadError};
use crate::profile::{Profile, ProfileSpec};

/// Catalog shipped with the tool. New issuers are usually added here once
/// their crop box and pattern have been worked out with `khata inspect`.
const BUILTIN_CATALOG: &str = include_str!("../profiles.toml");

/// An immutable, ordered set of issuer profiles.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    profiles: Vec<(String, Profile)>,
}

impl ProfileSet {
    /// Parse and validate a catalog. Any malformed profile (missing field,
    /// regex that fails to compile, out-of-range group index, degenerate
    /// crop box) fails the whole load, naming the offending key.
    pub fn from_toml(src: &str) -> Result<Self, ProfileLoadError> {
        let table: toml::Table = toml::from_str(src)?;
        let mut profiles = Vec::with_capacity(table.len());
        for (key, value) in table {
            let spec: ProfileSpec =
                value
                    .try_into()
                    .map_err(|e: toml::de::Error| ProfileLoadError::Profile {
                        key: key.clone(),
                        source: ProfileError::Spec(e.message().to_string()),
                    })?;
            let profile = Profile::try_from(spec)
                .map_err(|source| ProfileLoadError::Profile {
                    key: key.clone(),
                    source,
                })?;
            profiles.push((key, profile));
        }
        Ok(Self { profiles })
    }

    pub fn from_path(path: &Path) -> Result<Self, ProfileLoadError> {
        let src = fs::read_to_string(path).map_err(|source| ProfileLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&src)
    }

    /// The built-in catalog.
    pub fn builtin() -> Result<Self, ProfileLoadError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// Profiles in catalog order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter().map(|(key, p)| (key.as_str(), p))
    }

    pub fn by_key(&self, key: &str) -> Result<&Profile, ProfileLoadError> {
        self.profiles
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
            .ok_or_else(|| ProfileLoadError::UnknownKey(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
