//! Scene identifier parsing.

use crate::error::SceneError;
use std::fmt;
use std::str::FromStr;

/// Length of a full scene identifier.
const SCENE_NAME_LEN: usize = 21;

/// Length of the legacy identifier form, which lacks the ground station suffix.
const LEGACY_NAME_LEN: usize = 16;

/// Suffix appended to legacy identifiers.
const LEGACY_SUFFIX: &str = "LGN00";

/// A parsed Landsat scene identifier, e.g. `LC80030172015001LGN00`.
///
/// Only the length is validated here; whether a provider serves the sensor
/// prefix is decided by each backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneIdentifier {
    name: String,
}

impl SceneIdentifier {
    /// Parses a raw scene string.
    ///
    /// A 16-character legacy name is padded with `LGN00` first.
    pub fn parse(raw: &str) -> Result<Self, SceneError> {
        let mut name = raw.to_string();
        if name.len() == LEGACY_NAME_LEN {
            name.push_str(LEGACY_SUFFIX);
        }

        // Byte offsets below are only character offsets for ASCII input.
        if name.len() != SCENE_NAME_LEN || !name.is_ascii() {
            return Err(SceneError::InvalidIdentifier(raw.to_string()));
        }

        Ok(Self { name })
    }

    /// The canonical 21-character name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sensor prefix, e.g. `LC8`.
    pub fn prefix(&self) -> &str {
        &self.name[0..3]
    }

    /// WRS path.
    pub fn path(&self) -> &str {
        &self.name[3..6]
    }

    /// WRS row.
    pub fn row(&self) -> &str {
        &self.name[6..9]
    }
}

impl FromStr for SceneIdentifier {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SceneIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
