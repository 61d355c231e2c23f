//! Requested downloadable units and their validation.

use crate::error::SceneError;
use std::fmt;
use std::str::FromStr;

/// Highest spectral band number.
pub const MAX_BAND: u8 = 11;

/// Code of the quality assessment band.
pub const QUALITY_CODE: &str = "BQA";

/// Code of the scene metadata file.
pub const METADATA_CODE: &str = "MTL";

/// A unit the caller asks to download.
///
/// Values are not validated on construction so that a bad request can be
/// reported before any network I/O; see [`validate_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactSpec {
    /// Spectral band by number.
    Band(u8),
    /// Band by code, e.g. `BQA`.
    Code(String),
    /// The `_MTL.txt` metadata file.
    Metadata,
}

impl ArtifactSpec {
    /// The quality band.
    pub fn quality() -> Self {
        ArtifactSpec::Code(QUALITY_CODE.to_string())
    }

    /// Bands 1 through 11 plus the quality band.
    pub fn all_bands() -> Vec<Self> {
        (1..=MAX_BAND)
            .map(ArtifactSpec::Band)
            .chain(std::iter::once(Self::quality()))
            .collect()
    }

    /// Whether this value names something a provider can serve.
    pub fn is_valid(&self) -> bool {
        match self {
            ArtifactSpec::Band(n) => (1..=MAX_BAND).contains(n),
            ArtifactSpec::Code(code) => code == QUALITY_CODE,
            ArtifactSpec::Metadata => true,
        }
    }

    /// The file name of this artifact within a scene directory.
    pub fn file_name(&self, scene: &str) -> String {
        match self {
            ArtifactSpec::Band(n) => format!("{}_B{}.TIF", scene, n),
            ArtifactSpec::Code(code) => format!("{}_{}.TIF", scene, code),
            ArtifactSpec::Metadata => format!("{}_{}.txt", scene, METADATA_CODE),
        }
    }
}

impl fmt::Display for ArtifactSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactSpec::Band(n) => write!(f, "{}", n),
            ArtifactSpec::Code(code) => f.write_str(code),
            ArtifactSpec::Metadata => f.write_str(METADATA_CODE),
        }
    }
}

impl FromStr for ArtifactSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Ok(ArtifactSpec::Band(n));
        }
        if s.eq_ignore_ascii_case(METADATA_CODE) {
            return Ok(ArtifactSpec::Metadata);
        }
        Ok(ArtifactSpec::Code(s.to_string()))
    }
}

/// Checks every artifact, failing on the first invalid one.
pub fn validate_artifacts(artifacts: &[ArtifactSpec]) -> Result<(), SceneError> {
    match artifacts.iter().find(|a| !a.is_valid()) {
        Some(invalid) => Err(SceneError::InvalidArtifact(invalid.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_range() {
        assert!(!ArtifactSpec::Band(0).is_valid());
        assert!(ArtifactSpec::Band(1).is_valid());
        assert!(ArtifactSpec::Band(11).is_valid());
        assert!(!ArtifactSpec::Band(12).is_valid());
    }

    #[test]
    fn test_codes() {
        assert!(ArtifactSpec::quality().is_valid());
        assert!(!ArtifactSpec::Code("BAQ".to_string()).is_valid());
        assert!(ArtifactSpec::Metadata.is_valid());
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("4".parse::<ArtifactSpec>().unwrap(), ArtifactSpec::Band(4));
        assert_eq!(" BQA ".parse::<ArtifactSpec>().unwrap(), ArtifactSpec::quality());
        assert_eq!("mtl".parse::<ArtifactSpec>().unwrap(), ArtifactSpec::Metadata);
        assert_eq!(
            "300".parse::<ArtifactSpec>().unwrap(),
            ArtifactSpec::Code("300".to_string())
        );
    }

    #[test]
    fn test_file_names() {
        let scene = "LC80030172015001LGN00";
        assert_eq!(
            ArtifactSpec::Band(11).file_name(scene),
            "LC80030172015001LGN00_B11.TIF"
        );
        assert_eq!(
            ArtifactSpec::quality().file_name(scene),
            "LC80030172015001LGN00_BQA.TIF"
        );
        assert_eq!(
            ArtifactSpec::Metadata.file_name(scene),
            "LC80030172015001LGN00_MTL.txt"
        );
    }

    #[test]
    fn test_validate_reports_first_invalid() {
        let artifacts = vec![
            ArtifactSpec::Band(4),
            ArtifactSpec::Band(12),
            ArtifactSpec::Band(0),
        ];
        match validate_artifacts(&artifacts) {
            Err(SceneError::InvalidArtifact(name)) => assert_eq!(name, "12"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_all_bands() {
        let all = ArtifactSpec::all_bands();
        assert_eq!(all.len(), 12);
        assert!(validate_artifacts(&all).is_ok());
    }
}
