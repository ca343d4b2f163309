use std::{fs, path::Path};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum FacilityError {
    #[error("failed to read facility file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse facility file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The learning facility the new account is created in.
///
/// Deserialized from the facility payload of the host application, unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetFacility {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub learner_can_login_with_no_password: Option<bool>,
}

impl TargetFacility {
    pub fn from_file(path: &Path) -> Result<Self, FacilityError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// A missing facility or a facility without the setting requires a password.
    pub fn password_required(facility: Option<&TargetFacility>) -> bool {
        !matches!(
            facility,
            Some(TargetFacility {
                learner_can_login_with_no_password: Some(true),
                ..
            })
        )
    }
}
