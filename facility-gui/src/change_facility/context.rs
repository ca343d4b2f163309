use crate::{account::NewAccount, facility::TargetFacility};

/// Context is data shared by the steps of the flow.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub target_facility: Option<TargetFacility>,
    /// Set once the account form was accepted.
    pub new_account: Option<NewAccount>,
}

impl Context {
    pub fn new(target_facility: Option<TargetFacility>) -> Self {
        Self {
            target_facility,
            new_account: None,
        }
    }

    pub fn facility_name(&self) -> Option<&str> {
        self.target_facility
            .as_ref()
            .and_then(|facility| facility.name.as_deref())
    }
}
