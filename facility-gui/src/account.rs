//! Rules a new local account must satisfy before it can be handed to the flow controller.
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::facility::TargetFacility;

/// Maximum number of characters of a full name or a username.
pub const NAME_MAXIMUM_LENGTH: usize = 125;

const REQUIRED: &str = "This field is required";
const TOO_LONG: &str = "Must be 125 characters or fewer";
const INVALID_CHARACTERS: &str = "Username can only contain letters, numbers and underscores";
const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Username,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{}", REQUIRED)]
    Required,
    #[error("{}", TOO_LONG)]
    TooLong,
    #[error("{}", INVALID_CHARACTERS)]
    InvalidCharacters,
    #[error("{}", PASSWORD_MISMATCH)]
    PasswordMismatch,
}

impl FieldError {
    /// Message displayed under the invalid field.
    pub fn warning(&self) -> &'static str {
        match self {
            Self::Required => REQUIRED,
            Self::TooLong => TOO_LONG,
            Self::InvalidCharacters => INVALID_CHARACTERS,
            Self::PasswordMismatch => PASSWORD_MISMATCH,
        }
    }
}

/// Values typed by the user, not yet validated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountDraft {
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// Passwords are never written to the logs.
impl fmt::Debug for AccountDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDraft")
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AccountDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::FullName => self.full_name = value,
            Field::Username => self.username = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
    }
}

fn check_length(value: &str) -> Result<(), FieldError> {
    if value.graphemes(true).count() > NAME_MAXIMUM_LENGTH {
        Err(FieldError::TooLong)
    } else {
        Ok(())
    }
}

pub fn validate_full_name(full_name: &str) -> Result<(), FieldError> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        return Err(FieldError::Required);
    }
    check_length(full_name)
}

/// Letters, digits and underscores only.
pub fn is_valid_username(username: &str) -> bool {
    username.chars().all(|c| c.is_alphanumeric() || c == '_')
}

pub fn validate_username(username: &str) -> Result<(), FieldError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(FieldError::Required);
    }
    check_length(username)?;
    if !is_valid_username(username) {
        return Err(FieldError::InvalidCharacters);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), FieldError> {
    if confirm.is_empty() {
        Err(FieldError::Required)
    } else if password != confirm {
        Err(FieldError::PasswordMismatch)
    } else {
        Ok(())
    }
}

/// Result of every rule for a draft. Password fields are always satisfied when the
/// facility lets learners sign in without a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
    pub full_name: Result<(), FieldError>,
    pub username: Result<(), FieldError>,
    pub password: Result<(), FieldError>,
    pub confirm_password: Result<(), FieldError>,
}

impl Validity {
    pub fn check(draft: &AccountDraft, password_required: bool) -> Self {
        let (password, confirm_password) = if password_required {
            (
                validate_password(&draft.password),
                validate_confirm_password(&draft.password, &draft.confirm_password),
            )
        } else {
            (Ok(()), Ok(()))
        };
        Self {
            full_name: validate_full_name(&draft.full_name),
            username: validate_username(&draft.username),
            password,
            confirm_password,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.full_name.is_ok()
            && self.username.is_ok()
            && self.password.is_ok()
            && self.confirm_password.is_ok()
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::FullName => self.full_name.err(),
            Field::Username => self.username.err(),
            Field::Password => self.password.err(),
            Field::ConfirmPassword => self.confirm_password.err(),
        }
    }
}

pub fn is_valid(draft: &AccountDraft, facility: Option<&TargetFacility>) -> bool {
    Validity::check(draft, TargetFacility::password_required(facility)).is_valid()
}

/// A validated account, names trimmed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub full_name: String,
    pub username: String,
    /// `None` if the facility lets learners sign in without a password.
    pub password: Option<String>,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("full_name", &self.full_name)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .finish()
    }
}

impl NewAccount {
    pub fn from_draft(
        draft: AccountDraft,
        facility: Option<&TargetFacility>,
    ) -> Result<Self, Validity> {
        let password_required = TargetFacility::password_required(facility);
        let validity = Validity::check(&draft, password_required);
        if !validity.is_valid() {
            return Err(validity);
        }
        Ok(Self {
            full_name: draft.full_name.trim().to_string(),
            username: draft.username.trim().to_string(),
            password: password_required.then_some(draft.password),
        })
    }
}

impl From<&NewAccount> for AccountDraft {
    fn from(account: &NewAccount) -> Self {
        let password = account.password.clone().unwrap_or_default();
        Self {
            full_name: account.full_name.clone(),
            username: account.username.clone(),
            confirm_password: password.clone(),
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(full_name: &str, username: &str, password: &str, confirm: &str) -> AccountDraft {
        AccountDraft {
            full_name: full_name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn no_password_facility() -> TargetFacility {
        TargetFacility {
            learner_can_login_with_no_password: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_name_rules() {
        assert_eq!(validate_full_name(""), Err(FieldError::Required));
        assert_eq!(validate_full_name("   "), Err(FieldError::Required));
        assert_eq!(validate_full_name(" Test Fullname "), Ok(()));
        assert_eq!(validate_full_name(&"é".repeat(125)), Ok(()));
        assert_eq!(
            validate_full_name(&"a".repeat(NAME_MAXIMUM_LENGTH + 1)),
            Err(FieldError::TooLong)
        );
    }

    #[test]
    fn test_username_rules() {
        assert_eq!(validate_username(""), Err(FieldError::Required));
        assert_eq!(validate_username("testusername"), Ok(()));
        assert_eq!(validate_username("test_user_2"), Ok(()));
        assert_eq!(validate_username("  testusername "), Ok(()));
        assert_eq!(validate_username("élève"), Ok(()));
        for invalid in ["test user", "test-user", "test.user", "test@user", "user!"] {
            assert_eq!(
                validate_username(invalid),
                Err(FieldError::InvalidCharacters),
                "{}",
                invalid
            );
        }
        assert_eq!(
            validate_username(&"a".repeat(NAME_MAXIMUM_LENGTH + 1)),
            Err(FieldError::TooLong)
        );
    }

    #[test]
    fn test_empty_draft_is_invalid() {
        let draft = AccountDraft::default();
        assert!(!is_valid(&draft, None));
        assert!(!is_valid(&draft, Some(&no_password_facility())));
        let validity = Validity::check(&draft, true);
        assert_eq!(validity.error(Field::FullName), Some(FieldError::Required));
        assert_eq!(validity.error(Field::Username), Some(FieldError::Required));
        assert_eq!(validity.error(Field::Password), Some(FieldError::Required));
        assert_eq!(
            validity.error(Field::ConfirmPassword),
            Some(FieldError::Required)
        );
    }

    #[test]
    fn test_password_requiredness_follows_facility() {
        let without_password = draft("Test Fullname", "testusername", "", "");
        assert!(is_valid(&without_password, Some(&no_password_facility())));
        assert!(!is_valid(
            &without_password,
            Some(&TargetFacility {
                learner_can_login_with_no_password: Some(false),
                ..Default::default()
            })
        ));
        assert!(!is_valid(&without_password, Some(&TargetFacility::default())));
        assert!(!is_valid(&without_password, None));

        let with_password = draft("Test Fullname", "testusername", "testpassword", "testpassword");
        assert!(is_valid(&with_password, None));
        assert!(is_valid(&with_password, Some(&no_password_facility())));
    }

    #[test]
    fn test_password_mismatch() {
        let mismatch = draft("Test Fullname", "testusername", "testpassword", "testpasswort");
        let validity = Validity::check(&mismatch, true);
        assert!(!validity.is_valid());
        assert_eq!(
            validity.error(Field::ConfirmPassword),
            Some(FieldError::PasswordMismatch)
        );
        assert_eq!(validity.error(Field::Password), None);

        // Mismatch does not matter when no password is asked.
        assert!(Validity::check(&mismatch, false).is_valid());
    }

    #[test]
    fn test_validity_is_deterministic() {
        let d = draft("Test Fullname", "testusername", "testpassword", "testpassword");
        assert_eq!(Validity::check(&d, true), Validity::check(&d, true));
    }

    #[test]
    fn test_new_account_from_draft() {
        let account = NewAccount::from_draft(
            draft(" Test Fullname ", "testusername ", "testpassword", "testpassword"),
            None,
        )
        .unwrap();
        assert_eq!(account.full_name, "Test Fullname");
        assert_eq!(account.username, "testusername");
        assert_eq!(account.password.as_deref(), Some("testpassword"));

        let account = NewAccount::from_draft(
            draft("Test Fullname", "testusername", "", ""),
            Some(&no_password_facility()),
        )
        .unwrap();
        assert_eq!(account.password, None);

        let validity = NewAccount::from_draft(AccountDraft::default(), None).unwrap_err();
        assert!(!validity.is_valid());

        let restored = AccountDraft::from(&NewAccount {
            full_name: "Test Fullname".to_string(),
            username: "testusername".to_string(),
            password: Some("testpassword".to_string()),
        });
        assert_eq!(restored.password, restored.confirm_password);
        assert!(is_valid(&restored, None));
    }

    #[test]
    fn test_passwords_are_not_logged() {
        let d = draft("Test Fullname", "testusername", "secret", "secret");
        assert!(!format!("{:?}", d).contains("secret"));
        let account = NewAccount::from_draft(d, None).unwrap();
        assert!(!format!("{:?}", account).contains("secret"));
    }
}
