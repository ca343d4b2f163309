#[derive(Debug, Clone)]
pub enum Message {
    CreateAccount(CreateAccount),
    Previous,
    Finish,
}

#[derive(Debug, Clone)]
pub enum CreateAccount {
    FullNameEdited(String),
    UsernameEdited(String),
    PasswordEdited(String),
    ConfirmPasswordEdited(String),
    Back,
    Continue,
}

impl From<CreateAccount> for Message {
    fn from(value: CreateAccount) -> Self {
        Message::CreateAccount(value)
    }
}
