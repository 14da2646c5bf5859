use thiserror::Error;

#[derive(Debug, Error)]
pub enum VeilError {
    #[error("not initialized: run 'veil init'")]
    NotInitialized,

    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("profile already exists: {0}")]
    ProfileExists(String),

    #[error("an act is already outstanding: complete it and reflect first")]
    ActOutstanding,

    #[error("no act is outstanding")]
    NoCurrentAct,

    #[error("the act has not been completed yet")]
    ActNotCompleted,

    #[error("the completed act is awaiting reflection")]
    ActAwaitingReflection,

    #[error("no sacred loss is pending")]
    NoLossPending,

    #[error("a mission is already in progress: {0}")]
    MissionInProgress(String),

    #[error("mission not found: {0}")]
    MissionNotFound(String),

    #[error("mission already completed: {0}")]
    MissionCompleted(String),

    #[error("mission '{mission}' is locked: '{tier}' asks for {required} unseen acts, you have {unseen}")]
    MissionLocked {
        mission: String,
        tier: String,
        required: u32,
        unseen: u32,
    },

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid mission book: {0}")]
    InvalidMissionBook(String),

    #[error("not signed in: run 'veil auth sign-in'")]
    NotSignedIn,

    #[error("Invalid email address.")]
    InvalidEmail,

    #[error("An account with this email already exists.")]
    EmailTaken,

    #[error("No account found with this email.")]
    UnknownEmail,

    #[error("Incorrect password.")]
    WrongPassword,

    #[error("Password should be at least 6 characters.")]
    WeakPassword,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VeilError>;
