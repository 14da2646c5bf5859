pub mod act;
pub mod auth;
pub mod history;
pub mod init;
pub mod loss;
pub mod mission;
pub mod reflect;
pub mod settings;
pub mod status;
