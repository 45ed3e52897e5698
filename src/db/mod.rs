pub mod confirmation_tokens;
pub mod projects;
pub mod roles;
pub mod tasks;
pub mod users;
