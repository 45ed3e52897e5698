pub mod confirmation_token;
pub mod project;
pub mod role;
pub mod status;
pub mod task;
pub mod user;

pub use confirmation_token::ConfirmationToken;
pub use project::Project;
pub use role::Role;
pub use status::{Gender, Status};
pub use task::Task;
pub use user::User;
