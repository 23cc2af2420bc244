//! Data shapes returned by the admin API, one module per collection.

pub mod activity_log;
pub mod ai_model;
pub mod permission;
pub mod prompt_template;
pub mod role;
pub mod user;

pub use activity_log::*;
pub use ai_model::*;
pub use permission::*;
pub use prompt_template::*;
pub use role::*;
pub use user::*;
