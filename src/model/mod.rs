pub mod category;
pub mod event;
pub mod leave_application;
pub mod role;
pub mod status;
pub mod user;
