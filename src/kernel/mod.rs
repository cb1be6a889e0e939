pub mod host;
pub mod session;
pub mod time;
