pub mod access;
pub mod content;
pub mod identity;
pub mod portal;
pub mod session;
pub mod status;
