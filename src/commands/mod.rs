pub mod add;
pub mod diff;
pub mod init;
pub mod list;
pub mod search;
