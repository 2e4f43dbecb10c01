pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod render;
pub mod resolve;

pub use command_result::*;
