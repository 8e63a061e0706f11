pub mod bake;
pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod resolve;
pub mod transform;

pub use command_result::*;
