pub mod emit;
pub mod init;
pub mod levels;
pub mod opts;
pub mod validate;
