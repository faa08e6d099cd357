pub mod add;
pub mod done;
pub mod init;
pub mod list;
pub mod set;
pub mod ui;
