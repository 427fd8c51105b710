pub mod help;
pub mod session_list;
pub mod timeline;
