pub mod command_log;
pub mod design;
pub mod label;
pub mod layout;
pub mod product;
pub mod sync;
