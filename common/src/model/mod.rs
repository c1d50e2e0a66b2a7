pub mod source;
pub mod writing;
