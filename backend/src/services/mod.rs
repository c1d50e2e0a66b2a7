pub mod imports;
pub mod writings;
