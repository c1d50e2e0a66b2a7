pub mod reporter;
pub mod state;
