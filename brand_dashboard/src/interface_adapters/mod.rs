pub mod clients;
pub mod presenter;
pub mod protocol;
pub mod session_store;
pub mod state;
