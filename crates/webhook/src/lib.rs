pub mod archive;
pub mod routes;
pub mod state;
pub mod wire;
