pub mod analysis;
pub mod cli;
pub mod config;
pub mod intake;
pub mod logging;
pub mod routes;
pub mod storage;
pub mod terminal;
