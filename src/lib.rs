// cosmos-index - HTTP facade for Cosmos file indexes
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod cosmos;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;
