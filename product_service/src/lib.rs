pub mod cfg;
pub mod constant;
pub mod db;
pub mod error;
pub mod logging;
pub mod product;
pub mod req;
pub mod res;
pub mod server;
pub mod svc;
pub mod utils;
