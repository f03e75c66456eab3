pub mod main;
pub mod bot;
pub mod server;
pub mod translate;
pub mod utils;

pub use main::Config;
pub use bot::RunMode;
