pub mod config;
pub mod favorites;
pub mod http;
pub mod map;
pub mod poi;
pub mod routing;
pub mod util;
