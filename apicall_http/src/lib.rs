mod connection;
mod errors;
mod response;
pub use self::connection::{Connection, ConnectionBuilder};
pub use self::errors::Error;
pub use self::response::{Body, Response};
pub use reqwest::Method;
