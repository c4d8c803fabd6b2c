mod credentials;
mod error;
mod handler;
mod message;
mod smtp;
mod submission;
mod transport;

pub use credentials::*;
pub use error::*;
pub use handler::*;
pub use message::*;
pub use smtp::*;
pub use submission::*;
pub use transport::*;
