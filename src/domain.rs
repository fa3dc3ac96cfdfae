mod email_address;
mod subscriber;
mod tip;

pub use email_address::*;
pub use subscriber::*;
pub use tip::*;
