pub mod friends;
pub mod identity;
pub mod intersection;
pub mod library;
pub mod profiles;
pub mod providers;
pub mod session;

pub use session::Session;
