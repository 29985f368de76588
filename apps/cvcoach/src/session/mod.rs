// Session state and the controller that owns it.

pub mod controller;
pub mod handlers;
pub mod state;

pub use controller::Controller;
pub use state::Session;
