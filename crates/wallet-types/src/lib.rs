pub mod account;
pub mod role;
pub mod validator;

pub use account::*;
pub use role::*;
pub use validator::*;
