pub mod alert;
pub mod forecast;
pub mod user;

pub use alert::*;
pub use forecast::*;
pub use user::*;
