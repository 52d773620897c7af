pub mod check;
pub mod login;
pub mod register;

pub use check::check;
pub use login::login;
pub use register::register;
