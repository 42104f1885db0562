pub mod dishes;
pub mod hours;
pub mod login;
pub mod overview;
