pub mod duration;
pub mod gender;
pub mod stop;
