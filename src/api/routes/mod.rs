pub mod health;
pub mod players;
pub mod predictions;
pub mod teams;
