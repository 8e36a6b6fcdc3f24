pub mod health;
pub mod register;
pub mod verify;
