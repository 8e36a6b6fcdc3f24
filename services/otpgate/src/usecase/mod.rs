pub mod register;
pub mod verify;
