pub mod contact;
pub mod delivery;
