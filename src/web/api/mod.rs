pub mod error;
pub mod location;
pub mod look_angles;
pub mod satellites;
