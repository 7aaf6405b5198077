pub mod email;
pub mod resume;
