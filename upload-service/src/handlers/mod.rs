pub mod file_upload;
pub mod health;
