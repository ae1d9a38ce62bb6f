pub mod emailjs;
mod http;

pub use emailjs::{EmailJsServiceConfig, EmailJsServiceImpl};
