pub mod contributors;
pub mod hooks;
