pub mod component;
pub mod config;
pub mod init;
pub mod tools;

#[doc(hidden)]
pub mod test_support;
