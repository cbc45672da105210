pub mod resolve;
pub mod server_scripts;
pub mod test_runner;
