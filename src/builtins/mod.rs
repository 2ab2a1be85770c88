pub mod batch;
pub mod cd;
pub mod dir;
pub mod echo;
pub mod environ;
pub mod help;
pub mod registry;
pub mod system;
