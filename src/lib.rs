pub mod config;
pub mod consts;
pub mod decode;
pub mod directive;
pub mod model;
pub mod prompts;
pub mod relay;
pub mod sanitize;
pub mod server;
