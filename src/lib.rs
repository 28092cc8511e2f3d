pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
pub mod services;
pub mod youtube_rs;

#[cfg(test)]
mod test_utils;
