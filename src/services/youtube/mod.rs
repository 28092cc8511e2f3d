pub mod client;
pub mod service;
pub mod title;

pub use client::YoutubeHttpAdapter;
pub use service::YoutubeImportService;
