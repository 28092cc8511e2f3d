pub mod apple;
pub mod error;
pub mod playlist;
pub mod youtube;
