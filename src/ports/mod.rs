pub mod youtube;
