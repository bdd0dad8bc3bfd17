pub mod client;
pub mod response;

pub use client::KinopoiskApiClient;
pub use response::{ApiResponse, Movie, MoviePage};
