pub mod models;
pub mod review_repository_impl;

pub use review_repository_impl::ReviewRepositoryImpl;
