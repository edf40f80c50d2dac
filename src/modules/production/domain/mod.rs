pub mod entities;

pub use entities::Production;
