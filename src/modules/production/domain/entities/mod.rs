pub mod production;

pub use production::Production;
