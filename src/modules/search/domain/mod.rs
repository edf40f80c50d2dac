pub mod hit;
pub mod similarity;

pub use hit::{HitKind, SearchHit};
pub use similarity::similarity;
