// Bounded contexts
pub mod agenda;
pub mod feed;
pub mod group;
pub mod like;
pub mod notification;
pub mod production;
pub mod rating;
pub mod review;
pub mod search;
pub mod social;
pub mod user;
pub mod venue;
