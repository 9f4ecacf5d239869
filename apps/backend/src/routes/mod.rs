pub mod auth;
pub mod identity;
pub mod stats;
pub mod study;
pub mod toon;
