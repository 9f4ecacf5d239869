pub mod deck;
pub mod storage;
