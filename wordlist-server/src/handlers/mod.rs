pub mod attributes;
pub mod health;
pub mod words;
