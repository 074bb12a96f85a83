pub mod add;
pub mod clear;
pub mod day;
pub mod grid;
pub mod list;
pub mod next;
pub mod remove;
