pub mod action;
pub mod employee;
pub mod punch;
pub mod reference;
