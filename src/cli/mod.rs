pub mod exit;
pub mod main;
