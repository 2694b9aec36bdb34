pub mod returns;
pub mod scenarios;
