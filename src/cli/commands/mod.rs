pub mod chains;
pub mod run;
