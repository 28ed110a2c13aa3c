pub mod assets;
pub mod config;
pub mod run;
pub mod view;
