pub mod cli {
    pub mod parser;
}
pub mod config;
pub mod controller;
pub mod github {
    pub mod client;
    pub mod issues;
    pub mod repository;
}
pub mod output;
pub mod render;
pub mod route;
pub mod run;
pub mod view_state;
