//! egui front end for the dashboard.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
