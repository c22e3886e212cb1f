//! Services operating on the assembled chart data

pub mod render_service;
