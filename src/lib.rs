//! Client for the clinic appointment-booking API.
//!
//! [`state::App`] owns the whole view state: the session, the cached doctors
//! and appointments, the visible section and the current notification. The
//! binary in `main.rs` paints it as text.

pub mod config;
pub mod error;
pub mod notification;
pub mod projector;
pub mod render;
pub mod router;
pub mod state;
pub mod storage;

pub mod models {
    pub mod appointment;
    pub mod doctor;
    pub mod patient;
    pub mod session;
    pub mod user;
}

pub mod gateway {
    pub mod auth;
    pub mod client;
    pub mod records;
}

pub mod services {
    pub mod session;
}

pub mod handlers {
    pub mod appointments;
    pub mod auth;
    pub mod navigation;
}

pub mod validation {
    pub mod appointment;
    pub mod auth;
}

pub use config::Config;
pub use error::{AppError, Result};
pub use state::App;
