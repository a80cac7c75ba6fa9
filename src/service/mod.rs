//! Service Module
//!
//! Operation façade over the remote user service.
//!
//! # Operations
//! - `login` / `logout` - `POST /users/auth/{login,logout}`
//! - `get_user_by_id` - cache first, then `GET /users/{id}`
//! - `set_user_*` / `update` - `PUT /users/{id}`, write-through on success
//!
//! Every network attempt passes the availability gate first.

mod client;
mod gate;

pub use client::UserService;
pub use gate::AvailabilityGate;
