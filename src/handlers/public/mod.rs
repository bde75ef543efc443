// handlers/public/mod.rs - Public handlers (no write token required)
//
// Read access is intentionally open: anyone who can reach the server can list
// shows and check its health.

pub mod service;
pub mod shows;

pub use service::{health, root};
pub use shows::list as shows_list;
