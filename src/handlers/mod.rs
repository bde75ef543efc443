// handlers/mod.rs - Two-tier handler layout
//
// Public (no token)     → service info, health, listing shows
// Protected (write token) → creating and deleting shows
pub mod public;
pub mod protected;
