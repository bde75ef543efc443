// handlers/protected/mod.rs - Handlers gated by the shared write token
//
// Every handler here takes `WriteAccess` as its first extractor after state,
// so a missing or wrong `x-app-token` is rejected with 401 before the body or
// query is looked at and before the store is touched.

pub mod shows;

pub use shows::create as shows_create;
pub use shows::delete as shows_delete;
