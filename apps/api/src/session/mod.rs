// Session state lives only in memory and only for one user's session.

pub mod state;
pub mod store;
