mod cookie;
mod id;
mod middleware;
mod session;

#[cfg(test)]
mod test_utils;

pub use id::{RandomBytes, SessionIdGenerator};
pub use middleware::SessionMiddleware;
pub use session::Session;
