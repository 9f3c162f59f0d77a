// Resume input: the session state holder, the plain-text serializer used for
// AI prompts, advisory validation, and the input-view handlers.

pub mod handlers;
pub mod serializer;
pub mod session;
pub mod validation;
