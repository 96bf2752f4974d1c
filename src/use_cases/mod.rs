// Use cases layer: token persistence, outcome resolution and the sign-in workflow.

pub mod resolver;
pub mod sign_in;
pub mod token_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use resolver::{Resolution, deliver, resolve};
pub use sign_in::SignInService;
pub use token_store::{ACCESS_TOKEN_KEY, TokenStore};
