/// Authentication primitives
///
/// - `password`: Argon2id hashing and verification
/// - `jwt`: bearer token creation and validation
/// - `middleware`: authenticated-request context and header parsing
pub mod jwt;
pub mod middleware;
pub mod password;
