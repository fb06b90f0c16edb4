/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Stateless session tokens carrying the operator role claim
/// - [`credentials`]: The login state machine (database lookup with a
///   configured fallback operator; fails closed)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256 signing, 24 h expiry, role claim
/// - **Constant-time Comparison**: verification goes through the argon2
///   crate's constant-time primitives

pub mod credentials;
pub mod jwt;
pub mod password;
