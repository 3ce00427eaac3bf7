//! # stowage-auth
//!
//! Stateless authentication primitives: HS256 access tokens and Argon2id
//! password hashing with a minimal password policy.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
