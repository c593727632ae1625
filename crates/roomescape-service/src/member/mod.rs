//! Member signup, login, and identity resolution.

pub mod service;

pub use service::{LoginRequest, MemberService, SignupRequest};
