//! Local email/password authentication.
//!
//! Registration issues a time-boxed 6-digit OTP; accounts stay unverified
//! until the code is confirmed. Verified logins receive an HS256 bearer
//! token encoding `{userId, role}` with a 24-hour expiry. Password resets
//! use single-use random tokens stored only as SHA-256 hashes.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/register` | No | Register citizen account |
//! | POST | `/api/auth/login` | No | Login, or re-issue OTP when unverified |
//! | POST | `/api/auth/verify-otp` | No | Confirm email verification code |
//! | POST | `/api/auth/resend-otp` | No | Issue a fresh verification code |
//! | POST | `/api/auth/forgot-password` | No | Request a reset token |
//! | POST | `/api/auth/reset-password` | No | Reset password with token |
//! | GET | `/api/auth/me` | Yes | Current user profile |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod policy;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
