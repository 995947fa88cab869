pub mod client;
pub mod http;

pub use client::{
    IdentityVerifier, VerificationRequest, VerificationResponse, VerifyError, VerifyResult,
};
pub use http::HttpIdentityVerifier;
