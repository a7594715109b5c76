// API module - authenticated HTTP surface of the Insider platform

pub mod client;
pub mod decode;

pub use client::{
    ApiConfig, ApiFuture, HttpApiClient, InsiderApi, DEFAULT_SAST_URL, DEFAULT_UPLOAD_URL,
};
pub use decode::{decode_submit_response, SubmitSchema};
