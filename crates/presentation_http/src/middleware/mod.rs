//! HTTP middleware

mod cross_origin_policy;

pub use cross_origin_policy::CrossOriginPolicyLayer;
