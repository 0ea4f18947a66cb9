//! Request and response DTOs for the grantflow API.

pub mod requests;
pub mod responses;

pub use requests::{
    validate_request, validation_message, CreateApplicationRequest, CreateGrantRequest,
    GenerateDraftRequest, LoginRequest, RegisterRequest, RequestPasswordResetRequest,
    ResetPasswordRequest, UpdateApplicationRequest, UpdateProfileRequest, VerifyRequest,
};
pub use responses::{
    ApplicationResponse, AuditLogResponse, CheckoutResponse, DraftResponse, GrantResponse,
    GrantSummary, RegisterResponse, ResetRequestedResponse, TokenResponse, UserResponse,
};
