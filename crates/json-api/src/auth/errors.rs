//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use market_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("The session does not exist")
        }
        AuthServiceError::EmailAlreadyRegistered => {
            StatusError::unauthorized().brief("Email already registered")
        }
        AuthServiceError::UnknownUser => {
            StatusError::unauthorized().brief("This user does not exist")
        }
        AuthServiceError::UnknownValidationCode => {
            StatusError::bad_request().brief("This validation code does not exist")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::NotValidated => {
            StatusError::unauthorized().brief("The user is no validated")
        }
        AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Mail(source) => {
            error!("failed to deliver validation code: {source}");

            StatusError::internal_server_error()
        }
    }
}
