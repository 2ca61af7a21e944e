//! Business Errors

use salvo::http::StatusError;
use tracing::error;

use market_app::domain::businesses::BusinessesServiceError;

pub(crate) fn into_status_error(error: BusinessesServiceError) -> StatusError {
    match error {
        BusinessesServiceError::NotFound => StatusError::not_found().brief("Business not found"),
        BusinessesServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Route name already exists")
        }
        BusinessesServiceError::InvalidRouteName => StatusError::bad_request()
            .brief("Invalid route name")
            .detail("Route names may only contain lower-case letters, digits and single dashes"),
        BusinessesServiceError::InvalidReference
        | BusinessesServiceError::MissingRequiredData
        | BusinessesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid business payload")
        }
        BusinessesServiceError::NotAllowed => {
            StatusError::forbidden().brief("The user is not allowed to create businesses")
        }
        BusinessesServiceError::PlanLimitExceeded(limit) => StatusError::forbidden()
            .brief("Plan limit exceeded")
            .detail(limit.to_string()),
        BusinessesServiceError::Sql(source) => {
            error!("businesses storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use market_app::domain::plans::models::PlanLimit;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn plan_limits_are_forbidden() {
        let error = into_status_error(BusinessesServiceError::PlanLimitExceeded(
            PlanLimit::Businesses { max: 1 },
        ));

        assert_eq!(error.code, StatusCode::FORBIDDEN);
        assert_eq!(
            error.detail.as_deref(),
            Some("the plan allows at most 1 businesses")
        );
    }

    #[test]
    fn duplicate_route_name_is_a_bad_request() {
        let error = into_status_error(BusinessesServiceError::AlreadyExists);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Route name already exists");
    }
}
