//! Shopping Errors

use salvo::http::StatusError;
use tracing::error;

use market_app::domain::shopping::ShoppingServiceError;

pub(crate) fn into_status_error(error: ShoppingServiceError) -> StatusError {
    match error {
        ShoppingServiceError::NotFound => StatusError::not_found().brief("Shopping not found"),
        ShoppingServiceError::PostNotFound => StatusError::not_found().brief("Post not found"),
        ShoppingServiceError::BusinessNotFound => {
            StatusError::not_found().brief("Business not found")
        }
        ShoppingServiceError::InvalidAmount => StatusError::bad_request()
            .brief("Invalid amount")
            .detail("amountToAdd must be at least 1 and fit in the cart line"),
        ShoppingServiceError::OutOfStock => StatusError::bad_request().brief("Out of stock"),
        ShoppingServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Shopping already exists")
        }
        ShoppingServiceError::InvalidReference
        | ShoppingServiceError::MissingRequiredData
        | ShoppingServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid shopping payload")
        }
        ShoppingServiceError::Sql(source) => {
            error!("shopping storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_carts_and_posts_are_not_found() {
        let shopping = into_status_error(ShoppingServiceError::NotFound);
        let post = into_status_error(ShoppingServiceError::PostNotFound);

        assert_eq!(shopping.code, StatusCode::NOT_FOUND);
        assert_eq!(shopping.brief, "Shopping not found");
        assert_eq!(post.code, StatusCode::NOT_FOUND);
        assert_eq!(post.brief, "Post not found");
    }

    #[test]
    fn unusable_amounts_are_bad_requests() {
        let amount = into_status_error(ShoppingServiceError::InvalidAmount);
        let stock = into_status_error(ShoppingServiceError::OutOfStock);

        assert_eq!(amount.code, StatusCode::BAD_REQUEST);
        assert_eq!(amount.brief, "Invalid amount");
        assert_eq!(stock.code, StatusCode::BAD_REQUEST);
        assert_eq!(stock.brief, "Out of stock");
    }
}
