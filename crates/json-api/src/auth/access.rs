//! Access rules for owner and admin routes.

use salvo::prelude::*;
use uuid::Uuid;

use crate::extensions::*;

/// Lets the request through only when the `{user}` path segment is the current user.
#[salvo::handler]
pub(crate) async fn owner_only(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let allowed = match (depot.current_user_or_401(), req.param::<Uuid>("user")) {
        (Ok(user), Some(path_user)) => user.uuid.into_uuid() == path_user,
        _ => false,
    };

    if !allowed {
        res.render(StatusError::unauthorized().brief("The user has not access to this data"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

/// Lets the request through only for admins.
#[salvo::handler]
pub(crate) async fn admin_only(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if !depot.current_user_or_401().is_ok_and(|user| user.is_admin()) {
        res.render(StatusError::unauthorized().brief("The user is not an admin"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}
