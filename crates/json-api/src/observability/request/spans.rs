//! Low-cardinality route labels for spans and metrics.

use uuid::Uuid;

/// Segments that follow `business` and are not route names.
const BUSINESS_SUBRESOURCES: [&str; 1] = ["all-route-names"];

/// Replaces identifiers in `path` with placeholders, e.g.
/// `/user/{uuid}/business/{routeName}/shopping`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::with_capacity(path.len());
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        label.push('/');

        if Uuid::parse_str(segment).is_ok() {
            label.push_str("{uuid}");
        } else if previous == "business" && !BUSINESS_SUBRESOURCES.contains(&segment) {
            label.push_str("{routeName}");
        } else {
            label.push_str(segment);
        }

        previous = segment;
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn replaces_uuids_and_route_names() {
        let path = "/user/0190f0b6-3c1e-7a8a-9e55-0123456789ab/business/la-tienda/shopping";

        assert_eq!(
            route_label(path),
            "/user/{uuid}/business/{routeName}/shopping"
        );
        assert_eq!(route_label("/business/la-tienda"), "/business/{routeName}");
    }

    #[test]
    fn keeps_business_subresources() {
        let path = "/user/0190f0b6-3c1e-7a8a-9e55-0123456789ab/business/all-route-names";

        assert_eq!(route_label(path), "/user/{uuid}/business/all-route-names");
    }
}
