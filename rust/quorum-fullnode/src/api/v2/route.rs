use crate::api::route::RouteSignature;
use crate::route_display;

/// The version of the API represented by this module
pub const API_VERSION: &str = "v2";

/// An enum whose variants represent all of the node's v2 routes this SDK
/// drives
pub enum Route {
    /// Join a group from its seed
    JoinGroup,
}

route_display!(Route);

impl RouteSignature for Route {
    fn to_fragment(&self) -> String {
        match self {
            Route::JoinGroup => "group/join".into(),
        }
    }

    fn api_version(&self) -> &str {
        API_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn it_renders_the_documented_paths() {
        assert_eq!(Route::JoinGroup.to_string(), "/api/v2/group/join");
    }
}
