use crate::api::route::RouteSignature;
use crate::app_route_display;
use crate::data::GroupId;

/// The version of the application API represented by this module
pub const API_VERSION: &str = "v1";

/// An enum whose variants represent the routes of the node's application API,
/// mounted under `/app`
pub enum Route {
    /// Issue a new auth token; nodes only allow this from localhost
    CreateToken,
    /// Trade a valid token for a fresh one
    RefreshToken,
    ListToken,
    RevokeToken,
    RemoveToken,
    /// Page through the decoded content index of a group
    GroupContent(GroupId),
}

app_route_display!(Route);

impl RouteSignature for Route {
    fn to_fragment(&self) -> String {
        match self {
            Route::CreateToken => "token/create".into(),
            Route::RefreshToken => "token/refresh".into(),
            Route::ListToken => "token/list".into(),
            Route::RevokeToken => "token/revoke".into(),
            Route::RemoveToken => "token/remove".into(),
            Route::GroupContent(group_id) => format!("group/{group_id}/content"),
        }
    }

    fn api_version(&self) -> &str {
        API_VERSION
    }
}
