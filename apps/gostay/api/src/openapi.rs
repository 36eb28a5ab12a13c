use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::FailureBody)
    ),
    info(
        title = "GoStay API",
        version = "0.1.0",
        description = "Room availability, bookings, owner dashboards and hosted checkout"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/bookings", api = domain_bookings::ApiDoc),
        (path = "/bookings", api = domain_payments::ApiDoc)
    )
)]
pub struct ApiDoc;
