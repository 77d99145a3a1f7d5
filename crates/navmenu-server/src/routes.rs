//! HTTP routes
//!
//! - `GET /menu-data`: stored document, or an empty menu
//! - `POST /menu-data`: replace the stored document
//! - `GET /download-yaml`: stored document as YAML, keys stripped
//! - `POST /reset`: drop the stored document
//!
//! Every route is also served under `/api/`.

use std::convert::Infallible;

use serde_json::json;
use tracing::error;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::store::MenuStore;

/// File name offered for YAML downloads
pub const DOWNLOAD_FILE_NAME: &str = "main.en.yaml";

/// All routes, plain and under `/api/`, with JSON error bodies
pub fn routes(
    store: MenuStore,
    body_limit: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let endpoints = get_menu_data(store.clone())
        .or(post_menu_data(store.clone(), body_limit))
        .or(download_yaml(store.clone()))
        .or(reset(store));

    let api = warp::path("api").and(endpoints.clone());

    endpoints
        .or(api)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

fn with_store(store: MenuStore) -> impl Filter<Extract = (MenuStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn get_menu_data(
    store: MenuStore,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("menu-data")
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers::get_menu_data)
}

fn post_menu_data(
    store: MenuStore,
    body_limit: u64,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("menu-data")
        .and(warp::post())
        .and(warp::body::content_length_limit(body_limit))
        .and(warp::body::json())
        .and(with_store(store))
        .and_then(handlers::post_menu_data)
}

fn download_yaml(
    store: MenuStore,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("download-yaml")
        .and(warp::get())
        .and(with_store(store))
        .and_then(handlers::download_yaml)
}

fn reset(store: MenuStore) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("reset")
        .and(warp::post())
        .and(with_store(store))
        .and_then(handlers::reset)
}

fn error_reply(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
        .into_response()
}

fn message_reply(message: &str) -> Response {
    warp::reply::json(&json!({ "message": message })).into_response()
}

mod handlers {
    use std::convert::Infallible;

    use navmenu_codec::{json_to_yaml, validate_json_shape};
    use serde_json::json;
    use tracing::{debug, error, info};
    use warp::http::{header, StatusCode};
    use warp::reply::Response;
    use warp::Reply;

    use super::{error_reply, message_reply, DOWNLOAD_FILE_NAME};
    use crate::store::MenuStore;

    pub(super) async fn get_menu_data(store: MenuStore) -> Result<Response, Infallible> {
        let document = store
            .get()
            .unwrap_or_else(|| json!({ "menu": { "main": [] } }));
        Ok(warp::reply::json(&document).into_response())
    }

    pub(super) async fn post_menu_data(
        body: serde_json::Value,
        store: MenuStore,
    ) -> Result<Response, Infallible> {
        if let Err(err) = validate_json_shape(&body) {
            debug!(%err, "rejected menu data");
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                "Invalid menu data structure",
            ));
        }

        let entries = body["menu"]["main"].as_array().map_or(0, Vec::len);
        store.set(body);
        info!(entries, "menu data stored");
        Ok(message_reply("Temporary menu data updated successfully"))
    }

    pub(super) async fn download_yaml(store: MenuStore) -> Result<Response, Infallible> {
        let Some(document) = store.get() else {
            return Ok(error_reply(
                StatusCode::NOT_FOUND,
                "No temporary menu data available",
            ));
        };

        match json_to_yaml(&document) {
            Ok(yaml) => {
                let reply = warp::reply::with_header(yaml, header::CONTENT_TYPE, "text/yaml");
                let reply = warp::reply::with_header(
                    reply,
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
                );
                Ok(reply.into_response())
            }
            Err(err) => {
                error!(%err, "yaml download failed");
                Ok(error_reply(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate YAML download",
                ))
            }
        }
    }

    pub(super) async fn reset(store: MenuStore) -> Result<Response, Infallible> {
        store.clear();
        info!("menu data reset");
        Ok(message_reply("Reset completed successfully"))
    }
}

async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let reply = if rejection.is_not_found() {
        error_reply(StatusCode::NOT_FOUND, "API endpoint not found")
    } else if rejection.find::<warp::body::BodyDeserializeError>().is_some() {
        error_reply(StatusCode::BAD_REQUEST, "Invalid menu data structure")
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        error_reply(StatusCode::PAYLOAD_TOO_LARGE, "Payload too large")
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        error_reply(StatusCode::LENGTH_REQUIRED, "Content length required")
    } else if rejection.find::<warp::reject::UnsupportedMediaType>().is_some() {
        error_reply(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected a JSON body")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!(?rejection, "unhandled rejection");
        error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };
    Ok(reply)
}
