//! # Custom Axum Extractors
//!
//! Form handling for the mutation routes. Fields are collected the way a
//! classic HTML form parser does it: query string first, then an
//! `application/x-www-form-urlencoded` or `multipart/form-data` body whose
//! values win on conflict. Missing or unreadable bodies yield no fields rather
//! than a rejection, so the handlers can answer with their own 400.

use axum::async_trait;
use axum::extract::{Form, FromRequest, Multipart, Query, Request};
use axum::http::header;
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::debug;

use crate::web::errors::{ApiError, ApiResult};

/// Form values submitted with a request
#[derive(Debug, Clone, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for FormFields {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut fields = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map(|Query(query)| query)
            .unwrap_or_default();

        if is_multipart(&req) {
            match Multipart::from_request(req, state).await {
                Ok(multipart) => fields.extend(multipart_text_fields(multipart).await),
                Err(rejection) => debug!(%rejection, "Unreadable multipart body"),
            }
        } else {
            match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(body)) => fields.extend(body),
                Err(rejection) => debug!(%rejection, "Request body carries no form fields"),
            }
        }

        Ok(Self(fields))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Collect named text parts; file uploads are skipped.
async fn multipart_text_fields(mut multipart: Multipart) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Stopped reading multipart body");
                break;
            }
        };

        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if field.file_name().is_some() {
            continue;
        }

        match field.text().await {
            Ok(value) => {
                fields.insert(name, value);
            }
            Err(e) => {
                debug!(field = %name, error = %e, "Stopped reading multipart body");
                break;
            }
        }
    }

    fields
}

/// Require a non-empty title
pub fn require_title(raw: Option<&str>) -> ApiResult<&str> {
    match raw {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(ApiError::bad_request("Title is required")),
    }
}

/// Parse a task id: optional sign followed by decimal digits
pub fn parse_task_id(raw: Option<&str>) -> ApiResult<i32> {
    raw.unwrap_or_default()
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request("Invalid task ID"))
}
