//! Form body extraction for mutation endpoints.
//!
//! Accepts `application/x-www-form-urlencoded` and `multipart/form-data`.
//! An empty body without a `Content-Type` is an empty form. Anything else is
//! rejected as a validation failure.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};
use superheroes_core::{collect_fields, FormFields};

use crate::error::GatewayError;

/// Decoded text fields of a form body. Repeated keys keep the last value.
#[derive(Debug, Clone, Default)]
pub struct FormBody(pub FormFields);

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some(content_type) = req.headers().get(header::CONTENT_TYPE) else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| GatewayError::InvalidForm(e.to_string()))?;
            if body.is_empty() {
                return Ok(Self::default());
            }
            return Err(GatewayError::InvalidForm(
                "form body requires a Content-Type header".to_owned(),
            ));
        };
        let is_multipart = content_type
            .to_str()
            .is_ok_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| GatewayError::InvalidForm(e.to_string()))?;
            let mut fields = FormFields::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| GatewayError::InvalidForm(e.to_string()))?
            {
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                let value = field.text().await.map_err(|e| GatewayError::InvalidForm(e.to_string()))?;
                fields.insert(name, value);
            }
            return Ok(Self(fields));
        }

        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| GatewayError::InvalidForm(e.to_string()))?;
        Ok(Self(collect_fields(pairs)))
    }
}
