use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::models::{BookUpdate, NewBook};
use crate::error::ApiError;
use crate::schema::SchemaVariant;
use crate::state::AppState;

/// A request body type bound to one of the book schemas
pub trait ValidatedPayload: DeserializeOwned {
    const SCHEMA: SchemaVariant;
}

impl ValidatedPayload for NewBook {
    const SCHEMA: SchemaVariant = SchemaVariant::Create;
}

impl ValidatedPayload for BookUpdate {
    const SCHEMA: SchemaVariant = SchemaVariant::Update;
}

/// JSON body extractor that checks the payload against its schema before
/// deserializing it. Rejects with [`ApiError`], so handlers never see an
/// invalid payload.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for ValidJson<T>
where
    T: ValidatedPayload + Send,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "valid_json_extractor", skip_all, fields(schema = T::SCHEMA.schema_name()))]
    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(?rejection, "Body rejected");
                ApiError::invalid_json(rejection.body_text())
            })?;

        let mut payload = state.validator.validate(T::SCHEMA, payload)?;
        integral_floats_to_integers(&mut payload);

        let value = serde_json::from_value(payload)
            .map_err(|e| ApiError::validation_error(vec![format!("instance {}", e)]))?;

        tracing::trace!("Validated");
        Ok(ValidJson(value))
    }
}

/// The schemas accept `99.0` as an integer; rewrite such numbers as `99` so
/// they deserialize into the integer fields.
fn integral_floats_to_integers(payload: &mut Value) {
    let Value::Object(fields) = payload else {
        return;
    };
    for value in fields.values_mut() {
        if !value.is_f64() {
            continue;
        }
        let Some(float) = value.as_f64() else {
            continue;
        };
        if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
            *value = Value::from(float as i64);
        }
    }
}
