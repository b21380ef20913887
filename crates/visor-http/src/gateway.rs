//! `reqwest` implementation of [`RecordGateway`].

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use visor_api_models::{
    ACTION_GET_TEXT, ACTION_READ, ReadResponse, TextResponse, UpdateRequest, UpdateResponse,
};
use visor_core::{GatewayError, GatewayResult, Record, RecordGateway};

use crate::config::{GatewayConfig, PostEncoding};
use crate::error::TransportError;

const PLAIN_TEXT_UTF8: &str = "text/plain;charset=utf-8";

const OP_READ: &str = "read";
const OP_UPDATE: &str = "update";
const OP_GET_TEXT: &str = "getText";

/// Gateway talking to the spreadsheet endpoint over HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Build a gateway with its own HTTP client.
    ///
    /// # Errors
    /// Returns [`GatewayError::Network`] if the client cannot be built.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::from(err).into_gateway("gateway.build_client"))?;
        Ok(Self { client, config })
    }

    /// Gateway reusing an existing client.
    #[must_use]
    pub const fn with_client(client: Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn action_url(&self, action: &str, id: Option<&str>) -> Url {
        let mut url = self.config.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("action", action);
            if let Some(id) = id {
                pairs.append_pair("id", id);
            }
        }
        url
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> GatewayResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| TransportError::from(err).into_gateway(operation))?;
        decode_envelope(operation, response).await
    }
}

async fn decode_envelope<T: DeserializeOwned>(
    operation: &'static str,
    response: Response,
) -> GatewayResult<T> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| TransportError::from(err).into_gateway(operation))?;
    match serde_json::from_slice::<T>(&bytes) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => {
            Err(TransportError::Status { status }.into_gateway(operation))
        }
        Err(source) => Err(TransportError::Decode { source }.into_gateway(operation)),
    }
}

#[async_trait]
impl RecordGateway for HttpGateway {
    #[instrument(name = "gateway.list_records", skip(self))]
    async fn list_records(&self) -> GatewayResult<Vec<Record>> {
        let url = self.action_url(ACTION_READ, None);
        let envelope: ReadResponse = self.get_envelope(OP_READ, url).await?;
        if !envelope.success {
            return Err(GatewayError::api(OP_READ, envelope.message, None));
        }
        debug!(count = envelope.data.len(), "listed records");
        Ok(envelope.data)
    }

    #[instrument(name = "gateway.update_resumen", skip(self, resumen), fields(record_id = %id))]
    async fn update_resumen(&self, id: &str, resumen: &str) -> GatewayResult<()> {
        let body = UpdateRequest::new(id, resumen);
        let request = self.client.post(self.config.endpoint.clone());
        let request = match self.config.post_encoding {
            PostEncoding::PlainText => {
                let text = serde_json::to_string(&body).map_err(|source| {
                    TransportError::Encode { source }.into_gateway(OP_UPDATE)
                })?;
                request
                    .header(CONTENT_TYPE, HeaderValue::from_static(PLAIN_TEXT_UTF8))
                    .body(text)
            }
            PostEncoding::Json => request.json(&body),
        };
        let response = request
            .send()
            .await
            .map_err(|err| TransportError::from(err).into_gateway(OP_UPDATE))?;
        let envelope: UpdateResponse = decode_envelope(OP_UPDATE, response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(GatewayError::api(
                OP_UPDATE,
                envelope.message,
                envelope.debug_id_buscado,
            ))
        }
    }

    #[instrument(name = "gateway.fetch_transcript_text", skip(self))]
    async fn fetch_transcript_text(&self, txt_id: &str) -> GatewayResult<String> {
        let url = self.action_url(ACTION_GET_TEXT, Some(txt_id));
        let envelope: TextResponse = self.get_envelope(OP_GET_TEXT, url).await?;
        if !envelope.success {
            return Err(GatewayError::api(OP_GET_TEXT, envelope.message, None));
        }
        Ok(envelope.text.unwrap_or_default())
    }
}
