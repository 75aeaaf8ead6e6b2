use crate::error::ApiError;
use crate::model::{Envelope, Guest, Party, PartyFields, PartyId, Rsvp};

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use log::debug;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

const JSON: &str = "application/json";

#[derive(Clone, Debug)]
pub struct PartyClient {
    http: HttpsClient,
    api_url: String,
    timeout: Duration,
}

impl PartyClient {
    /// `api_url` is the cohort root, e.g. `https://host/api/cohort`.
    pub fn new(api_url: &str, insecure: bool, timeout: Duration) -> Result<Self, ApiError> {
        let api_url = api_url.trim_end_matches('/').to_string();
        let uri: Uri = api_url.parse()?;

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            // Plain http never touches the store.
            if root_store.is_empty() && uri.scheme_str() == Some("https") {
                return Err(ApiError::NoRootCertificates);
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self {
            http,
            api_url,
            timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // --- READ OPERATIONS ---

    pub async fn list_parties(&self) -> Result<Vec<Party>, ApiError> {
        self.get_data("events").await
    }

    pub async fn get_party(&self, id: PartyId) -> Result<Party, ApiError> {
        self.get_data(&format!("events/{}", id)).await
    }

    pub async fn list_rsvps(&self) -> Result<Vec<Rsvp>, ApiError> {
        self.get_data("rsvps").await
    }

    pub async fn list_guests(&self) -> Result<Vec<Guest>, ApiError> {
        self.get_data("guests").await
    }

    // --- WRITE OPERATIONS ---
    // None of these return the entity: callers re-list to observe the change.

    pub async fn create_party(&self, fields: &PartyFields) -> Result<(), ApiError> {
        let body = serde_json::to_string(fields)?;
        self.send(Method::POST, "events", Some(body)).await?;
        Ok(())
    }

    pub async fn update_party(&self, id: PartyId, fields: &PartyFields) -> Result<(), ApiError> {
        let body = serde_json::to_string(fields)?;
        self.send(Method::PUT, &format!("events/{}", id), Some(body))
            .await?;
        Ok(())
    }

    pub async fn delete_party(&self, id: PartyId) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("events/{}", id), None)
            .await?;
        Ok(())
    }

    // --- PLUMBING ---

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let bytes = self.send(Method::GET, path, None).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/{}", self.api_url, path);
        debug!("{} {}", method, url);

        let mut builder = Request::builder()
            .method(method)
            .uri(url.parse::<Uri>()?)
            .header(ACCEPT, JSON);
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, JSON);
        }
        let request = builder.body(body.unwrap_or_default())?;

        let exchange = async {
            let response = self.http.request(request).await?;
            let status = response.status();
            let bytes = response.into_body().collect().await?.to_bytes();
            if !status.is_success() {
                return Err(ApiError::Status(status));
            }
            Ok::<_, ApiError>(bytes.to_vec())
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ApiError::Timeout(self.timeout))?
    }
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            ECDSA_NISTP384_SHA384,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}
