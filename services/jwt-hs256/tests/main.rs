use std::env;
use std::str::FromStr;

use authsign_core::{Context, Result, Signer};
use authsign_file_read_tokio::TokioFileRead;
use authsign_http_send_reqwest::ReqwestHttpSend;
use authsign_jwt_hs256::{DefaultCredentialProvider, RequestSigner};
use http::Request;
use log::{debug, warn};
use reqwest::Client;

fn init_signer() -> Option<(Context, Signer<authsign_jwt_hs256::Credential>)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("AUTHSIGN_JWT_TEST").is_err() || env::var("AUTHSIGN_JWT_TEST").unwrap() != "on" {
        return None;
    }

    let context = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(authsign_core::OsEnv);

    let loader = DefaultCredentialProvider::new();
    let builder = RequestSigner::new();
    let signer = Signer::new(context.clone(), loader, builder);

    Some((context, signer))
}

#[tokio::test]
async fn test_bearer_post_is_accepted() -> Result<()> {
    let signer = init_signer();
    if signer.is_none() {
        warn!("AUTHSIGN_JWT_TEST is not set, skipped");
        return Ok(());
    }
    let (_context, signer) = signer.unwrap();

    let url = &env::var("AUTHSIGN_JWT_TEST_URL").expect("env AUTHSIGN_JWT_TEST_URL must set");

    let mut req = Request::new("");
    *req.method_mut() = http::Method::POST;
    *req.uri_mut() = http::Uri::from_str(url)?;

    let req = {
        let (mut parts, body) = req.into_parts();
        signer
            .sign(&mut parts, None)
            .await
            .expect("sign request must success");
        Request::from_parts(parts, body)
    };

    debug!("signed request: {:?}", req);

    let client = Client::new();
    let resp = client
        .execute(req.try_into().map_err(|e| {
            authsign_core::Error::unexpected("failed to convert request")
                .with_source(anyhow::Error::new(e))
        })?)
        .await
        .map_err(|e| {
            authsign_core::Error::unexpected("failed to execute request")
                .with_source(anyhow::Error::new(e))
        })?;

    let status = resp.status();
    debug!("got response: {:?}", resp);
    assert!(status.is_success(), "bearer request rejected with {status}");
    Ok(())
}

#[tokio::test]
async fn test_missing_bearer_is_rejected() -> Result<()> {
    let signer = init_signer();
    if signer.is_none() {
        warn!("AUTHSIGN_JWT_TEST is not set, skipped");
        return Ok(());
    }

    let url = &env::var("AUTHSIGN_JWT_TEST_URL").expect("env AUTHSIGN_JWT_TEST_URL must set");

    let client = Client::new();
    let resp = client.post(url).send().await.map_err(|e| {
        authsign_core::Error::unexpected("failed to execute request")
            .with_source(anyhow::Error::new(e))
    })?;

    let status = resp.status();
    debug!("got response: {:?}", resp);
    assert!(
        status.is_client_error(),
        "request without a token unexpectedly got {status}"
    );
    Ok(())
}
