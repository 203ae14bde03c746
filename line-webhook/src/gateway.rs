//! Helpers for API Gateway proxy requests and responses.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::HeaderValue;

/// The header LINE uses to sign webhook requests.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Returns the raw request body, decoding it if API Gateway marked it as base64.
/// A missing body is returned as an empty vector.
pub fn raw_body(request: &ApiGatewayProxyRequest) -> Result<Vec<u8>, RequestError> {
    let body = match request.body.as_deref() {
        Some(v) => v,
        None => return Ok(Vec::new()),
    };

    if request.is_base64_encoded {
        Ok(STANDARD.decode(body)?)
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

/// Returns the value of `name` from the single-value headers or,
/// if it is not there, the first non-empty value from the multi-value headers.
/// Header names are case-insensitive, the value is returned as-is.
pub fn header<'a>(request: &'a ApiGatewayProxyRequest, name: &str) -> Option<&'a str> {
    let non_empty = |v: &'a HeaderValue| v.to_str().ok().filter(|v| !v.is_empty());

    request
        .headers
        .get_all(name)
        .iter()
        .find_map(non_empty)
        .or_else(|| request.multi_value_headers.get_all(name).iter().find_map(non_empty))
}

/// Returns the signature LINE attached to the request or an empty string if there is none.
pub fn signature(request: &ApiGatewayProxyRequest) -> &str {
    header(request, SIGNATURE_HEADER).unwrap_or_default()
}

/// Returns the API Gateway request ID, if present.
pub fn request_id(request: &ApiGatewayProxyRequest) -> Option<&str> {
    request.request_context.request_id.as_deref()
}

/// A response with a plain text body.
pub fn text_response(status_code: i64, body: impl Into<String>) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        body: Some(Body::Text(body.into())),
        ..Default::default()
    }
}

/// A response without a body.
pub fn empty_response(status_code: i64) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        body: None,
        ..Default::default()
    }
}

/// Returns the text body of a response, an empty string for no body.
pub fn response_text(response: &ApiGatewayProxyResponse) -> &str {
    match &response.body {
        Some(Body::Text(v)) => v,
        Some(Body::Binary(v)) => std::str::from_utf8(v).unwrap_or_default(),
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Option<&str>, is_base64_encoded: bool) -> ApiGatewayProxyRequest {
        ApiGatewayProxyRequest {
            body: body.map(str::to_owned),
            is_base64_encoded,
            ..Default::default()
        }
    }

    #[test]
    fn plain_body_is_returned_verbatim() {
        let body = raw_body(&request(Some(r#"{"events":[]}"#), false)).unwrap();
        assert_eq!(body, br#"{"events":[]}"#);
    }

    #[test]
    fn base64_body_is_decoded() {
        let body = raw_body(&request(Some("eyJldmVudHMiOltdfQ=="), true)).unwrap();
        assert_eq!(body, br#"{"events":[]}"#);
    }

    #[test]
    fn invalid_base64_body_is_an_error() {
        let err = raw_body(&request(Some("not base64!"), true)).unwrap_err();
        assert!(err.to_string().starts_with("request body is not valid base64"));
    }

    #[test]
    fn missing_body_is_empty() {
        assert!(raw_body(&request(None, false)).unwrap().is_empty());
    }

    #[test]
    fn signature_header_is_case_insensitive_and_verbatim() {
        let mut req = request(None, false);
        req.headers
            .insert(SIGNATURE_HEADER, HeaderValue::from_static("AbC+/123="));
        assert_eq!(signature(&req), "AbC+/123=");
        assert_eq!(header(&req, "X-Line-Signature"), Some("AbC+/123="));
    }

    #[test]
    fn signature_falls_back_to_multi_value_headers() {
        let mut req = request(None, false);
        req.headers.insert(SIGNATURE_HEADER, HeaderValue::from_static(""));
        req.multi_value_headers
            .append(SIGNATURE_HEADER, HeaderValue::from_static(""));
        req.multi_value_headers
            .append(SIGNATURE_HEADER, HeaderValue::from_static("sig"));
        assert_eq!(signature(&req), "sig");
    }

    #[test]
    fn missing_signature_is_empty() {
        assert_eq!(signature(&request(None, false)), "");
    }

    #[test]
    fn responses() {
        let resp = text_response(200, "ok");
        assert_eq!(resp.status_code, 200);
        assert_eq!(response_text(&resp), "ok");

        let resp = empty_response(400);
        assert_eq!(resp.status_code, 400);
        assert!(resp.body.is_none());
        assert_eq!(response_text(&resp), "");
    }
}
