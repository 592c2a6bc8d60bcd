//! Lambda HTTP entry point
//!
//! `GET /calculators/sip?monthlyInvestment=10000&expectedReturn=12&years=10`
//! or `GET /?calculator=sip&...` evaluates from query parameters; `POST` with a
//! JSON body tagged by `"calculator"` does the same from JSON.
//!
//! Statutory assumptions are read once at cold start from the file named by
//! `CALC_ASSUMPTIONS`, if set.

use financial_calculators::{Assumptions, CalcError, CalculatorRequest};
use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let assumptions = match std::env::var("CALC_ASSUMPTIONS") {
        Ok(path) => Assumptions::from_json_file(&path)?,
        Err(_) => Assumptions::default(),
    };
    let assumptions = &assumptions;

    run(service_fn(move |event: Request| async move { handle(assumptions, event) })).await
}

fn handle(assumptions: &Assumptions, event: Request) -> Result<Response<Body>, Error> {
    let request = if event.method() == Method::POST {
        match serde_json::from_slice::<Value>(event.body().as_ref()) {
            Ok(body) => CalculatorRequest::from_json(body),
            Err(e) => Err(CalcError::InvalidRequest(e.to_string())),
        }
    } else {
        let query = event.query_string_parameters();
        let calculator = query
            .first("calculator")
            .map(str::to_string)
            .or_else(|| slug_from_path(event.uri().path()));

        match calculator {
            Some(calculator) => CalculatorRequest::from_query(
                &calculator,
                query.iter().filter(|(k, _)| *k != "calculator"),
            ),
            None => Err(CalcError::InvalidRequest("missing calculator".to_string())),
        }
    };

    let (status, body) = answer(assumptions, request);
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}

fn answer(assumptions: &Assumptions, request: Result<CalculatorRequest, CalcError>) -> (StatusCode, Value) {
    let outcome = request.and_then(|r| r.evaluate(assumptions).map(|response| (r.id(), response)));

    match outcome {
        Ok((id, response)) => match serde_json::to_value(&response) {
            Ok(result) => (StatusCode::OK, json!({ "calculator": id.slug(), "result": result })),
            Err(e) => {
                log::error!("serializing {} response: {}", id, e);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
            }
        },
        Err(e) => {
            log::debug!("rejected request: {}", e);
            let status = match e {
                CalcError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            };
            (status, json!({ "error": e.to_string() }))
        }
    }
}

/// `/calculators/<slug>` or `/<slug>`
fn slug_from_path(path: &str) -> Option<String> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && *s != "calculators")
        .map(str::to_string)
}
