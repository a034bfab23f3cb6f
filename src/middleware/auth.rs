use crate::services::auth_service::{bearer_token, Claims, TokenKeys};
use crate::utils::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

const UNAUTHORIZED: &str = "unauthorized access";

/// Bearer-token gate. On success the verified `Claims` are available to the
/// handler through `web::ReqData<Claims>`.
///
/// With `legacy_status` set, rejections carry status 200 like the first
/// version of the service did; otherwise 401.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthGate {
    legacy_status: bool,
}

impl AuthGate {
    pub fn new(legacy_status: bool) -> Self {
        Self { legacy_status }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service,
            legacy_status: self.legacy_status,
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
    legacy_status: bool,
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let keys = req
        .app_data::<web::Data<TokenKeys>>()
        .ok_or_else(|| AppError::Config("token keys not registered".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

    let token = header_value
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("invalid authorization header".to_string()))?;

    keys.verify(token)
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let response = match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                return Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                });
            }
            Err(AppError::Unauthorized(reason)) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), reason);
                if self.legacy_status {
                    HttpResponse::Ok().json(serde_json::json!({
                        "success": false,
                        "error": UNAUTHORIZED
                    }))
                } else {
                    AppError::Unauthorized(UNAUTHORIZED.to_string()).error_response()
                }
            }
            Err(e) => {
                log::error!("❌ Auth gate failure: {}", e);
                e.error_response()
            }
        };

        let res = req.into_response(response).map_into_right_body();
        Box::pin(async move { Ok(res) })
    }
}
