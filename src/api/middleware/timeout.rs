//! Per-request deadline.
//!
//! A handler that runs past the deadline is dropped and the caller receives
//! the usual `{ error, kind, details }` body with status `504`.
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::warn;
use std::{
    rc::Rc,
    task::{Context, Poll},
    time::Duration,
};
use tokio::time::timeout;

use crate::models::ApiError;

pub struct RequestDeadline {
    duration: Duration,
}

impl RequestDeadline {
    pub fn new(seconds: u64) -> Self {
        Self {
            duration: Duration::from_secs(seconds),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestDeadline
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestDeadlineService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestDeadlineService {
            service: Rc::new(service),
            duration: self.duration,
        }))
    }
}

pub struct RequestDeadlineService<S> {
    service: Rc<S>,
    duration: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestDeadlineService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let duration = self.duration;

        Box::pin(async move {
            let target = format!("{} {}", req.method(), req.path());

            match timeout(duration, service.call(req)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("{target} exceeded the {}s request deadline", duration.as_secs());
                    Err(ApiError::RequestTimeout(duration.as_secs()).into())
                }
            }
        })
    }
}
