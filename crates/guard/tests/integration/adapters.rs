//! Adapters driven from concurrent tasks.

use std::sync::Arc;

use nebula_guard::adapter::{
    ContextGuard, Middleware, Rejection, RequestContext, ResolverError, ResolverGuard,
};
use nebula_guard::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn signup_fields() -> Vec<Field> {
    vec![
        Field::new("email", string().min(3).with_message("Invalid email")),
        Field::new("age", integer().min(13).with_code(403)),
        Field::new("newsletter", boolean().optional().default(false)),
    ]
}

#[tokio::test]
async fn middleware_shared_across_tasks() {
    let guard = Arc::new(Middleware::new(Engine::new(), signup_fields()));

    let bodies = [
        json!({"email": "ann@example.com", "age": 30}),
        json!({"email": "a", "age": 30}),
        json!({"email": "bob@example.com", "age": 9}),
        json!({"age": 30}),
    ];

    let mut handles = Vec::new();
    for mut body in bodies {
        let guard = Arc::clone(&guard);
        handles.push(tokio::spawn(async move {
            guard.handle(&mut body, |outcome| outcome).await
        }));
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    assert_eq!(
        outcomes,
        vec![
            None,
            Some(ErrorPayload::from("Invalid email")),
            Some(ErrorPayload::Code(403)),
            Some(ErrorPayload::Code(400)),
        ]
    );
}

struct Ctx {
    req: Value,
    status: Option<http::StatusCode>,
}

impl RequestContext for Ctx {
    fn request_mut(&mut self) -> &mut Value {
        &mut self.req
    }

    fn throw(&mut self, status: http::StatusCode, rejection: Rejection) {
        assert_eq!(status, rejection.status());
        self.status = Some(status);
    }
}

#[tokio::test]
async fn context_guard_applies_defaults_before_next() {
    let guard = ContextGuard::new(Engine::new(), signup_fields());
    let mut ctx = Ctx {
        req: json!({"email": "ann@example.com", "age": 30}),
        status: None,
    };

    let reached = guard.handle(&mut ctx, || async { true }).await;
    assert_eq!(reached, Some(true));
    assert_eq!(ctx.req["newsletter"], json!(false));
    assert_eq!(ctx.status, None);
}

#[tokio::test]
async fn context_guard_throws_bad_request() {
    let guard = ContextGuard::new(Engine::new(), signup_fields());
    let mut ctx = Ctx {
        req: json!({"email": "ann@example.com", "age": "thirty"}),
        status: None,
    };

    assert_eq!(guard.handle(&mut ctx, || async { true }).await, None);
    assert_eq!(ctx.status, Some(http::StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn resolver_guard_collapses_failures() {
    let guard = ResolverGuard::new(
        Engine::new(),
        signup_fields(),
        |_parent: (), args: Value, _ctx: (), _info: ()| async move {
            Ok::<_, std::io::Error>(args["email"].clone())
        },
    );

    let email = guard
        .resolve((), json!({"email": "ann@example.com", "age": 30}), (), ())
        .await
        .unwrap();
    assert_eq!(email, json!("ann@example.com"));

    // Both failures carry distinct payloads, but the resolver sees neither.
    for args in [json!({"email": "a", "age": 30}), json!({"email": "ann@x.io", "age": 1})] {
        let err = guard.resolve((), args, (), ()).await.unwrap_err();
        assert!(matches!(err, ResolverError::BadRequest));
    }
}
