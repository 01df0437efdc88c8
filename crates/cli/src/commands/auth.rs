//! Sign-up, login and session commands

use super::{failure, flow_failure, loaded};
use crate::render::{self, Output};
use anyhow::Result;
use jiupluck_frontend_common::AppContext;
use jiupluck_frontend_common::auth::error_messages::{
    LOGIN_FAILED, REQUEST_FAILED, SIGNUP_FAILED, VERIFICATION_FAILED,
};
use jiupluck_frontend_common::auth::flows;
use jiupluck_frontend_common::hooks::users;
use jiupluck_http::types::SignupRequest;
use serde_json::json;

pub async fn signup(
    ctx: &AppContext,
    email: String,
    name: String,
    school: Option<String>,
    major: Option<String>,
    output: Output,
) -> Result<()> {
    let request = SignupRequest {
        email,
        name,
        school,
        major,
    };
    let response = flows::signup(ctx, &request)
        .await
        .map_err(|err| failure(&err, SIGNUP_FAILED))?;

    output.emit(&response, |response| {
        format!(
            "{}\nCheck {} for the code, then run `jiupluck verify-email --email {} --code <code>`",
            response.message, request.email, request.email
        )
    })
}

pub async fn verify_email(ctx: &AppContext, email: &str, code: &str, output: Output) -> Result<()> {
    let response = flows::verify_email(ctx, email, code)
        .await
        .map_err(|err| failure(&err, VERIFICATION_FAILED))?;

    output.emit(&response, |response| {
        format!(
            "{}\nYou can now run `jiupluck login --email {email}`",
            response.message
        )
    })
}

pub async fn login(ctx: &AppContext, email: &str, code: Option<&str>, output: Output) -> Result<()> {
    let Some(code) = code else {
        let response = flows::request_login_code(ctx, email)
            .await
            .map_err(|err| failure(&err, LOGIN_FAILED))?;
        return output.emit(&response, |response| {
            format!(
                "{}\nRun `jiupluck login --email {email} --code <code>` with the mailed code",
                response.message
            )
        });
    };

    flows::login(ctx, email, code)
        .await
        .map_err(|err| flow_failure(err, LOGIN_FAILED))?;

    output.emit(&json!({ "logged_in": true, "email": email }), |_| {
        format!("Logged in as {email}")
    })
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    flows::logout(ctx)?;
    println!("Logged out");
    Ok(())
}

pub async fn refresh(ctx: &AppContext) -> Result<()> {
    flows::refresh(ctx)
        .await
        .map_err(|err| flow_failure(err, REQUEST_FAILED))?;
    println!("Session refreshed");
    Ok(())
}

pub async fn whoami(ctx: &AppContext, output: Output) -> Result<()> {
    let user = loaded(users::use_current_user(ctx).await)?;
    output.emit(&user, render::user)
}
