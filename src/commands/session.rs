use mealdesk::{
    application::{error::AppError, feedback::Toast},
    config::LoginArgs,
    infra::auth::AuthService,
};
use mealdesk_api_types::auth::Credentials;
use serde_json::json;
use time::format_description::well_known::Rfc3339;

use super::Ctx;
use super::io::read_text;
use super::print::{print_json, toast};

pub async fn login(ctx: &Ctx, args: LoginArgs) -> Result<(), AppError> {
    let password = match (args.password_file, args.password_env) {
        (Some(path), _) => read_text(&path)?.trim_end().to_string(),
        (None, Some(password)) => password,
        (None, None) => {
            return Err(AppError::invalid_input(
                "a password is required (--password-file or MEALDESK_PASSWORD)",
            ));
        }
    };
    let credentials = Credentials {
        email: args.email,
        password,
    };

    let session = AuthService::new(ctx.client().clone())
        .sign_in(&credentials)
        .await?;
    // Anything cached belongs to the previous identity.
    ctx.cache.clear();
    print_json(&session.user)?;
    toast(&Toast::success("Signed in"));
    Ok(())
}

pub fn logout(ctx: &Ctx) -> Result<(), AppError> {
    AuthService::new(ctx.client().clone()).sign_out()?;
    ctx.cache.clear();
    toast(&Toast::success("Signed out"));
    Ok(())
}

pub fn whoami(ctx: &Ctx) -> Result<(), AppError> {
    match ctx.tokens.session() {
        Some(session) => print_json(&json!({
            "signedIn": true,
            "user": session.user,
            "signedInAt": session.signed_in_at.format(&Rfc3339).ok(),
        })),
        None => print_json(&json!({ "signedIn": false })),
    }
}
