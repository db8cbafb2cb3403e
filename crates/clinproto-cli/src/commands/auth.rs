use clinproto_api::services::auth as auth_api;
use clinproto_core::validation::{validate_login, validate_register};
use tracing::warn;

use super::{Context, Input};
use crate::cli::{LoginArgs, RegisterArgs};
use crate::render;
use crate::routes::nav_links;

pub(super) async fn login(ctx: &Context, args: LoginArgs) -> eyre::Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => Input::stdin().required("Password: ").await?,
    };
    validate_login(&args.email, &password)?;

    let user = ctx.store.login(&ctx.api, &args.email, &password).await?;
    println!("Signed in as {} ({})", user.email, user.role);
    Ok(())
}

pub(super) async fn register(ctx: &Context, args: RegisterArgs) -> eyre::Result<()> {
    let mut input = Input::stdin();
    let password = match args.password {
        Some(p) => p,
        None => input.required("Password: ").await?,
    };
    let confirm = match args.confirm_password {
        Some(p) => p,
        None => input.required("Confirm password: ").await?,
    };
    validate_register(&args.email, &password, &confirm)?;

    let user = auth_api::register(&ctx.api, &args.email, &password, args.role).await?;
    println!(
        "Registered {} as {}. Sign in with: clinproto login {}",
        user.email, user.role, user.email
    );
    Ok(())
}

pub(super) async fn logout(ctx: &Context) -> eyre::Result<()> {
    if let Err(e) = ctx.store.logout(&ctx.api).await {
        warn!(error = %e, "could not clear the stored session");
        return Err(e.into());
    }
    println!("Signed out.");
    Ok(())
}

pub(super) fn whoami(ctx: &Context) -> eyre::Result<()> {
    match ctx.store.state().auth.user {
        Some(user) => println!("{} ({}) id={}", user.email, user.role, user.id),
        None => println!("Not signed in."),
    }
    Ok(())
}

pub(super) fn nav(ctx: &Context) -> eyre::Result<()> {
    let role = ctx.store.state().auth.user.map(|u| u.role);
    println!("{}", render::nav_table(&nav_links(role)));
    Ok(())
}
