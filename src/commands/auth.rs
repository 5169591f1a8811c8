use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use petcare_core::models::{LoginRequest, RegisterRequest};

use super::Context;
use crate::render::Render;
use crate::utils::tui;

fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(format!("  {}: ", prompt)).context("Failed to read password")
}

pub async fn register(ctx: &mut Context, name: Option<String>, email: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => tui::prompt_required("Name", None)?,
    };
    let email = match email {
        Some(email) => email,
        None => tui::prompt_required("Email", None)?,
    };
    let password = prompt_password("Password")?;
    let confirm = prompt_password("Confirm password")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    let req = RegisterRequest {
        name,
        email: email.clone(),
        password: password.clone(),
    };
    req.validate()?;

    let client = ctx.client()?;
    let spinner = tui::create_spinner("Creating account".to_string());
    let result = client.register(&req).await;
    spinner.finish_and_clear();
    let user = result?;

    println!("{}", format!("  Registered {}", user.name).green());

    // Log straight in so the new account is usable right away.
    let auth = client
        .login(&LoginRequest { email, password })
        .await
        .context("Registered, but logging in failed. Run `petcare login`")?;
    ctx.session.login(auth)?;
    println!("  Logged in as {}", user.render());

    Ok(())
}

pub async fn login(ctx: &mut Context, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => tui::prompt_required("Email", None)?,
    };
    let password = prompt_password("Password")?;

    let req = LoginRequest { email, password };
    req.validate()?;

    let client = ctx.client()?;
    let spinner = tui::create_spinner("Logging in".to_string());
    let result = client.login(&req).await;
    spinner.finish_and_clear();

    ctx.session.login(result?)?;
    let user = ctx.require_user()?;
    println!("{}", format!("  Logged in as {}", user.name).green());

    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    if !ctx.session.is_logged_in() {
        println!("{}", "Not logged in".dimmed());
        return Ok(());
    }

    ctx.session.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    match ctx.session.user() {
        Some(user) => println!("{} {}", user.render(), user.id.dimmed()),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}
