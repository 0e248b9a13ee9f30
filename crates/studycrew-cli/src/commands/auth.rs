//! The `studycrew login`, `register`, `logout` and `whoami` commands.

use std::path::PathBuf;

use anyhow::{bail, Result};

use studycrew_core::model::{RegisterData, Role};
use studycrew_core::validation::bio_chars_remaining;

use super::Context;

pub async fn login(config: Option<PathBuf>, email: String, password: String) -> Result<()> {
    let mut ctx = Context::open(config)?;
    if !ctx.store.login(&email, &password).await {
        bail!(
            "login failed: {}",
            ctx.store.error().unwrap_or("Invalid credentials")
        );
    }
    let user = ctx.user()?;
    println!("Signed in as {} <{}>", user.display_name(), user.email);
    Ok(())
}

pub async fn register(
    config: Option<PathBuf>,
    name: String,
    email: String,
    password: String,
    year: u8,
    telegram: Option<String>,
    bio: Option<String>,
) -> Result<()> {
    let mut ctx = Context::open(config)?;
    let data = RegisterData {
        name,
        email,
        password,
        academic_year: year,
        telegram_username: telegram,
        bio,
    };
    if !ctx.store.register(data).await {
        bail!(
            "registration failed: {}",
            ctx.store.error().unwrap_or("Something went wrong")
        );
    }

    let user = ctx.user()?;
    println!("Account created successfully! Signed in as {}.", user.email);
    match user.effective_role() {
        Role::Assistant => println!("You'll be able to help other students as an Assistant!"),
        Role::Student => {
            println!("As a 1st year student, you can find assistants to help you.")
        }
    }
    Ok(())
}

pub async fn logout(config: Option<PathBuf>) -> Result<()> {
    let mut ctx = Context::open(config)?;
    let was_signed_in = ctx.store.is_authenticated();
    ctx.store.logout().await;
    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

pub fn whoami(config: Option<PathBuf>) -> Result<()> {
    let ctx = Context::open(config)?;
    let Some(user) = ctx.store.user() else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{} <{}>", user.display_name(), user.email);
    println!(
        "  Year {} ({})",
        user.academic_year.number(),
        user.academic_year
    );
    println!("  Role: {}", user.effective_role());
    if let Some(handle) = &user.telegram_username {
        println!("  Telegram: {handle}");
    }
    if let Some(bio) = &user.bio {
        println!("  Bio: {bio} ({} characters left)", bio_chars_remaining(bio));
    }
    if let Some(at) = ctx.store.signed_in_at() {
        println!("  Signed in {} at {}", at.format("%Y-%m-%d %H:%M UTC"), ctx.config.base_url);
    }
    Ok(())
}
