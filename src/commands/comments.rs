use anyhow::Result;
use owo_colors::OwoColorize;
use petcare_core::models::{LikeRequest, NewComment};

use super::Context;
use crate::render::Render;
use crate::utils::tui;

pub async fn list(ctx: &Context, pet_id: &str) -> Result<()> {
    let client = ctx.client()?;

    let spinner = tui::create_spinner("Fetching comments".to_string());
    let result = client.list_comments(pet_id).await;
    spinner.finish_and_clear();
    let comments = result?;

    if comments.is_empty() {
        println!("{}", "No comments yet".dimmed());
        return Ok(());
    }

    for comment in &comments {
        println!("{}", comment.render());
    }
    Ok(())
}

pub async fn add(ctx: &Context, pet_id: &str, text: String) -> Result<()> {
    let user = ctx.require_user()?;
    let comment = NewComment {
        pet_id: pet_id.to_string(),
        user_id: user.id.clone(),
        comment_text: text,
    };

    let created = ctx.client()?.create_comment(&comment).await?;
    println!("{}", created.render());
    Ok(())
}

pub async fn like(ctx: &Context, comment_id: &str) -> Result<()> {
    let user = ctx.require_user()?;
    let like = LikeRequest {
        user_id: user.id.clone(),
    };

    let comment = ctx.client()?.like_comment(comment_id, &like).await?;
    println!("{}", comment.render());
    Ok(())
}
