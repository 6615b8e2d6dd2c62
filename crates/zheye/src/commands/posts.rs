//! Post command handlers.

use std::sync::Arc;

use tabled::Tabled;
use zheye_core::{Author, CreatePostRequest, EntityId, ImageRef, Post, Store, UpdatePostRequest};

use crate::cli::{GlobalOpts, PostBodyArgs, PostsArgs, PostsCommand};
use crate::error::CliError;
use crate::output::{self, Detail};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct PostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Excerpt")]
    excerpt: String,
}

impl From<&Arc<Post>> for PostRow {
    fn from(p: &Arc<Post>) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            created: created(p),
            excerpt: output::truncate(p.excerpt.as_deref().unwrap_or_default(), 40),
        }
    }
}

fn created(post: &Post) -> String {
    post.created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn author(post: &Post) -> String {
    match &post.author {
        Some(Author::Id(id)) => id.to_string(),
        Some(Author::Profile(profile)) => profile.display_name().to_owned(),
        None => String::new(),
    }
}

fn detail(post: &Post, color: bool) -> String {
    Detail::new(color)
        .field("ID", post.id.as_str())
        .field("Title", &post.title)
        .field("Column", post.column_id.as_str())
        .field("Author", author(post))
        .field("Created", created(post))
        .field(
            "Image",
            post.image.as_ref().and_then(ImageRef::url).unwrap_or_default(),
        )
        .body(post.content.as_deref().or(post.excerpt.as_deref()))
        .finish()
}

// ── Payload builders ────────────────────────────────────────────────

fn read_content(body: &PostBodyArgs) -> Result<Option<String>, CliError> {
    match (&body.content, &body.content_file) {
        (Some(text), _) => Ok(Some(text.clone())),
        (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
        (None, None) => Ok(None),
    }
}

fn create_request(
    title: String,
    body: &PostBodyArgs,
    column: EntityId,
    author: Option<EntityId>,
) -> Result<CreatePostRequest, CliError> {
    if title.trim().is_empty() {
        return Err(CliError::Validation {
            field: "title".into(),
            reason: "title cannot be empty".into(),
        });
    }
    let mut request = CreatePostRequest::new(title, column);
    request.content = read_content(body)?;
    request.excerpt.clone_from(&body.excerpt);
    request.image = body.image.as_deref().map(EntityId::from);
    request.author = author;
    request.is_rich_text = body.html.then_some(true);
    Ok(request)
}

fn update_request(
    title: Option<String>,
    body: &PostBodyArgs,
) -> Result<UpdatePostRequest, CliError> {
    let request = UpdatePostRequest {
        title,
        content: read_content(body)?,
        excerpt: body.excerpt.clone(),
        image: body.image.as_deref().map(EntityId::from),
        is_rich_text: body.html.then_some(true),
    };
    if request.is_empty() {
        return Err(CliError::Validation {
            field: "update".into(),
            reason: "nothing to change; pass --title, --content, --excerpt, --image or --html"
                .into(),
        });
    }
    Ok(request)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: PostsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        PostsCommand::Get { id } => {
            let post = store.fetch_post(&id).await?;
            let out = output::render_single(
                &global.output,
                &post,
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PostsCommand::Create {
            title,
            body,
            column,
        } => {
            let user = util::require_login(store).await?;
            let column = column
                .map(EntityId::from)
                .or_else(|| user.column_id.clone())
                .ok_or_else(|| CliError::Validation {
                    field: "column".into(),
                    reason: "your account has no column; pass --column".into(),
                })?;
            let request = create_request(title, &body, column, user.id.clone())?;

            let post = store.create_post(&request).await?;
            let out = output::render_single(
                &global.output,
                &post,
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PostsCommand::Update { id, title, body } => {
            util::require_login(store).await?;
            let request = update_request(title, &body)?;
            let post = store.update_post(&id, &request).await?;
            output::status(&format!("Post '{}' updated", post.title), global.quiet);
            Ok(())
        }

        PostsCommand::Delete { id } => {
            util::require_login(store).await?;
            if !util::confirm(
                &format!("Delete post '{id}'? This cannot be undone."),
                global.yes,
            )? {
                return Ok(());
            }
            store.delete_post(&id).await?;
            output::status("Post deleted", global.quiet);
            Ok(())
        }
    }
}
