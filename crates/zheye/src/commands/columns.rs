//! Column command handlers.

use std::sync::Arc;

use tabled::Tabled;
use zheye_core::{Column, PageParams, Post, Store};

use crate::cli::{ColumnsArgs, ColumnsCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Detail};

use super::posts::PostRow;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Column>> for ColumnRow {
    fn from(c: &Arc<Column>) -> Self {
        Self {
            id: c.id.to_string(),
            title: c.title.clone(),
            description: output::truncate(&c.description, 40),
        }
    }
}

fn detail(column: &Column, color: bool) -> String {
    Detail::new(color)
        .field("ID", column.id.as_str())
        .field("Title", &column.title)
        .field(
            "Avatar",
            column
                .avatar
                .as_ref()
                .and_then(|a| a.url.as_deref())
                .unwrap_or_default(),
        )
        .body(Some(column.description.as_str()))
        .finish()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: ColumnsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ColumnsCommand::List { page, size } => {
            if page == 0 || size == 0 {
                return Err(CliError::Validation {
                    field: "page".into(),
                    reason: "page and size start at 1".into(),
                });
            }
            let params = PageParams::new(page, size);
            let fetched = store.fetch_columns(Some(params)).await?;

            // Show only this page, in server order.
            let columns: Vec<Arc<Column>> = fetched.list.into_iter().map(Arc::new).collect();
            let out = output::render_list(
                &global.output,
                &columns,
                |c| ColumnRow::from(c),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);

            let snap = store.snapshot();
            if snap.has_more_columns() && matches!(global.output, OutputFormat::Table) {
                output::status(
                    &format!(
                        "{} of {} columns loaded; next: zheye columns list --page {}",
                        snap.columns().len(),
                        snap.column_total(),
                        page + 1
                    ),
                    global.quiet,
                );
            }
            Ok(())
        }

        ColumnsCommand::Get { id } => {
            let column = store.fetch_column(&id).await?;
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &column,
                |c| detail(c, color),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ColumnsCommand::Posts { id } => {
            store.fetch_posts(&id).await?;
            let mut posts: Vec<Arc<Post>> = store.snapshot().posts_by_column(&id);
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let out = output::render_list(
                &global.output,
                &posts,
                |p| PostRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
