//! Comment command handlers.

use tabled::Tabled;

use fourpaws_core::{Comment, CommentId, NewComment, Platform, PostId};

use crate::cli::{CommentsArgs, CommentsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Post")]
    post: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Likes")]
    likes: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Content")]
    content: String,
}

impl From<&Comment> for CommentRow {
    fn from(c: &Comment) -> Self {
        Self {
            id: c.id.to_string(),
            post: c
                .post_id
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".into()),
            author: c
                .author
                .as_ref()
                .map(|a| a.username.clone())
                .unwrap_or_else(|| "-".into()),
            likes: c.like_count.to_string(),
            created: util::timestamp(c.created_at.as_ref()),
            content: excerpt(&c.content),
        }
    }
}

/// First line of the content, clipped to keep table rows readable.
fn excerpt(content: &str) -> String {
    const MAX: usize = 48;
    let first_line = content.lines().next().unwrap_or_default();
    let clipped: String = first_line.chars().take(MAX).collect();
    if clipped.len() < content.len() {
        format!("{clipped}...")
    } else {
        clipped
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    platform: &Platform,
    args: CommentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CommentsCommand::List { post } => {
            let out = if let Some(post) = post {
                let list = platform.comments().recent_by_post(PostId::new(post)).await?;
                output::render_list(&global.output, &list, CommentRow::from, |c| {
                    c.id.to_string()
                })
            } else {
                let snap = platform.comments().comments().await?;
                output::render_list(
                    &global.output,
                    &snap,
                    |c| CommentRow::from(c.as_ref()),
                    |c| c.id.to_string(),
                )
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CommentsCommand::Add { post, content } => {
            let created = platform
                .comments()
                .create(NewComment {
                    content,
                    post: PostId::new(post),
                })
                .await?;
            output::status(
                &format!("Comment added with id {}", created.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        CommentsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete comment {id}?"), global.yes)? {
                return Ok(());
            }
            platform.comments().remove(CommentId::new(id)).await?;
            output::status("Comment deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
